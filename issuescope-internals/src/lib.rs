#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_docs_in_private_items,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal data layer for [`issuescope`].
//!
//! # Overview
//!
//! This crate contains the plain data structures that the [`issuescope`]
//! engine moves around: the immutable [`Issue`] record, the per-context
//! [`IssueLog`], and the depth-counted [`Scope`] that owns a log while at
//! least one unit of work is running in its context.
//!
//! Nothing in here knows about threads, hooks or logging. Deciding *which*
//! scope belongs to the running code, and what happens to a log when its
//! outermost scope closes, is the job of the [`issuescope`] crate.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`issuescope`] crate,
//! not this one.
//!
//! # Architecture
//!
//! - **[`issue`]**: the reported problem itself
//!   - [`Severity`]: warning or fatal
//!   - [`IssueSource`]: opaque, cheaply clonable handle to whatever object the
//!     problem was found in
//!   - [`Issue`]: source + message + severity, immutable once built
//!
//! - **[`snapshot`]**: [`IssueSnapshot`], an immutable view over a list of
//!   issues that later log mutation can never invalidate
//!
//! - **[`issue_log`]**: [`IssueLog`], the append-only (except for
//!   [`reset`](IssueLog::reset)) sequence with its single mark slot
//!
//! - **[`scope`]**: [`Scope`], the reentrancy counter attached 1:1 to a log
//!
//! [`issuescope`]: https://docs.rs/issuescope/latest/issuescope/

extern crate alloc;

pub mod issue;
pub mod issue_log;
pub mod scope;
pub mod snapshot;

pub use self::{
    issue::{IntoIssueSource, Issue, IssueSource, Severity},
    issue_log::IssueLog,
    scope::{Scope, ScopeExit},
    snapshot::IssueSnapshot,
};
