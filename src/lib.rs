#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Scope-bounded collection of warnings and fatal issues across nested work.
//!
//! ## Overview
//!
//! Validation-style code often finds many problems in one pass: a model
//! checker walks a whole resource tree, a config loader visits every key, a
//! compiler front end checks every declaration. Stopping at the first problem
//! hides the others, and threading an error list through every function is
//! noisy. This crate offers the alternative: code anywhere below a
//! *collecting scope* reports [`Issue`]s into the scope of its execution
//! context, and the outermost scope decides what happens to them when it
//! closes.
//!
//! ## Quick Example
//!
//! ```
//! fn check_method(name: &'static str, has_body: bool) {
//!     if !has_body {
//!         issuescope::fatal(name, "resource method has no body").unwrap();
//!     }
//! }
//!
//! fn check_resource() {
//!     // Nested scopes share the log of the outermost one.
//!     issuescope::run_collecting(|| {
//!         issuescope::warning("Users", "deprecated path syntax").unwrap();
//!         check_method("GET /users", true);
//!         check_method("PUT /users", false);
//!     });
//! }
//!
//! let failure = issuescope::run_collecting_or_fail(check_resource).unwrap_err();
//! assert_eq!(failure.issues().len(), 2);
//! assert_eq!(
//!     failure.to_string(),
//!     "The following errors and warnings have been detected:\n  \
//!      [FATAL] resource method has no body\n  \
//!      [WARNING] deprecated path syntax"
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - An **[`Issue`]** is a source, a message and a [`Severity`].
//! - A **scope** is opened by each `run_collecting*` call. Scopes nest; all
//!   levels in one context share a single log. Only the outermost level
//!   finalizes it.
//! - **Finalization** logs one summary through the [log sink](hooks::log_sink)
//!   (fatal issues first, then warnings). If the outermost call was an
//!   `*_or_fail` variant and a fatal issue was recorded, it also returns an
//!   [`AggregateFailure`] holding every recorded issue.
//! - An error returned by the work itself always takes precedence over an
//!   aggregate failure. See [`RunError`].
//! - A **mark** remembers a position in the log so a speculative branch can
//!   be rolled back with [`reset`] or inspected with
//!   [`list_issues(true)`](list_issues).
//!
//! Every report, query and mark operation returns [`NoScopeOpen`] when called
//! outside a scope.
//!
//! ## Contexts
//!
//! The free functions in this crate use [`CurrentThread`]: each OS thread has
//! its own scope. For other units of execution (async tasks, requests, or
//! `no_std` targets), use a [`ScopeRegistry`] keyed by your own identifiers,
//! or implement [`ScopeContext`] directly. All operations are available as
//! methods of that trait.
//!
//! ## Features
//!
//! - `std` (default): [`CurrentThread`], the free functions, the
//!   [`warning!`] and [`fatal!`] macros and environment configuration.
//!   Without it the crate is `no_std + alloc`.
//!
//! ## Configuration
//!
//! - [`hooks::issue_formatting`] changes how summaries are rendered.
//! - [`hooks::log_sink`] changes where they go. By default they are emitted
//!   as [`tracing`] events on the `issuescope` target.
//! - `ISSUESCOPE_FORMAT=sources` makes the default formatter print the source
//!   of each issue.
//!
//! For the data layer, see the [`issuescope-internals`] crate.
//!
//! [`issuescope-internals`]: issuescope_internals

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

mod context;
#[cfg(feature = "std")]
mod current;
mod error;
mod escalation;
pub mod hooks;
pub mod prelude;
pub mod registry;

pub use issuescope_internals::{
    IntoIssueSource, Issue, IssueLog, IssueSnapshot, IssueSource, Scope, ScopeExit, Severity,
};

#[cfg(feature = "std")]
pub use self::current::{
    CurrentThread, fatal, has_fatal_issues, list_issues, mark, report, reset, run_collecting,
    run_collecting_or_fail, try_run_collecting, try_run_collecting_or_fail, unmark, warning,
};
pub use self::{
    context::{ScopeContext, ScopeGuard},
    error::{AggregateFailure, NoScopeOpen, RunError},
    registry::ScopeRegistry,
};

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    use alloc::{borrow::Cow, fmt};
    #[doc(hidden)]
    pub use core::format_args;

    #[doc(hidden)]
    #[inline]
    #[must_use]
    pub fn format_message(args: fmt::Arguments<'_>) -> Cow<'static, str> {
        match args.as_str() {
            Some(message) => Cow::Borrowed(message),
            None => Cow::Owned(fmt::format(args)),
        }
    }
}
