//! Commonly used items for convenient importing.
//!
//! ```rust
//! use issuescope::prelude::*;
//!
//! fn validate(fields: &[&'static str]) -> Result<(), AggregateFailure> {
//!     issuescope::run_collecting_or_fail(|| {
//!         for field in fields {
//!             if field.is_empty() {
//!                 fatal!(*field, "empty field name").unwrap();
//!             }
//!         }
//!     })
//! }
//!
//! assert!(validate(&["id", "name"]).is_ok());
//! assert!(validate(&["id", ""]).is_err());
//! ```
//!
//! # What's Included
//!
//! - **[`ScopeContext`]**: every operation, as methods on a context
//! - **[`Issue`]**, **[`Severity`]** and **[`IssueSource`]**
//! - **[`AggregateFailure`]**, **[`NoScopeOpen`]** and **[`RunError`]**
//! - **[`warning!`]** and **[`fatal!`]** (with the `std` feature)

pub use crate::{
    AggregateFailure, Issue, IssueSource, NoScopeOpen, RunError, ScopeContext, Severity,
};
#[cfg(feature = "std")]
pub use crate::{CurrentThread, fatal, warning};
