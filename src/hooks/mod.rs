//! Hooks for customizing how finalized scopes are rendered and where the
//! result goes.
//!
//! # Hook Types
//!
//! - **[`issue_formatting`]**: turns issues into summary text. Used for log
//!   entries and for the `Display` output of
//!   [`AggregateFailure`](crate::AggregateFailure).
//! - **[`log_sink`]**: receives the rendered summaries.
//!
//! Each hook is a single global slot. Registering replaces the previous hook;
//! unregistering restores the built-in one from [`builtin_hooks`].

pub mod builtin_hooks;
mod hook_lock;
pub mod issue_formatting;
pub mod log_sink;
