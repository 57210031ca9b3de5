//! Built-in hooks provided by issuescope.
//!
//! Both are active without registering anything:
//!
//! - **[`issue_formatter`]**: [`DefaultIssueFormatter`] renders the summary
//!   blocks. Register a variant of it, or your own [`IssueFormatterHook`], to
//!   change the layout.
//! - **[`tracing_sink`]**: [`TracingSink`] forwards finalized summaries to
//!   [`tracing`] under the `issuescope` target.
//!
//! [`DefaultIssueFormatter`]: issue_formatter::DefaultIssueFormatter
//! [`IssueFormatterHook`]: crate::hooks::issue_formatting::IssueFormatterHook
//! [`TracingSink`]: tracing_sink::TracingSink

pub mod issue_formatter;
pub mod tracing_sink;
