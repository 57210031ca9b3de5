//! Formatting hooks for the summaries written when a scope is finalized.
//!
//! When the outermost scope in a context closes, the recorded issues are
//! rendered into one block of text per log entry: a header, the fatal issues,
//! then the warnings. The same rendering is used for the
//! [`Display`](core::fmt::Display) output of
//! [`AggregateFailure`](crate::AggregateFailure).
//!
//! This is the place to plug in localization or a different layout:
//!
//! ```rust
//! use std::fmt;
//!
//! use issuescope::{
//!     Issue,
//!     hooks::issue_formatting::{IssueFormatterHook, register_issue_formatter_hook},
//! };
//!
//! struct Terse;
//!
//! impl IssueFormatterHook for Terse {
//!     fn format_issue(&self, issue: &Issue, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(formatter, "{}", issue.message())
//!     }
//! }
//!
//! register_issue_formatter_hook(Terse);
//! # issuescope::hooks::issue_formatting::unregister_issue_formatter_hook();
//! ```
//!
//! # Default Formatter
//!
//! Without a registered hook, [`DefaultIssueFormatter::DEFAULT`] is used, or
//! [`DefaultIssueFormatter::WITH_SOURCES`] when the `ISSUESCOPE_FORMAT`
//! environment variable contains `sources`.

use core::fmt;

use issuescope_internals::{Issue, Severity};
use triomphe::Arc;
use unsize::CoerceUnsize;

use crate::hooks::{builtin_hooks::issue_formatter::DefaultIssueFormatter, hook_lock::HookLock};

type Hook = Arc<dyn IssueFormatterHook>;

static HOOK: HookLock<Hook> = HookLock::new();

/// The issues to render in one summary block, already partitioned.
///
/// Both partitions keep the relative reporting order of their issues.
#[derive(Copy, Clone, Debug)]
pub struct Summary<'a> {
    fatal: &'a [&'a Issue],
    warnings: &'a [&'a Issue],
}

impl<'a> Summary<'a> {
    /// Creates a summary from the two partitions.
    #[must_use]
    pub fn new(fatal: &'a [&'a Issue], warnings: &'a [&'a Issue]) -> Self {
        Self { fatal, warnings }
    }

    /// [`Severity::Fatal`] if the summary contains any fatal issue, otherwise
    /// [`Severity::Warning`].
    #[must_use]
    pub fn severity(&self) -> Severity {
        if self.fatal.is_empty() {
            Severity::Warning
        } else {
            Severity::Fatal
        }
    }

    /// The fatal issues.
    #[must_use]
    pub fn fatal(&self) -> &'a [&'a Issue] {
        self.fatal
    }

    /// The warnings.
    #[must_use]
    pub fn warnings(&self) -> &'a [&'a Issue] {
        self.warnings
    }

    /// Fatal issues first, then warnings.
    pub fn issues(self) -> impl Iterator<Item = &'a Issue> + 'a {
        self.fatal.iter().chain(self.warnings).copied()
    }

    /// Returns `true` if there is nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fatal.is_empty() && self.warnings.is_empty()
    }
}

/// A hook that turns issues into display text.
///
/// Only [`format_issue`](Self::format_issue) is required. The provided
/// [`format_summary`](Self::format_summary) writes a header line chosen by
/// [`summary_header`](Self::summary_header) followed by one line per issue.
pub trait IssueFormatterHook: 'static + Send + Sync {
    /// Formats a single issue as one summary line (without line break).
    fn format_issue(&self, issue: &Issue, formatter: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// The header line of a summary of the given severity class.
    fn summary_header(&self, severity: Severity) -> &str {
        match severity {
            Severity::Fatal => "The following errors and warnings have been detected:",
            Severity::Warning => "The following warnings have been detected:",
        }
    }

    /// Formats a whole summary block.
    fn format_summary(&self, summary: Summary<'_>, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.summary_header(summary.severity()))?;
        for issue in summary.issues() {
            writeln!(formatter)?;
            self.format_issue(issue, formatter)?;
        }
        Ok(())
    }
}

fn current_hook() -> Option<Hook> {
    HOOK.current()
}

pub(crate) fn format_summary(summary: Summary<'_>, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    let hook = current_hook();
    let hook: &dyn IssueFormatterHook = match hook.as_deref() {
        Some(hook) => hook,
        None => DefaultIssueFormatter::from_env(),
    };
    hook.format_summary(summary, formatter)
}

/// Renders a summary with the current formatter hook.
///
/// Implements [`Display`](fmt::Display); use `to_string()` to get the text.
#[derive(Copy, Clone, Debug)]
pub struct DisplaySummary<'a>(pub Summary<'a>);

impl fmt::Display for DisplaySummary<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_summary(self.0, formatter)
    }
}

/// Registers the global issue formatter hook, replacing any previous one.
///
/// Affects every summary rendered afterwards, including the `Display` output
/// of aggregate failures created earlier.
pub fn register_issue_formatter_hook(hook: impl IssueFormatterHook) {
    HOOK.replace(Some(
        Arc::new(hook).unsize(unsize::Coercion!(to dyn IssueFormatterHook)),
    ));
}

/// Removes the registered formatter hook, restoring the default formatter.
///
/// Returns `true` if a hook was registered.
pub fn unregister_issue_formatter_hook() -> bool {
    HOOK.replace(None).is_some()
}
