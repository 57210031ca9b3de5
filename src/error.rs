//! Failures produced by the engine itself.
//!
//! There are exactly two:
//!
//! - [`NoScopeOpen`]: a report, query or mark operation ran outside any
//!   collecting scope. This is a programming error at the call site.
//! - [`AggregateFailure`]: the outermost `*_or_fail` scope closed with fatal
//!   issues recorded and the work itself succeeded.
//!
//! Failures of the caller's own work are never wrapped into either of these.
//! [`RunError`] keeps the two apart when a single `Result` has to carry both.

use alloc::vec::Vec;
use core::fmt;

use issuescope_internals::{Issue, IssueSnapshot};

use crate::hooks::issue_formatting::{self, Summary};

/// Error returned by every report, query and mark operation invoked while no
/// collecting scope is open in the current context.
///
/// # Examples
///
/// ```
/// use issuescope::NoScopeOpen;
///
/// assert_eq!(issuescope::warning("s1", "w1"), Err(NoScopeOpen));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NoScopeOpen;

impl fmt::Display for NoScopeOpen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no issue scope is open in the current context")
    }
}

impl core::error::Error for NoScopeOpen {}

/// Raised when the outermost escalating scope closes with at least one fatal
/// issue recorded.
///
/// Carries every issue recorded during the scope, warnings included, in
/// reporting order. Its [`Display`](fmt::Display) output is the same summary
/// the log sink received.
///
/// # Examples
///
/// ```
/// use issuescope::Severity;
///
/// let failure = issuescope::run_collecting_or_fail(|| {
///     issuescope::warning("s0", "minor").unwrap();
///     issuescope::fatal("s1", "boom").unwrap();
///     1
/// })
/// .unwrap_err();
///
/// assert_eq!(failure.issues().len(), 2);
/// assert_eq!(failure.fatal_issues().count(), 1);
/// assert_eq!(failure.issues()[1].severity(), Severity::Fatal);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AggregateFailure {
    issues: IssueSnapshot,
}

impl AggregateFailure {
    pub(crate) fn new(issues: IssueSnapshot) -> Self {
        Self { issues }
    }

    /// All issues recorded during the scope, in reporting order.
    #[must_use]
    pub fn issues(&self) -> &IssueSnapshot {
        &self.issues
    }

    /// Consumes the failure, returning its issues.
    #[must_use]
    pub fn into_issues(self) -> IssueSnapshot {
        self.issues
    }

    /// Iterates over the fatal issues only.
    pub fn fatal_issues(&self) -> impl Iterator<Item = &Issue> + '_ {
        self.issues.fatal()
    }
}

impl fmt::Debug for AggregateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateFailure")
            .field("issues", &self.issues)
            .finish()
    }
}

impl fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fatal: Vec<&Issue> = self.issues.fatal().collect();
        let warnings: Vec<&Issue> = self.issues.warnings().collect();
        issue_formatting::format_summary(Summary::new(&fatal, &warnings), f)
    }
}

impl core::error::Error for AggregateFailure {}

/// Outcome of a failed `try_run_collecting_or_fail` call.
///
/// The two variants are kept apart by type so callers never have to inspect
/// messages to tell an engine failure from their own.
#[derive(Debug)]
pub enum RunError<E> {
    /// The work returned this error. Issues were still flushed to the log
    /// sink, but no aggregate failure was built.
    Work(E),
    /// The work succeeded, but fatal issues were recorded.
    Issues(AggregateFailure),
}

impl<E> RunError<E> {
    /// Returns `true` for [`RunError::Work`].
    #[must_use]
    pub fn is_work(&self) -> bool {
        matches!(self, RunError::Work(_))
    }

    /// Returns `true` for [`RunError::Issues`].
    #[must_use]
    pub fn is_issues(&self) -> bool {
        matches!(self, RunError::Issues(_))
    }

    /// The work error, if that is what this is.
    #[must_use]
    pub fn into_work(self) -> Option<E> {
        match self {
            RunError::Work(error) => Some(error),
            RunError::Issues(_) => None,
        }
    }

    /// The aggregate failure, if that is what this is.
    #[must_use]
    pub fn into_issues(self) -> Option<AggregateFailure> {
        match self {
            RunError::Work(_) => None,
            RunError::Issues(failure) => Some(failure),
        }
    }

    /// Maps the work error, leaving an aggregate failure untouched.
    pub fn map_work<F>(self, f: impl FnOnce(E) -> F) -> RunError<F> {
        match self {
            RunError::Work(error) => RunError::Work(f(error)),
            RunError::Issues(failure) => RunError::Issues(failure),
        }
    }
}

impl<E> From<AggregateFailure> for RunError<E> {
    fn from(failure: AggregateFailure) -> Self {
        RunError::Issues(failure)
    }
}

impl<E: fmt::Display> fmt::Display for RunError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Work(error) => fmt::Display::fmt(error, f),
            RunError::Issues(failure) => fmt::Display::fmt(failure, f),
        }
    }
}

impl<E> core::error::Error for RunError<E>
where
    E: core::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            RunError::Work(error) => error.source(),
            RunError::Issues(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[derive(Debug)]
    struct NotError;

    #[test]
    fn test_error_send_sync() {
        static_assertions::assert_impl_all!(NoScopeOpen: Send, Sync, Copy, core::error::Error);
        static_assertions::assert_impl_all!(AggregateFailure: Send, Sync, Clone, core::error::Error);
        static_assertions::assert_impl_all!(RunError<NoScopeOpen>: core::error::Error);
        static_assertions::assert_not_impl_any!(RunError<NotError>: core::error::Error);
        static_assertions::assert_not_impl_any!(AggregateFailure: Copy);
    }

    #[test]
    fn test_no_scope_open_display() {
        assert_eq!(
            NoScopeOpen.to_string(),
            "no issue scope is open in the current context"
        );
    }

    #[test]
    fn test_run_error_accessors() {
        let failure = AggregateFailure::new(IssueSnapshot::from(vec![Issue::fatal("s1", "boom")]));

        let issues: RunError<NoScopeOpen> = RunError::from(failure.clone());
        assert!(issues.is_issues());
        assert_eq!(issues.into_issues(), Some(failure));

        let work: RunError<u8> = RunError::Work(3);
        assert!(work.is_work());
        assert_eq!(work.map_work(u16::from).into_work(), Some(3u16));
    }

    #[test]
    fn test_run_error_display_is_transparent() {
        let work: RunError<NoScopeOpen> = RunError::Work(NoScopeOpen);
        assert_eq!(work.to_string(), NoScopeOpen.to_string());
    }
}
