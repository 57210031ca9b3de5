//! Turning a finished log into log output and, optionally, a failure.

use alloc::{string::ToString, vec::Vec};

use issuescope_internals::{Issue, IssueLog, Severity};

use crate::{
    error::AggregateFailure,
    hooks::{
        issue_formatting::{DisplaySummary, Summary},
        log_sink::{self, LogEntry},
    },
};

/// Finalizes the log of an outermost scope.
///
/// An empty log produces nothing. Otherwise exactly one entry is emitted to
/// the log sink: a fatal summary (fatal issues, then warnings) if any fatal
/// issue was recorded, a warning summary if not. An [`AggregateFailure`] is
/// returned only for a fatal summary with `escalate` set.
///
/// Must be called after the log has been detached from its context.
pub(crate) fn finalize(log: IssueLog, escalate: bool) -> Option<AggregateFailure> {
    if log.is_empty() {
        return None;
    }

    let snapshot = log.into_snapshot();
    let severity = if snapshot.has_fatal() {
        Severity::Fatal
    } else {
        Severity::Warning
    };

    {
        let fatal: Vec<&Issue> = snapshot.fatal().collect();
        let warnings: Vec<&Issue> = snapshot.warnings().collect();

        tracing::trace!(
            target: "issuescope",
            fatal = fatal.len(),
            warnings = warnings.len(),
            escalate,
            "finalizing issue scope",
        );

        let text = DisplaySummary(Summary::new(&fatal, &warnings)).to_string();
        log_sink::emit(&LogEntry::new(severity, &text, fatal.len(), warnings.len()));
    }

    (severity.is_fatal() && escalate).then(|| AggregateFailure::new(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_log_never_fails() {
        assert!(finalize(IssueLog::new(), true).is_none());
        assert!(finalize(IssueLog::new(), false).is_none());
    }

    #[test]
    fn test_warnings_never_fail() {
        let mut log = IssueLog::new();
        log.append(Issue::warning("s1", "w1"));
        log.append(Issue::warning("s2", "w2"));
        assert!(finalize(log, true).is_none());
    }

    #[test]
    fn test_fatal_fails_only_when_escalating() {
        let mut log = IssueLog::new();
        log.append(Issue::warning("s1", "w1"));
        log.append(Issue::fatal("s2", "f1"));

        assert!(finalize(log.clone(), false).is_none());

        let failure = finalize(log, true).expect("fatal issue recorded");
        let messages: Vec<&str> = failure.issues().iter().map(Issue::message).collect();
        assert_eq!(messages, ["w1", "f1"]);
        assert_eq!(failure.fatal_issues().count(), 1);
    }
}
