//! The per-context [`IssueLog`].

use alloc::vec::Vec;

use crate::{issue::Issue, snapshot::IssueSnapshot};

/// Ordered, mutable container of the [`Issue`]s reported in one execution
/// context.
///
/// Issues are kept in reporting order. The log has a single mark slot that
/// remembers a position in the sequence; [`reset`](Self::reset) drops
/// everything reported after that position and
/// [`issues_since`](Self::issues_since) can restrict a query to it.
///
/// Setting a new mark silently replaces the previous one. There is no stack of
/// marks.
///
/// # Invariants
///
/// When set, the mark satisfies `mark <= len`. Appends never move it, and the
/// only operation that shrinks the sequence (`reset`) clears it. A `reset`
/// with nothing reported since the mark leaves both untouched.
///
/// # Examples
///
/// ```
/// use issuescope_internals::{Issue, IssueLog};
///
/// let mut log = IssueLog::new();
/// log.append(Issue::warning("a", "kept"));
/// log.mark();
/// log.append(Issue::fatal("b", "speculative"));
/// assert!(log.has_fatal());
///
/// log.reset();
/// assert!(!log.has_fatal());
/// assert_eq!(log.len(), 1);
/// assert_eq!(log.mark_position(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct IssueLog {
    /// Issues in reporting order.
    issues: Vec<Issue>,
    /// Position recorded by the last `mark()`, if still set.
    mark: Option<usize>,
}

impl IssueLog {
    /// Creates an empty log with no mark.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issues: Vec::new(),
            mark: None,
        }
    }

    /// Adds `issue` at the end of the log.
    pub fn append(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Records the current length as the mark, replacing any previous mark.
    pub fn mark(&mut self) {
        self.mark = Some(self.issues.len());
    }

    /// Clears the mark. Does nothing if no mark is set.
    pub fn unmark(&mut self) {
        self.mark = None;
    }

    /// Removes every issue reported since the mark, then clears the mark.
    ///
    /// Does nothing if no mark is set, or if nothing was reported since the
    /// mark; in that case the mark stays in place.
    pub fn reset(&mut self) {
        if let Some(mark) = self.mark.filter(|&mark| mark < self.issues.len()) {
            self.issues.truncate(mark);
            self.mark = None;
        }
    }

    /// Returns a snapshot of the log.
    ///
    /// With `after_mark` set and a mark present, only the issues reported since
    /// the mark are included (an empty snapshot right after `mark()`).
    /// Otherwise the whole log is returned.
    #[must_use]
    pub fn issues_since(&self, after_mark: bool) -> IssueSnapshot {
        let start = match self.valid_mark() {
            Some(mark) if after_mark => mark,
            _ => 0,
        };
        IssueSnapshot::new(self.issues[start..].to_vec())
    }

    /// Returns `true` if any stored issue is fatal.
    #[must_use]
    pub fn has_fatal(&self) -> bool {
        self.issues.iter().any(Issue::is_fatal)
    }

    /// Number of stored issues.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns `true` if nothing has been reported.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// The current mark, if one is set.
    #[inline]
    #[must_use]
    pub fn mark_position(&self) -> Option<usize> {
        self.mark
    }

    /// Borrows the stored issues in reporting order.
    #[inline]
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consumes the log, handing its issues over as a snapshot.
    #[must_use]
    pub fn into_snapshot(self) -> IssueSnapshot {
        IssueSnapshot::new(self.issues)
    }

    /// The mark, if it is set and within bounds.
    fn valid_mark(&self) -> Option<usize> {
        self.mark.filter(|&mark| mark <= self.issues.len())
    }
}
