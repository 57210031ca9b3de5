//! Immutable views over recorded issues.

use alloc::vec::Vec;
use core::{fmt, ops::Deref, slice};

use triomphe::{Arc, UniqueArc};

use crate::issue::Issue;

/// An immutable, ordered list of [`Issue`]s.
///
/// Snapshots are what callers get back from queries and what an aggregate
/// failure carries. They are detached from the log they were taken from:
/// appending to or resetting the log afterwards never changes a snapshot that
/// was already handed out.
///
/// Cloning is cheap (reference counted).
///
/// # Examples
///
/// ```
/// use issuescope_internals::{Issue, IssueSnapshot};
///
/// let snapshot = IssueSnapshot::from(vec![
///     Issue::warning("a", "first"),
///     Issue::fatal("b", "second"),
/// ]);
///
/// assert_eq!(snapshot.len(), 2);
/// assert!(snapshot.has_fatal());
/// assert_eq!(snapshot.fatal().count(), 1);
/// assert_eq!(snapshot[0].message(), "first");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct IssueSnapshot {
    /// Shared storage; never mutated after construction.
    issues: Arc<Vec<Issue>>,
}

impl IssueSnapshot {
    /// Creates a snapshot that owns `issues`.
    #[must_use]
    pub fn new(issues: Vec<Issue>) -> Self {
        Self {
            issues: Arc::new(issues),
        }
    }

    /// Creates an empty snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the issues as a slice, in reporting order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Issue] {
        &self.issues
    }

    /// Iterates over the issues in reporting order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// Iterates over the fatal issues, keeping their relative order.
    pub fn fatal(&self) -> impl Iterator<Item = &Issue> + '_ {
        self.iter().filter(|issue| issue.is_fatal())
    }

    /// Iterates over the warnings, keeping their relative order.
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> + '_ {
        self.iter().filter(|issue| !issue.is_fatal())
    }

    /// Returns `true` if any issue in the snapshot is fatal.
    #[must_use]
    pub fn has_fatal(&self) -> bool {
        self.iter().any(Issue::is_fatal)
    }

    /// Converts the snapshot back into a vector.
    ///
    /// Does not copy if this was the last handle to the storage.
    #[must_use]
    pub fn into_vec(self) -> Vec<Issue> {
        match Arc::try_unique(self.issues) {
            Ok(unique) => UniqueArc::into_inner(unique),
            Err(shared) => (*shared).clone(),
        }
    }
}

impl Default for IssueSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for IssueSnapshot {
    type Target = [Issue];

    #[inline]
    fn deref(&self) -> &[Issue] {
        self.as_slice()
    }
}

impl From<Vec<Issue>> for IssueSnapshot {
    fn from(issues: Vec<Issue>) -> Self {
        Self::new(issues)
    }
}

impl<'a> IntoIterator for &'a IssueSnapshot {
    type Item = &'a Issue;
    type IntoIter = slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for IssueSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_snapshot_send_sync_clone() {
        static_assertions::assert_impl_all!(IssueSnapshot: Send, Sync, Clone);
        static_assertions::assert_not_impl_any!(IssueSnapshot: Copy);
    }

    #[test]
    fn test_partitions_keep_order() {
        let snapshot = IssueSnapshot::from(vec![
            Issue::warning("a", "w1"),
            Issue::fatal("b", "f1"),
            Issue::warning("c", "w2"),
            Issue::fatal("d", "f2"),
        ]);

        let fatal: Vec<&str> = snapshot.fatal().map(Issue::message).collect();
        let warnings: Vec<&str> = snapshot.warnings().map(Issue::message).collect();
        assert_eq!(fatal, ["f1", "f2"]);
        assert_eq!(warnings, ["w1", "w2"]);
        assert!(snapshot.has_fatal());
    }

    #[test]
    fn test_into_vec_shared_and_unique() {
        let snapshot = IssueSnapshot::from(vec![Issue::warning("a", "w1")]);
        let copy = snapshot.clone();

        let shared = snapshot.into_vec();
        assert_eq!(shared, [Issue::warning("a", "w1")]);

        let unique = copy.into_vec();
        assert_eq!(unique.len(), 1);
    }

    #[test]
    fn test_empty() {
        let snapshot = IssueSnapshot::default();
        assert!(snapshot.is_empty());
        assert!(!snapshot.has_fatal());
        assert_eq!(snapshot, IssueSnapshot::empty());
    }
}
