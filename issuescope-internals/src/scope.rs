//! The depth-counted [`Scope`] that owns an [`IssueLog`].

use crate::issue_log::IssueLog;

/// What a call to [`Scope::exit`] closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeExit {
    /// An inner scope closed; the log stays live for the enclosing ones.
    Nested,
    /// The outermost scope closed; the log must be finalized and discarded.
    Outermost,
}

/// Reentrancy counter attached 1:1 to an [`IssueLog`].
///
/// A scope is live while its depth is positive. Every [`enter`](Self::enter)
/// must be balanced by exactly one [`exit`](Self::exit); the exit that brings
/// the depth back to zero reports [`ScopeExit::Outermost`], which is the
/// caller's signal to finalize the log with [`into_log`](Self::into_log).
///
/// # Examples
///
/// ```
/// use issuescope_internals::{Issue, Scope, ScopeExit};
///
/// let mut scope = Scope::new();
/// scope.enter();
/// scope.enter();
/// scope.log_mut().append(Issue::warning("a", "w1"));
///
/// assert_eq!(scope.exit(), ScopeExit::Nested);
/// assert!(scope.is_open());
/// assert_eq!(scope.exit(), ScopeExit::Outermost);
/// assert!(!scope.is_open());
/// assert_eq!(scope.into_log().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Scope {
    /// Number of currently open nested scopes.
    depth: usize,
    /// The log shared by all of them.
    log: IssueLog,
}

impl Scope {
    /// Creates a closed scope (depth 0) with an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            depth: 0,
            log: IssueLog::new(),
        }
    }

    /// Opens one more nesting level.
    pub fn enter(&mut self) {
        self.depth += 1;
    }

    /// Closes one nesting level.
    ///
    /// Never drops below zero: exiting a scope that is already closed reports
    /// [`ScopeExit::Outermost`] again so the caller still finalizes it.
    pub fn exit(&mut self) -> ScopeExit {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            ScopeExit::Outermost
        } else {
            ScopeExit::Nested
        }
    }

    /// Current nesting depth.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` while at least one level is open.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.depth > 0
    }

    /// Borrows the log.
    #[inline]
    #[must_use]
    pub fn log(&self) -> &IssueLog {
        &self.log
    }

    /// Mutably borrows the log.
    #[inline]
    pub fn log_mut(&mut self) -> &mut IssueLog {
        &mut self.log
    }

    /// Consumes the scope, keeping only its log.
    #[must_use]
    pub fn into_log(self) -> IssueLog {
        self.log
    }
}
