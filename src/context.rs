//! Execution contexts and the operations available inside them.
//!
//! A context is "one logical thread of control": everything reported while a
//! scope is open in it lands in the same log, no matter how deeply the
//! reporting code is nested. The engine only needs three primitives from a
//! context, collected in [`ScopeContext`]; every public operation is a
//! provided method on top of them.
//!
//! Two contexts ship with the crate:
//!
//! - [`CurrentThread`](crate::CurrentThread) (feature `std`), the implicit
//!   per-thread context behind the free functions at the crate root.
//! - [`KeyedContext`](crate::registry::KeyedContext), one entry of an explicit
//!   [`ScopeRegistry`](crate::ScopeRegistry).
//!
//! Implementing [`ScopeContext`] for task-local storage is how the engine is
//! used with async executors, where a task may move between threads.

use alloc::borrow::Cow;

use issuescope_internals::{IntoIssueSource, Issue, IssueLog, IssueSnapshot, Scope, Severity};

use crate::{
    error::{AggregateFailure, NoScopeOpen, RunError},
    escalation,
};

/// The storage behind one execution context.
///
/// Implementors hold at most one [`Scope`]. The engine guarantees that
/// [`enter_scope`](Self::enter_scope) and [`exit_scope`](Self::exit_scope)
/// calls are balanced when they go through a [`ScopeGuard`].
///
/// # Examples
///
/// A context keyed by an explicit task value, here simply a cell:
///
/// ```rust
/// use core::cell::RefCell;
///
/// use issuescope::{Scope, ScopeContext, ScopeExit};
///
/// #[derive(Default)]
/// struct Task {
///     scope: RefCell<Option<Scope>>,
/// }
///
/// impl ScopeContext for Task {
///     fn enter_scope(&self) {
///         self.scope.borrow_mut().get_or_insert_with(Scope::new).enter();
///     }
///
///     fn exit_scope(&self) -> Option<Scope> {
///         let mut slot = self.scope.borrow_mut();
///         match slot.as_mut()?.exit() {
///             ScopeExit::Nested => None,
///             ScopeExit::Outermost => slot.take(),
///         }
///     }
///
///     fn with_scope<R>(&self, f: impl FnOnce(&mut Scope) -> R) -> Option<R> {
///         self.scope.borrow_mut().as_mut().filter(|s| s.is_open()).map(f)
///     }
/// }
///
/// let task = Task::default();
/// let issues = task.run_collecting(|| {
///     task.warning("s1", "w1").unwrap();
///     task.list_issues(false).unwrap()
/// });
/// assert_eq!(issues.len(), 1);
/// assert!(task.warning("s1", "late").is_err());
/// ```
pub trait ScopeContext {
    /// Opens a scope, creating the context's scope and log if none is open.
    fn enter_scope(&self);

    /// Closes one scope level.
    ///
    /// Returns the detached scope when this closed the outermost level; the
    /// context holds no scope afterwards. Returns `None` for a nested exit and
    /// when no scope was open.
    fn exit_scope(&self) -> Option<Scope>;

    /// Runs `f` on the open scope of this context.
    ///
    /// Returns `None` without running `f` if no scope is open. A scope found
    /// at depth zero is not open. `f` must not access this context again.
    fn with_scope<R>(&self, f: impl FnOnce(&mut Scope) -> R) -> Option<R>;

    /// Runs `f` on the log of the open scope.
    fn with_log<R>(&self, f: impl FnOnce(&mut IssueLog) -> R) -> Result<R, NoScopeOpen> {
        self.with_scope(|scope| f(scope.log_mut())).ok_or(NoScopeOpen)
    }

    /// Appends an issue to the log of the open scope.
    ///
    /// `source` may be `None`.
    fn report(
        &self,
        source: impl IntoIssueSource,
        message: impl Into<Cow<'static, str>>,
        severity: Severity,
    ) -> Result<(), NoScopeOpen> {
        let issue = Issue::new(source, message, severity);
        self.with_log(|log| log.append(issue))
    }

    /// Reports a [`Severity::Warning`] issue.
    fn warning(
        &self,
        source: impl IntoIssueSource,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<(), NoScopeOpen> {
        self.report(source, message, Severity::Warning)
    }

    /// Reports a [`Severity::Fatal`] issue.
    fn fatal(
        &self,
        source: impl IntoIssueSource,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<(), NoScopeOpen> {
        self.report(source, message, Severity::Fatal)
    }

    /// Returns `true` if the open scope has recorded a fatal issue.
    fn has_fatal_issues(&self) -> Result<bool, NoScopeOpen> {
        self.with_log(|log| log.has_fatal())
    }

    /// Snapshot of the recorded issues.
    ///
    /// With `since_mark` set and a mark in place, only issues reported after
    /// the mark are returned. Otherwise all of them.
    fn list_issues(&self, since_mark: bool) -> Result<IssueSnapshot, NoScopeOpen> {
        self.with_log(|log| log.issues_since(since_mark))
    }

    /// Remembers the current end of the log, replacing any previous mark.
    fn mark(&self) -> Result<(), NoScopeOpen> {
        self.with_log(IssueLog::mark)
    }

    /// Forgets the mark.
    fn unmark(&self) -> Result<(), NoScopeOpen> {
        self.with_log(IssueLog::unmark)
    }

    /// Removes every issue reported after the mark and forgets the mark.
    ///
    /// Without a mark this does nothing.
    fn reset(&self) -> Result<(), NoScopeOpen> {
        self.with_log(IssueLog::reset)
    }

    /// Runs `work` inside a scope and returns its result.
    ///
    /// When this is the outermost scope of the context, the recorded issues
    /// are logged on exit. Fatal issues never turn into a failure here.
    fn run_collecting<T>(&self, work: impl FnOnce() -> T) -> T {
        let guard = ScopeGuard::enter(self);
        let value = work();
        guard.close();
        value
    }

    /// Runs `work` inside a scope, failing if it is the outermost scope and a
    /// fatal issue was recorded.
    ///
    /// Nested inside another scope this behaves like
    /// [`run_collecting`](Self::run_collecting); only the outermost scope
    /// decides.
    fn run_collecting_or_fail<T>(&self, work: impl FnOnce() -> T) -> Result<T, AggregateFailure> {
        let guard = ScopeGuard::enter(self);
        let value = work();
        match guard.exit(true) {
            Some(failure) => Err(failure),
            None => Ok(value),
        }
    }

    /// Fallible variant of [`run_collecting`](Self::run_collecting).
    ///
    /// The work's error is returned unchanged after the scope is closed.
    fn try_run_collecting<T, E>(&self, work: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let guard = ScopeGuard::enter(self);
        let result = work();
        guard.close();
        result
    }

    /// Fallible variant of
    /// [`run_collecting_or_fail`](Self::run_collecting_or_fail).
    ///
    /// If the work fails, its error wins: recorded issues are still logged,
    /// but no aggregate failure is built.
    fn try_run_collecting_or_fail<T, E>(
        &self,
        work: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, RunError<E>> {
        let guard = ScopeGuard::enter(self);
        match work() {
            Ok(value) => match guard.exit(true) {
                Some(failure) => Err(RunError::Issues(failure)),
                None => Ok(value),
            },
            Err(error) => {
                guard.close();
                Err(RunError::Work(error))
            }
        }
    }
}

impl<C: ScopeContext + ?Sized> ScopeContext for &C {
    fn enter_scope(&self) {
        (**self).enter_scope();
    }

    fn exit_scope(&self) -> Option<Scope> {
        (**self).exit_scope()
    }

    fn with_scope<R>(&self, f: impl FnOnce(&mut Scope) -> R) -> Option<R> {
        (**self).with_scope(f)
    }
}

/// An open scope level that is closed when the guard goes away.
///
/// Closing explicitly with [`exit`](Self::exit) chooses whether fatal issues
/// escalate. A guard that is dropped instead (early return, panic unwind)
/// closes without escalating, so issues are still logged but nothing is
/// raised from a destructor.
///
/// # Examples
///
/// ```rust
/// use issuescope::{CurrentThread, ScopeContext, ScopeGuard};
///
/// let guard = ScopeGuard::enter(CurrentThread);
/// CurrentThread.fatal("s1", "boom").unwrap();
/// let failure = guard.exit(true).expect("outermost scope with a fatal issue");
/// assert_eq!(failure.issues().len(), 1);
/// ```
#[must_use = "dropping the guard closes the scope immediately"]
#[derive(Debug)]
pub struct ScopeGuard<C: ScopeContext> {
    context: C,
    armed: bool,
}

impl<C: ScopeContext> ScopeGuard<C> {
    /// Opens a scope level in `context`.
    pub fn enter(context: C) -> Self {
        context.enter_scope();
        Self {
            context,
            armed: true,
        }
    }

    /// The context this guard belongs to.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Closes the scope level.
    ///
    /// Returns a failure only if this closed the outermost level, `escalate`
    /// is set and a fatal issue was recorded.
    pub fn exit(mut self, escalate: bool) -> Option<AggregateFailure> {
        self.armed = false;
        self.finish(escalate)
    }

    /// Closes the scope level without escalating.
    pub fn close(self) {
        let _ = self.exit(false);
    }

    fn finish(&self, escalate: bool) -> Option<AggregateFailure> {
        // Detach first: the context is clean before any hook runs.
        let scope = self.context.exit_scope()?;
        escalation::finalize(scope.into_log(), escalate)
    }
}

impl<C: ScopeContext> Drop for ScopeGuard<C> {
    fn drop(&mut self) {
        if core::mem::take(&mut self.armed) {
            let _ = self.finish(false);
        }
    }
}
