//! The implicit per-thread context and the free-function API on top of it.

use alloc::borrow::Cow;
use core::cell::RefCell;

use issuescope_internals::{IntoIssueSource, IssueSnapshot, Scope, ScopeExit, Severity};

use crate::{
    context::ScopeContext,
    error::{AggregateFailure, NoScopeOpen, RunError},
};

std::thread_local! {
    static CURRENT_SCOPE: RefCell<Option<Scope>> = const { RefCell::new(None) };
}

/// Drops a scope left behind at depth zero, so it cannot leak into the next
/// one opened on this thread.
fn live_scope(slot: &mut Option<Scope>) -> &mut Option<Scope> {
    if slot.as_ref().is_some_and(|scope| !scope.is_open()) {
        *slot = None;
    }
    slot
}

/// The context of the calling thread.
///
/// Every thread has its own scope and log; issues reported on a spawned
/// thread never reach the scope of the thread that spawned it. The free
/// functions at the crate root ([`warning`](crate::warning),
/// [`run_collecting`](crate::run_collecting), ...) are shorthands for the
/// methods of this type.
///
/// # Examples
///
/// ```rust
/// use issuescope::{CurrentThread, ScopeContext};
///
/// let warned = CurrentThread.run_collecting(|| {
///     CurrentThread.warning("config", "unused key").unwrap();
///     CurrentThread.list_issues(false).unwrap().len()
/// });
/// assert_eq!(warned, 1);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CurrentThread;

impl CurrentThread {
    /// Returns `true` if a scope is open on the calling thread.
    #[must_use]
    pub fn is_open(self) -> bool {
        self.with_scope(|_| ()).is_some()
    }
}

impl ScopeContext for CurrentThread {
    fn enter_scope(&self) {
        CURRENT_SCOPE.with_borrow_mut(|slot| {
            live_scope(slot).get_or_insert_with(Scope::new).enter();
        });
    }

    fn exit_scope(&self) -> Option<Scope> {
        CURRENT_SCOPE.with_borrow_mut(|slot| {
            match live_scope(slot).as_mut()?.exit() {
                ScopeExit::Nested => None,
                ScopeExit::Outermost => slot.take(),
            }
        })
    }

    fn with_scope<R>(&self, f: impl FnOnce(&mut Scope) -> R) -> Option<R> {
        CURRENT_SCOPE.with_borrow_mut(|slot| live_scope(slot).as_mut().map(f))
    }
}

/// Reports an issue to the calling thread's scope.
///
/// See [`ScopeContext::report`].
pub fn report(
    source: impl IntoIssueSource,
    message: impl Into<Cow<'static, str>>,
    severity: Severity,
) -> Result<(), NoScopeOpen> {
    CurrentThread.report(source, message, severity)
}

/// Reports a warning to the calling thread's scope.
///
/// # Examples
///
/// ```rust
/// issuescope::run_collecting(|| {
///     issuescope::warning("config", "unused key").unwrap();
/// });
/// ```
pub fn warning(
    source: impl IntoIssueSource,
    message: impl Into<Cow<'static, str>>,
) -> Result<(), NoScopeOpen> {
    CurrentThread.warning(source, message)
}

/// Reports a fatal issue to the calling thread's scope.
pub fn fatal(
    source: impl IntoIssueSource,
    message: impl Into<Cow<'static, str>>,
) -> Result<(), NoScopeOpen> {
    CurrentThread.fatal(source, message)
}

/// See [`ScopeContext::has_fatal_issues`].
pub fn has_fatal_issues() -> Result<bool, NoScopeOpen> {
    CurrentThread.has_fatal_issues()
}

/// See [`ScopeContext::list_issues`].
pub fn list_issues(since_mark: bool) -> Result<IssueSnapshot, NoScopeOpen> {
    CurrentThread.list_issues(since_mark)
}

/// See [`ScopeContext::mark`].
pub fn mark() -> Result<(), NoScopeOpen> {
    CurrentThread.mark()
}

/// See [`ScopeContext::unmark`].
pub fn unmark() -> Result<(), NoScopeOpen> {
    CurrentThread.unmark()
}

/// See [`ScopeContext::reset`].
///
/// # Examples
///
/// ```rust
/// issuescope::run_collecting(|| {
///     issuescope::mark().unwrap();
///     issuescope::fatal("parser", "speculative branch failed").unwrap();
///     issuescope::reset().unwrap();
///     assert!(!issuescope::has_fatal_issues().unwrap());
/// });
/// ```
pub fn reset() -> Result<(), NoScopeOpen> {
    CurrentThread.reset()
}

/// Runs `work` in a scope on the calling thread.
///
/// See [`ScopeContext::run_collecting`].
pub fn run_collecting<T>(work: impl FnOnce() -> T) -> T {
    CurrentThread.run_collecting(work)
}

/// Runs `work` in a scope on the calling thread, failing on fatal issues.
///
/// See [`ScopeContext::run_collecting_or_fail`].
pub fn run_collecting_or_fail<T>(work: impl FnOnce() -> T) -> Result<T, AggregateFailure> {
    CurrentThread.run_collecting_or_fail(work)
}

/// See [`ScopeContext::try_run_collecting`].
pub fn try_run_collecting<T, E>(work: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    CurrentThread.try_run_collecting(work)
}

/// See [`ScopeContext::try_run_collecting_or_fail`].
pub fn try_run_collecting_or_fail<T, E>(
    work: impl FnOnce() -> Result<T, E>,
) -> Result<T, RunError<E>> {
    CurrentThread.try_run_collecting_or_fail(work)
}
