//! Explicitly keyed contexts.
//!
//! [`CurrentThread`](crate::CurrentThread) ties a scope to an OS thread. When
//! that is the wrong unit (tasks on a work-stealing executor, requests handled
//! by a thread pool, or no threads at all without `std`), a [`ScopeRegistry`]
//! holds one scope per caller-chosen key instead.

use core::{fmt, hash::Hash};
#[cfg(feature = "std")]
use std::sync as impl_;

use hashbrown::HashMap;
use issuescope_internals::{IssueLog, Scope, ScopeExit};
use rustc_hash::FxBuildHasher;
#[cfg(not(feature = "std"))]
use spin as impl_;

use crate::{
    context::ScopeContext,
    error::{AggregateFailure, NoScopeOpen},
    escalation,
};

/// One scope per context key.
///
/// The map only ever contains open scopes: an entry is created by the first
/// [`enter_scope`](Self::enter_scope) for a key and removed by the matching
/// outermost [`exit_scope`](Self::exit_scope). The internal lock is released
/// before escalation, hooks or user work run.
///
/// # Examples
///
/// ```rust
/// use issuescope::{ScopeContext, ScopeRegistry};
///
/// static REGISTRY: ScopeRegistry<u64> = ScopeRegistry::new();
///
/// let request = REGISTRY.context(7);
/// let result = request.run_collecting_or_fail(|| {
///     request.warning("headers", "duplicate header").unwrap();
///     "ok"
/// });
/// assert_eq!(result.unwrap(), "ok");
/// assert!(!REGISTRY.is_open(&7));
/// ```
pub struct ScopeRegistry<K> {
    scopes: impl_::Mutex<ScopeMap<K>>,
}

type ScopeMap<K> = HashMap<K, Scope, FxBuildHasher>;

impl<K> ScopeRegistry<K> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scopes: impl_::Mutex::new(HashMap::with_hasher(FxBuildHasher)),
        }
    }

    /// A panic inside a caller's closure poisons the std mutex; the map itself
    /// is never left half-updated, so the poison is ignored.
    fn lock(&self) -> impl_::MutexGuard<'_, ScopeMap<K>> {
        #[cfg(not(feature = "std"))]
        let guard = self.scopes.lock();

        #[cfg(feature = "std")]
        let guard = self
            .scopes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        guard
    }

    /// Number of keys with an open scope.
    #[must_use]
    pub fn open_contexts(&self) -> usize {
        self.lock().len()
    }
}

impl<K: Hash + Eq> ScopeRegistry<K> {
    /// The context for `key`, usable with every [`ScopeContext`] operation.
    pub fn context(&self, key: K) -> KeyedContext<'_, K>
    where
        K: Clone,
    {
        KeyedContext { registry: self, key }
    }

    /// Opens a scope level for `key`.
    pub fn enter_scope(&self, key: K) {
        self.lock()
            .entry(key)
            .or_insert_with(Scope::new)
            .enter();
    }

    /// Closes a scope level for `key`.
    ///
    /// When this closes the outermost level, the key's scope is removed and
    /// its issues are finalized with the given `escalate` flag. Closing a key
    /// with no open scope does nothing.
    pub fn exit_scope(&self, key: &K, escalate: bool) -> Option<AggregateFailure> {
        let scope = self.detach(key)?;
        escalation::finalize(scope.into_log(), escalate)
    }

    /// Runs `f` on the log of `key`'s open scope.
    ///
    /// `f` runs with the registry locked and must not call back into it.
    pub fn current_log<R>(
        &self,
        key: &K,
        f: impl FnOnce(&mut IssueLog) -> R,
    ) -> Result<R, NoScopeOpen> {
        self.with_scope(key, |scope| f(scope.log_mut()))
            .ok_or(NoScopeOpen)
    }

    /// Returns `true` if `key` has an open scope.
    #[must_use]
    pub fn is_open(&self, key: &K) -> bool {
        self.lock().get(key).is_some_and(Scope::is_open)
    }

    fn detach(&self, key: &K) -> Option<Scope> {
        let mut scopes = self.lock();
        match scopes.get_mut(key)?.exit() {
            ScopeExit::Nested => None,
            ScopeExit::Outermost => scopes.remove(key),
        }
    }

    fn with_scope<R>(&self, key: &K, f: impl FnOnce(&mut Scope) -> R) -> Option<R> {
        let mut scopes = self.lock();
        let scope = scopes.get_mut(key)?;
        if !scope.is_open() {
            scopes.remove(key);
            return None;
        }
        Some(f(scope))
    }
}

impl<K> Default for ScopeRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for ScopeRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeRegistry")
            .field("open_contexts", &self.open_contexts())
            .finish_non_exhaustive()
    }
}

/// The context of one key in a [`ScopeRegistry`].
#[derive(Clone, Debug)]
pub struct KeyedContext<'a, K> {
    registry: &'a ScopeRegistry<K>,
    key: K,
}

impl<K> KeyedContext<'_, K> {
    /// The key of this context.
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K: Hash + Eq + Clone> ScopeContext for KeyedContext<'_, K> {
    fn enter_scope(&self) {
        self.registry.enter_scope(self.key.clone());
    }

    fn exit_scope(&self) -> Option<Scope> {
        self.registry.detach(&self.key)
    }

    fn with_scope<R>(&self, f: impl FnOnce(&mut Scope) -> R) -> Option<R> {
        self.registry.with_scope(&self.key, f)
    }
}
