#[cfg(feature = "std")]
use std::sync as impl_;

#[cfg(not(feature = "std"))]
use spin as impl_;

/// Global slot holding at most one installed hook.
///
/// Readers clone the hook out and release the lock before calling it, so a
/// hook may itself read or replace hooks without deadlocking.
#[repr(transparent)]
pub(crate) struct HookLock<T: 'static + Clone + Send + Sync>(impl_::RwLock<Option<T>>);

impl<T: 'static + Clone + Send + Sync> HookLock<T> {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self(impl_::RwLock::new(None))
    }

    /// Returns a clone of the installed hook, if any.
    #[inline]
    pub(crate) fn current(&'static self) -> Option<T> {
        #[cfg(not(feature = "std"))]
        let guard = self.0.read();

        #[cfg(feature = "std")]
        let guard = self.0.read().unwrap_or_else(std::sync::PoisonError::into_inner);

        guard.clone()
    }

    /// Installs `hook` (or clears the slot for `None`), returning the previous
    /// one.
    #[inline]
    pub(crate) fn replace(&'static self, hook: Option<T>) -> Option<T> {
        #[cfg(not(feature = "std"))]
        let mut guard = self.0.write();

        #[cfg(feature = "std")]
        let mut guard = self
            .0
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        core::mem::replace(&mut *guard, hook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn test_poisoned_slot_stays_usable() {
        static SLOT: HookLock<u32> = HookLock::new();
        SLOT.replace(Some(1));

        let poisoned = std::thread::spawn(|| {
            let _guard = SLOT.0.write();
            panic!("hook panicked");
        })
        .join();
        assert!(poisoned.is_err());
        assert!(SLOT.0.is_poisoned());

        assert_eq!(SLOT.current(), Some(1));
        assert_eq!(SLOT.replace(Some(2)), Some(1));
        assert_eq!(SLOT.replace(None), Some(2));
    }
}
