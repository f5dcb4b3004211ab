//! Ambient type-resolution context
//!
//! Each thread carries an optional ambient [`TypeResolver`] used when no
//! explicit resolver is supplied (see [`crate::reflection::load_type`]).
//! The slot is thread-local, so swapping it needs no synchronization.
//!
//! [`install`] swaps the slot and returns a [`ContextGuard`] that puts the
//! previous resolver back when dropped, including while unwinding from a
//! panic. [`with_boundary`] wraps one operation in such a guard.
//!
//! Installing different boundaries in nested scopes on one thread is not
//! supported; guards dropped in reverse order still restore correctly.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use pubind_domain::error::Result;
use pubind_domain::ports::TypeResolver;
use tracing::debug;

thread_local! {
    static AMBIENT_RESOLVER: RefCell<Option<Arc<dyn TypeResolver>>> = const { RefCell::new(None) };
}

/// The calling thread's ambient resolver
pub fn current() -> Option<Arc<dyn TypeResolver>> {
    AMBIENT_RESOLVER.with(|slot| slot.borrow().clone())
}

/// Restores the previously ambient resolver on drop.
///
/// Bound to the thread that created it.
#[must_use = "the previous context is restored as soon as the guard is dropped"]
pub struct ContextGuard {
    previous: Option<Arc<dyn TypeResolver>>,
    _thread_bound: PhantomData<*const ()>,
}

impl ContextGuard {
    /// The resolver that will be restored
    pub fn previous(&self) -> Option<&Arc<dyn TypeResolver>> {
        self.previous.as_ref()
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        // The slot is already gone if the thread is being torn down.
        let _ = AMBIENT_RESOLVER.try_with(|slot| {
            *slot.borrow_mut() = previous;
        });
        debug!("Restored ambient type resolver");
    }
}

/// Make `resolver` ambient until the returned guard is dropped
pub fn install(resolver: Arc<dyn TypeResolver>) -> ContextGuard {
    debug!(resolver = ?resolver, "Installing ambient type resolver");
    let previous = AMBIENT_RESOLVER.with(|slot| slot.replace(Some(resolver)));
    ContextGuard {
        previous,
        _thread_bound: PhantomData,
    }
}

/// Run `operation` with `resolver` as the ambient context.
///
/// The previous context is restored before this returns, whether
/// `operation` succeeds, fails, or panics.
pub fn with_boundary<T, F>(resolver: Arc<dyn TypeResolver>, operation: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let _guard = install(resolver);
    operation()
}
