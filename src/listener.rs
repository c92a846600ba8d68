//! Listener callables and the records the registry stores for them.
//!
//! Callbacks are stored as `Arc<dyn Fn(&A)>` handles. The handle doubles
//! as the listener's identity: removal matches by `Arc` pointer, so a
//! caller that wants to unregister later keeps a clone of the handle it
//! registered. Two handles wrapping the same closure source are still
//! distinct listeners.

use std::ptr;
use std::sync::Arc;

/// Closure type for event listeners.
pub type ListenerFn<A> = dyn Fn(&A) + Send + Sync;

/// A shared handle to a listener closure.
///
/// Cloning the handle does not duplicate the listener; registering the
/// same handle twice does.
pub type Callback<A> = Arc<ListenerFn<A>>;

/// Wrap a closure in a [`Callback`] handle.
///
/// ```
/// use pico_emit::{callback, Emitter};
///
/// let emitter: Emitter<u32> = Emitter::new();
/// let seen = callback(|n: &u32| println!("got {n}"));
/// emitter.on("data", seen.clone());
/// emitter.emit("data", &7);
/// emitter.remove_listener("data", &seen, false);
/// ```
pub fn callback<A, F>(f: F) -> Callback<A>
where
    F: Fn(&A) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Whether two handles refer to the same registered closure.
///
/// Compares the `Arc` data pointers only; vtable metadata is ignored
/// because it is not stable across codegen units. Every `Arc`
/// allocation has a distinct data address, zero-sized closures included.
pub(crate) fn same_callback<A>(a: &Callback<A>, b: &Callback<A>) -> bool {
    ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// One registered listener: the callback handle plus its one-shot flag.
/// Immutable after creation.
pub(crate) struct ListenerRecord<A> {
    pub(crate) callback: Callback<A>,
    pub(crate) once: bool,
}

impl<A> ListenerRecord<A> {
    pub(crate) fn new(callback: Callback<A>, once: bool) -> Self {
        Self { callback, once }
    }

    /// Removal filter: the handle must match, and when `once_only` is
    /// set the record must additionally be a one-shot registration.
    pub(crate) fn matches(&self, callback: &Callback<A>, once_only: bool) -> bool {
        same_callback(&self.callback, callback) && (!once_only || self.once)
    }
}
