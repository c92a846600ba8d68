//! [`Emitter<A>`] — the public surface and the dispatch engine.
//!
//! # Threading and reentrancy
//!
//! All methods take `&self`; state lives behind a `parking_lot::Mutex`
//! that is **never held while a listener runs**. Listeners may therefore
//! call back into `on` / `off` / `emit` on the same emitter without
//! deadlocking, matching JS's naturally reentrant emitter semantics.
//!
//! # Dispatch semantics
//!
//! `emit` snapshots the listeners present when dispatch begins and
//! invokes exactly those, in registration order:
//!
//! - One-shot records are excised from the registry *before* any
//!   callback runs, so a `once` listener that re-emits its own event
//!   from inside its callback is never re-invoked.
//! - For everything else the snapshot is authoritative: a listener
//!   that removes a not-yet-invoked sibling mid-round does not stop
//!   that sibling from running this round; the removal shows up from
//!   the next emit on.
//!
//! Panics from listeners propagate to the `emit` caller and abort the
//! rest of the round — no isolation, no logging. The mutex does not
//! poison, so the emitter remains usable afterwards.

use parking_lot::Mutex;

use crate::event::EventName;
use crate::listener::Callback;
use crate::registry::{Registry, Snapshot};

/// A synchronous, name-keyed pub/sub primitive.
///
/// `A` is the argument payload delivered to listeners by shared
/// reference — a tuple, an enum, `serde_json::Value`, or the default
/// `()` for argument-less events. All events on one emitter share the
/// payload type; heterogeneous channels are an enum away.
///
/// ```
/// use pico_emit::{callback, Emitter};
///
/// let emitter: Emitter<(String, u64)> = Emitter::new();
/// emitter.on(
///     "upload",
///     callback(|(name, bytes): &(String, u64)| {
///         println!("{name}: {bytes} bytes");
///     }),
/// );
/// assert!(emitter.emit("upload", &("report.pdf".into(), 4096)));
/// assert!(!emitter.emit("download", &("nope".into(), 0)));
/// ```
pub struct Emitter<A = ()> {
    registry: Mutex<Registry<A>>,
}

impl<A> Emitter<A> {
    /// Create an emitter with no listeners.
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::new()),
        }
    }

    /// Register `callback` for `event`.
    ///
    /// Registration order is delivery order. The same handle may be
    /// registered more than once; each registration is invoked.
    pub fn on(&self, event: impl Into<EventName>, callback: Callback<A>) -> &Self {
        self.registry.lock().add(event.into(), callback, false);
        self
    }

    /// Register `callback` for a single delivery of `event`.
    ///
    /// The listener is removed from the registry immediately before its
    /// one invocation, so it is already gone from [`listeners`] (and
    /// from any nested emit) while it runs.
    ///
    /// [`listeners`]: Emitter::listeners
    pub fn once(&self, event: impl Into<EventName>, callback: Callback<A>) -> &Self {
        self.registry.lock().add(event.into(), callback, true);
        self
    }

    /// Alias for [`on`](Emitter::on).
    #[inline]
    pub fn add_listener(&self, event: impl Into<EventName>, callback: Callback<A>) -> &Self {
        self.on(event, callback)
    }

    /// Synchronously invoke every listener registered for `event`, in
    /// registration order, passing `args` to each.
    ///
    /// Returns `false` when no listener was registered — the only
    /// signal callers get that nothing ran. Returns `true` whenever at
    /// least one listener was present, even if one of them panicked
    /// (the panic still propagates; see the module docs for the full
    /// dispatch semantics).
    pub fn emit(&self, event: impl Into<EventName>, args: &A) -> bool {
        let name = event.into();
        let snapshot: Snapshot<A> = {
            let mut registry = self.registry.lock();
            let Some(entry) = registry.get_mut(&name) else {
                return false;
            };
            let snapshot = entry.snapshot();
            // One-shot records leave the registry before any callback
            // runs; a nested emit must already see them gone.
            if entry.excise_once() {
                registry.clear_event(&name);
            }
            snapshot
        };
        for callback in snapshot {
            callback(args);
        }
        true
    }

    /// The callback handles registered for `event`, in registration
    /// order.
    ///
    /// Always a fresh vector; mutating it has no effect on the emitter.
    pub fn listeners(&self, event: impl Into<EventName>) -> Vec<Callback<A>> {
        self.registry.lock().callbacks_of(&event.into())
    }

    /// Whether `event` currently has any listener. O(1), no copying.
    pub fn has_listeners(&self, event: impl Into<EventName>) -> bool {
        self.registry.lock().has(&event.into())
    }

    /// Remove every registration of `callback` for `event`.
    ///
    /// With `once_only` set, only one-shot registrations are removed
    /// and persistent ones stay. Unknown events and unmatched handles
    /// are silently ignored.
    pub fn remove_listener(
        &self,
        event: impl Into<EventName>,
        callback: &Callback<A>,
        once_only: bool,
    ) -> &Self {
        self.registry.lock().remove(&event.into(), callback, once_only);
        self
    }

    /// Alias for [`remove_listener`](Emitter::remove_listener).
    #[inline]
    pub fn off(
        &self,
        event: impl Into<EventName>,
        callback: &Callback<A>,
        once_only: bool,
    ) -> &Self {
        self.remove_listener(event, callback, once_only)
    }

    /// Remove every listener registered for `event`.
    pub fn remove_all_listeners(&self, event: impl Into<EventName>) -> &Self {
        self.registry.lock().clear_event(&event.into());
        self
    }

    /// Remove every listener for every event, in O(1).
    pub fn reset(&self) -> &Self {
        self.registry.lock().clear_all();
        self
    }

    /// Every event name with at least one listener: string names first
    /// in registration order, then tokens in theirs.
    pub fn event_names(&self) -> Vec<EventName> {
        self.registry.lock().names()
    }

    /// Number of distinct event names currently holding listeners.
    pub fn event_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Compatibility stub. This emitter imposes no listener limit and
    /// emits no warning; the call does nothing and returns `self` so
    /// chained call sites written against the wider conventional
    /// emitter contract keep working.
    pub fn set_max_listeners(&self, _limit: usize) -> &Self {
        self
    }
}

impl<A> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}
