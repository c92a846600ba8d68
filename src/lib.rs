//! pico-emit — a minimal synchronous pub/sub primitive.
//!
//! Callers register listeners against named events and later trigger
//! synchronous, in-order delivery to every listener, passing an
//! arbitrary argument payload. Delivery is direct and blocking on the
//! caller's own thread: no queueing, no deferred scheduling, no
//! background worker.
//!
//! ```
//! use pico_emit::{callback, Emitter};
//!
//! let emitter: Emitter<u32> = Emitter::new();
//! let handler = callback(|n: &u32| println!("tick {n}"));
//!
//! emitter.on("tick", handler.clone());
//! assert!(emitter.emit("tick", &1));
//!
//! emitter.remove_listener("tick", &handler, false);
//! assert!(!emitter.emit("tick", &2));
//! ```

pub mod emitter;
pub mod event;
pub mod listener;

mod registry;

pub use emitter::Emitter;
pub use event::{EventName, Token};
pub use listener::{callback, Callback, ListenerFn};

/// Conventional name for [`Emitter`], so the type can be imported under
/// either name from the crate root.
pub type EventEmitter<A = ()> = Emitter<A>;
