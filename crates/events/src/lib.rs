//! Change events: envelopes and synchronous listeners.

pub mod envelope;
pub mod event;
pub mod listener;

pub use envelope::EventEnvelope;
pub use event::Event;
pub use listener::{ListenerId, Listeners};
