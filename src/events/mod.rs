//! Game events - audio triggers, flow changes and session logs
//!
//! The simulation emits frame-stamped events onto an [`EventBus`]. Hosts
//! forward them to audio, and [`EventBuffer`] serializes a session to the
//! compact line format in [`format`].

mod buffer;
mod bus;
pub mod format;
mod types;

pub use buffer::EventBuffer;
pub use bus::{BusEvent, EventBus};
pub use format::serialize_event;
pub use types::{Avatar, GameEvent, HitCause, HitTarget};
