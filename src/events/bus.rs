//! Event Bus - frame-stamped queue between the simulation and its observers
//!
//! The simulation emits events while stepping. Audio and logging
//! collaborators read them afterwards; nothing they do feeds back into the
//! step.

use bevy::prelude::*;

use super::types::GameEvent;

/// Frame-stamped event
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    /// Simulation frame the event was emitted on
    pub frame: u64,
    /// The event data
    pub event: GameEvent,
}

/// Central event queue
#[derive(Resource, Default, Debug)]
pub struct EventBus {
    /// Events emitted and not yet consumed
    pending: Vec<BusEvent>,

    /// Events that have been consumed (for logging)
    processed: Vec<BusEvent>,

    /// Frame stamped onto newly emitted events
    frame: u64,

    /// Whether the bus is enabled (for testing/simulation)
    enabled: bool,
}

impl EventBus {
    /// Create a new enabled event bus
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Create a disabled event bus (events are dropped)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Set the frame used to stamp subsequent events
    pub fn set_frame(&mut self, frame: u64) {
        self.frame = frame;
    }

    /// Emit an event to the bus
    pub fn emit(&mut self, event: GameEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(BusEvent {
            frame: self.frame,
            event,
        });
    }

    /// Forward already-stamped events, keeping their frames
    pub fn forward(&mut self, events: impl IntoIterator<Item = BusEvent>) {
        if !self.enabled {
            return;
        }
        self.pending.extend(events);
    }

    /// Get pending events for consumption (does not drain)
    pub fn peek(&self) -> &[BusEvent] {
        &self.pending
    }

    /// Drain pending events, moving them to processed
    pub fn drain(&mut self) -> Vec<BusEvent> {
        let events = std::mem::take(&mut self.pending);
        self.processed.extend(events.iter().cloned());
        events
    }

    /// Take pending events without keeping a processed copy
    pub fn take(&mut self) -> Vec<BusEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Get all processed events (for logging)
    pub fn processed(&self) -> &[BusEvent] {
        &self.processed
    }

    /// Clear processed events (after logging)
    pub fn clear_processed(&mut self) {
        self.processed.clear();
    }

    /// Get the number of pending events
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check if the bus has any pending events
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Check if the bus is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the bus
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Frame currently used for stamping
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::Avatar;

    #[test]
    fn test_emit_and_drain() {
        let mut bus = EventBus::new();
        bus.set_frame(90);

        bus.emit(GameEvent::Jump {
            avatar: Avatar::Shadow,
        });

        assert_eq!(bus.pending_count(), 1);
        assert!(bus.has_pending());

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].frame, 90);
        assert_eq!(bus.pending_count(), 0);
        assert_eq!(bus.processed().len(), 1);
    }

    #[test]
    fn test_disabled_bus() {
        let mut bus = EventBus::disabled();
        bus.emit(GameEvent::ShadowCreated);
        bus.forward(vec![BusEvent {
            frame: 3,
            event: GameEvent::Paused,
        }]);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_forward_keeps_frames() {
        let mut source = EventBus::new();
        source.set_frame(12);
        source.emit(GameEvent::ShadowCreated);

        let mut sink = EventBus::new();
        sink.set_frame(99);
        sink.forward(source.take());
        assert_eq!(sink.peek()[0].frame, 12);
        assert!(source.processed().is_empty());
    }
}
