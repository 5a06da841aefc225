//! In-memory session log for simulations and tests.

use uuid::Uuid;

use super::bus::BusEvent;
use super::format::serialize_event;
use super::types::GameEvent;
use crate::tuning::GameplayTuning;

/// Simple in-memory event buffer (no file I/O).
#[derive(Default, Debug)]
pub struct EventBuffer {
    events: Vec<(u64, GameEvent)>,
    session_id: String,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session with a fresh UUID
    pub fn start_session(&mut self, timestamp: &str) {
        self.clear();
        self.session_id = Uuid::new_v4().to_string();
        self.log(0, GameEvent::SessionStart {
            session_id: self.session_id.clone(),
            timestamp: timestamp.to_string(),
        });
    }

    /// Log the tuning in effect for this session
    pub fn log_config(&mut self, tuning: GameplayTuning) {
        self.log(0, GameEvent::Config(tuning));
    }

    /// Get the current session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.session_id.clear();
    }

    pub fn log(&mut self, frame: u64, event: GameEvent) {
        self.events.push((frame, event));
    }

    pub fn events(&self) -> &[(u64, GameEvent)] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Import events from the bus
    pub fn import(&mut self, events: impl IntoIterator<Item = BusEvent>) {
        self.events
            .extend(events.into_iter().map(|e| (e.frame, e.event)));
    }

    /// Serialize all events to a log string
    pub fn serialize(&self) -> String {
        self.events
            .iter()
            .map(|(frame, e)| serialize_event(*frame, e))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::Avatar;

    #[test]
    fn test_session_starts_with_uuid() {
        let mut buffer = EventBuffer::new();
        buffer.start_session("2026-01-01T00:00:00Z");
        assert_eq!(buffer.session_id().len(), 36);
        assert_eq!(buffer.len(), 1);

        buffer.import(vec![BusEvent {
            frame: 5,
            event: GameEvent::Jump { avatar: Avatar::Player },
        }]);
        let text = buffer.serialize();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("F:000000|SE|"));
        assert_eq!(lines[1], "F:000005|J|P");
    }
}
