//! Turns per-step input into action records

use super::{ActionKind, ActionLog, ActionRecord};
use crate::input::StepInput;

/// Rising-edge detector for the discrete intents.
///
/// Move is recorded on every step a single direction is held. Jump and
/// shoot are recorded only on the step their button goes down.
#[derive(Debug, Clone, Default)]
pub struct ActionRecorder {
    jump_was_held: bool,
    shoot_was_held: bool,
}

impl ActionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append this step's intents to the log and return them in the order
    /// they were appended (move, jump, shoot)
    pub fn record(&mut self, input: &StepInput, frame: u64, log: &mut ActionLog) -> Vec<ActionKind> {
        let mut recorded = Vec::with_capacity(3);

        if let Some(dir) = input.move_dir() {
            recorded.push(ActionKind::Move(dir));
        }
        if input.jump && !self.jump_was_held {
            recorded.push(ActionKind::Jump);
        }
        if input.shoot && !self.shoot_was_held {
            recorded.push(ActionKind::Shoot);
        }

        self.jump_was_held = input.jump;
        self.shoot_was_held = input.shoot;

        for kind in &recorded {
            log.append(ActionRecord::new(*kind, frame));
        }
        recorded
    }

    /// Track held buttons on a step that records nothing, so a press made
    /// while the simulation is frozen is not taken as a new edge afterwards
    pub fn observe(&mut self, input: &StepInput) {
        self.jump_was_held = input.jump;
        self.shoot_was_held = input.shoot;
    }

    /// Forget held buttons so the next press counts as a fresh edge
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Direction;

    fn held(right: bool, jump: bool, shoot: bool) -> StepInput {
        StepInput {
            move_right: right,
            jump,
            shoot,
            ..Default::default()
        }
    }

    #[test]
    fn test_move_recorded_every_held_frame() {
        let mut recorder = ActionRecorder::new();
        let mut log = ActionLog::default();
        for frame in 1..=5 {
            recorder.record(&held(true, false, false), frame, &mut log);
        }
        assert_eq!(log.len(), 5);
        assert!(log.iter().all(|r| r.kind() == ActionKind::Move(Direction::Right)));
    }

    #[test]
    fn test_jump_and_shoot_only_on_rising_edge() {
        let mut recorder = ActionRecorder::new();
        let mut log = ActionLog::default();
        // Hold jump for 3 frames, release, press again
        let script = [
            held(false, true, true),
            held(false, true, true),
            held(false, true, false),
            held(false, false, false),
            held(false, true, true),
        ];
        for (i, input) in script.iter().enumerate() {
            recorder.record(input, i as u64 + 1, &mut log);
        }
        let jumps: Vec<u64> = log
            .iter()
            .filter(|r| r.kind() == ActionKind::Jump)
            .map(|r| r.frame())
            .collect();
        let shots: Vec<u64> = log
            .iter()
            .filter(|r| r.kind() == ActionKind::Shoot)
            .map(|r| r.frame())
            .collect();
        assert_eq!(jumps, vec![1, 5]);
        assert_eq!(shots, vec![1, 5]);
    }

    #[test]
    fn test_observed_steps_update_edge_state() {
        let mut recorder = ActionRecorder::new();
        let mut log = ActionLog::default();
        recorder.record(&held(false, true, false), 1, &mut log);

        // Released and pressed again without recording
        recorder.observe(&held(false, false, false));
        recorder.observe(&held(false, true, true));
        let recorded = recorder.record(&held(false, true, true), 4, &mut log);
        assert!(recorded.is_empty());

        recorder.observe(&held(false, false, false));
        let recorded = recorder.record(&held(false, true, true), 6, &mut log);
        assert_eq!(recorded, vec![ActionKind::Jump, ActionKind::Shoot]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_no_input_records_nothing() {
        let mut recorder = ActionRecorder::new();
        let mut log = ActionLog::default();
        let recorded = recorder.record(&StepInput::default(), 1, &mut log);
        assert!(recorded.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_records_stamped_with_current_frame() {
        let mut recorder = ActionRecorder::new();
        let mut log = ActionLog::default();
        recorder.record(&held(true, true, true), 42, &mut log);
        assert_eq!(log.len(), 3);
        assert!(log.iter().all(|r| r.frame() == 42));
    }
}
