//! Scripted input injection for tests

use bevy::prelude::*;
use std::collections::HashMap;

use super::parser::FrameInput;
use crate::input::StepInput;

/// Resource holding scripted inputs for a test
#[derive(Resource, Default)]
pub struct ScriptedInputs {
    /// Map of frame -> input changes on that frame
    pub frames: HashMap<u64, FrameInput>,
    /// Held state (persists between frames)
    pub current: StepInput,
    /// Last frame handed out
    pub current_frame: u64,
    /// Maximum frame to run
    pub max_frame: u64,
}

impl ScriptedInputs {
    /// Create from parsed frame inputs
    pub fn from_inputs(inputs: &[FrameInput]) -> Self {
        let mut frames = HashMap::new();
        let mut max_frame = 0u64;

        for fi in inputs {
            max_frame = max_frame.max(fi.frame);
            frames.insert(fi.frame, fi.clone());
        }

        Self {
            frames,
            current: StepInput::default(),
            current_frame: 0,
            max_frame,
        }
    }

    /// Set max frame (for state assertions)
    pub fn set_max_frame(&mut self, frame: u64) {
        self.max_frame = self.max_frame.max(frame);
    }

    /// Input for the next frame. Frame numbers match the world's step count,
    /// so the first call returns the input for frame 1.
    pub fn advance_frame(&mut self) -> StepInput {
        self.current_frame += 1;
        self.current.clear_edges();
        if let Some(changes) = self.frames.get(&self.current_frame) {
            changes.apply(&mut self.current);
        }
        self.current
    }

    /// Check if simulation should continue
    pub fn should_continue(&self) -> bool {
        self.current_frame < self.max_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(frame: u64) -> FrameInput {
        FrameInput {
            frame,
            ..Default::default()
        }
    }

    #[test]
    fn test_held_buttons_persist_and_presses_do_not() {
        let mut scripted = ScriptedInputs::from_inputs(&[
            FrameInput {
                move_right: Some(true),
                toggle_shadow: true,
                ..at(2)
            },
            FrameInput {
                move_right: Some(false),
                ..at(4)
            },
        ]);

        assert_eq!(scripted.advance_frame(), StepInput::default());
        let f2 = scripted.advance_frame();
        assert!(f2.move_right && f2.toggle_shadow);
        let f3 = scripted.advance_frame();
        assert!(f3.move_right && !f3.toggle_shadow);
        let f4 = scripted.advance_frame();
        assert!(!f4.move_right);
        assert!(!scripted.should_continue());
    }
}
