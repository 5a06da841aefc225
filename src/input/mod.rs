//! Input module - the per-step logical input handed to the simulation
//!
//! Device capture and key mapping belong to the host; the core only sees
//! these flags.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actions::Direction;

/// Logical input for one simulation step.
///
/// `move_*`, `jump` and `shoot` are level-triggered (held state); the
/// recorder derives rising edges for jump and shoot itself. `toggle_shadow`,
/// `pause` and `restart` are edge-triggered and cleared after each step.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInput {
    #[serde(default)]
    pub move_left: bool,
    #[serde(default)]
    pub move_right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default)]
    pub shoot: bool,
    #[serde(default)]
    pub toggle_shadow: bool,
    #[serde(default)]
    pub pause: bool,
    #[serde(default)]
    pub restart: bool,
}

impl StepInput {
    /// Held direction; both or neither held means no movement intent
    pub fn move_dir(&self) -> Option<Direction> {
        match (self.move_left, self.move_right) {
            (true, false) => Some(Direction::Left),
            (false, true) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Clear the edge-triggered flags once a step has consumed them
    pub fn clear_edges(&mut self) {
        self.toggle_shadow = false;
        self.pause = false;
        self.restart = false;
    }
}
