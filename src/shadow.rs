//! Shadow replay - the second avatar acts out the player's own recorded
//! actions a fixed number of frames later

use bevy::prelude::*;

use crate::actions::{ActionKind, ActionLog, in_application_order};
use crate::body::{Body, Faction};
use crate::tuning::GameplayTuning;

/// Delayed-playback cursor over the shared [`ActionLog`].
///
/// Each step looks up the records produced exactly `delay` frames ago. A
/// frame is consumed at most once. Actions recorded on the creation step
/// itself are replayed; nothing before it ever is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowReplayEngine {
    delay: u64,
    created_at: u64,
    last_consumed_frame: u64,
}

impl ShadowReplayEngine {
    pub fn new(delay: u64, created_at: u64) -> Self {
        Self {
            delay,
            created_at,
            last_consumed_frame: created_at.saturating_sub(1),
        }
    }

    pub fn delay(&self) -> u64 {
        self.delay
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn last_consumed_frame(&self) -> u64 {
        self.last_consumed_frame
    }

    /// Actions due on `current_frame`, in move, jump, shoot order.
    ///
    /// Frames skipped between calls (while paused) are not caught up.
    pub fn due(&mut self, current_frame: u64, log: &ActionLog) -> Vec<ActionKind> {
        let Some(target) = current_frame.checked_sub(self.delay) else {
            return Vec::new();
        };
        if target <= self.last_consumed_frame {
            return Vec::new();
        }
        self.last_consumed_frame = target;
        in_application_order(log.query(target).map(|r| r.kind()).collect())
    }
}

/// Live shadow: its body plus its replay cursor
#[derive(Debug, Clone)]
pub struct Shadow {
    pub body: Body,
    replay: ShadowReplayEngine,
}

impl Shadow {
    /// Spawn on top of the player with full health
    pub fn spawn_at(player: &Body, frame: u64, tuning: &GameplayTuning) -> Self {
        let mut body = Body::avatar(Faction::Shadow, player.pos, tuning);
        body.facing = player.facing;
        Self {
            body,
            replay: ShadowReplayEngine::new(tuning.shadow_delay, frame),
        }
    }

    pub fn replay(&self) -> &ShadowReplayEngine {
        &self.replay
    }

    /// Actions the shadow should perform this step
    pub fn due_actions(&mut self, current_frame: u64, log: &ActionLog) -> Vec<ActionKind> {
        self.replay.due(current_frame, log)
    }

    pub fn position(&self) -> Vec2 {
        self.body.pos
    }
}
