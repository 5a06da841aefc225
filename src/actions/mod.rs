//! Actions module - discrete avatar intents, their bounded log, and how an
//! avatar carries them out
//!
//! The player applies its intents the step they are recorded; the shadow
//! applies the same records after the replay delay. Both go through
//! [`apply_action`].

mod action_log;
mod recorder;

pub use action_log::*;
pub use recorder::*;

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::tuning::GameplayTuning;

/// Horizontal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Closed set of recordable intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move(Direction),
    Jump,
    Shoot,
}

impl ActionKind {
    /// Application order within one frame: move, then jump, then shoot
    pub fn order(self) -> u8 {
        match self {
            ActionKind::Move(_) => 0,
            ActionKind::Jump => 1,
            ActionKind::Shoot => 2,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ActionKind::Move(Direction::Left) => "ML",
            ActionKind::Move(Direction::Right) => "MR",
            ActionKind::Jump => "J",
            ActionKind::Shoot => "S",
        }
    }
}

/// Immutable log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    kind: ActionKind,
    frame: u64,
}

impl ActionRecord {
    pub fn new(kind: ActionKind, frame: u64) -> Self {
        Self { kind, frame }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Frame counter value when the record was appended
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Avatar control parameters, a narrowed view of [`GameplayTuning`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarParams {
    pub move_accel: f32,
    pub jump_power: f32,
    pub bullet_speed: f32,
    pub shoot_cooldown: u32,
}

impl AvatarParams {
    pub fn from_tuning(tuning: &GameplayTuning) -> Self {
        Self {
            move_accel: tuning.move_accel,
            jump_power: tuning.jump_power,
            bullet_speed: tuning.bullet_speed,
            shoot_cooldown: tuning.shoot_cooldown,
        }
    }
}

impl Default for AvatarParams {
    fn default() -> Self {
        Self::from_tuning(&GameplayTuning::default())
    }
}

/// Result of applying one action to an avatar
#[derive(Debug, Clone, PartialEq)]
pub enum ActionEffect {
    Moved,
    Jumped,
    Shot(Body),
    /// Jump while airborne or shoot during cooldown
    Blocked,
}

/// Carry out one action on an avatar body.
///
/// Move adds a signed impulse and turns the body; the physics step clamps the
/// resulting speed. Jump needs the body itself to be grounded. Shoot needs
/// the cooldown to have elapsed.
pub fn apply_action(body: &mut Body, kind: ActionKind, params: &AvatarParams) -> ActionEffect {
    match kind {
        ActionKind::Move(dir) => {
            body.vel.x += dir.sign() * params.move_accel;
            body.facing = dir.sign();
            ActionEffect::Moved
        }
        ActionKind::Jump => {
            if !body.grounded {
                return ActionEffect::Blocked;
            }
            body.vel.y = -params.jump_power;
            body.grounded = false;
            ActionEffect::Jumped
        }
        ActionKind::Shoot => {
            if body.shoot_cooldown > 0 {
                return ActionEffect::Blocked;
            }
            match Body::bullet_from(body, params.bullet_speed) {
                Some(bullet) => {
                    body.shoot_cooldown = params.shoot_cooldown;
                    ActionEffect::Shot(bullet)
                }
                None => ActionEffect::Blocked,
            }
        }
    }
}

/// Sort a frame's actions into application order, keeping insertion order
/// among equal kinds
pub fn in_application_order(mut actions: Vec<ActionKind>) -> Vec<ActionKind> {
    actions.sort_by_key(|a| a.order());
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Faction, Shooter};
    use bevy::prelude::*;

    fn shadow() -> Body {
        Body::avatar(Faction::Shadow, Vec2::new(200.0, 300.0), &GameplayTuning::default())
    }

    #[test]
    fn test_move_sets_impulse_and_facing() {
        let mut body = shadow();
        let params = AvatarParams::default();
        assert_eq!(
            apply_action(&mut body, ActionKind::Move(Direction::Left), &params),
            ActionEffect::Moved
        );
        assert_eq!(body.vel.x, -params.move_accel);
        assert_eq!(body.facing, -1.0);
    }

    #[test]
    fn test_jump_requires_grounded() {
        let mut body = shadow();
        let params = AvatarParams::default();
        assert_eq!(apply_action(&mut body, ActionKind::Jump, &params), ActionEffect::Blocked);
        assert_eq!(body.vel.y, 0.0);

        body.grounded = true;
        assert_eq!(apply_action(&mut body, ActionKind::Jump, &params), ActionEffect::Jumped);
        assert_eq!(body.vel.y, -params.jump_power);
        assert!(!body.grounded);
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let mut body = shadow();
        let params = AvatarParams::default();
        match apply_action(&mut body, ActionKind::Shoot, &params) {
            ActionEffect::Shot(bullet) => {
                assert_eq!(bullet.faction(), Faction::Bullet(Shooter::Shadow))
            }
            other => panic!("expected a shot, got {:?}", other),
        }
        assert_eq!(body.shoot_cooldown, params.shoot_cooldown);
        assert_eq!(apply_action(&mut body, ActionKind::Shoot, &params), ActionEffect::Blocked);
    }

    #[test]
    fn test_application_order() {
        let ordered = in_application_order(vec![
            ActionKind::Shoot,
            ActionKind::Jump,
            ActionKind::Move(Direction::Right),
        ]);
        assert_eq!(
            ordered,
            vec![ActionKind::Move(Direction::Right), ActionKind::Jump, ActionKind::Shoot]
        );
    }
}
