//! Physics engine - gravity, friction, bounds and platform resolution
//!
//! One call to [`integrate`] advances a body by a single fixed step:
//! gravity, friction (ground or air), speed clamp, position advance,
//! horizontal bounds, platform resolution, then the bottom-edge rescue.

mod aabb;
mod collision;

pub use aabb::*;
pub use collision::*;

use bevy::prelude::*;

use crate::body::Body;
use crate::tuning::GameplayTuning;
use crate::world::Platform;

/// Per-step physics parameters, a narrowed view of [`GameplayTuning`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    pub gravity: f32,
    pub ground_friction: f32,
    pub air_friction: f32,
    pub playfield: Vec2,
    pub fall_damage: u32,
    pub bullet_margin: f32,
}

impl PhysicsParams {
    pub fn from_tuning(tuning: &GameplayTuning) -> Self {
        Self {
            gravity: tuning.gravity,
            ground_friction: tuning.ground_friction,
            air_friction: tuning.air_friction,
            playfield: tuning.playfield(),
            fall_damage: tuning.fall_damage,
            bullet_margin: tuning.bullet_margin,
        }
    }
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self::from_tuning(&GameplayTuning::default())
    }
}

/// What happened to a body during one integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Dropped past the bottom edge and was put back on it
    pub fell: bool,
    /// Fall damage applied (avatars only)
    pub damage: u32,
}

/// Advance a dynamic body by one step against the static platforms
pub fn integrate(
    body: &mut Body,
    platforms: &[Platform],
    params: &PhysicsParams,
    policy: &dyn CollisionPolicy,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    body.vel.y += params.gravity;

    // Friction uses last step's contact state
    body.vel.x *= if body.grounded {
        params.ground_friction
    } else {
        params.air_friction
    };
    body.vel.x = body.vel.x.clamp(-body.max_speed, body.max_speed);
    let moving = body.vel.x != 0.0;

    body.pos += body.vel;

    if body.pos.x < 0.0 {
        body.pos.x = 0.0;
        body.vel.x = 0.0;
    }
    if body.pos.x + body.size.x > params.playfield.x {
        body.pos.x = params.playfield.x - body.size.x;
        body.vel.x = 0.0;
    }

    body.grounded = false;
    for platform in platforms {
        if !body.aabb().overlaps(&platform.rect) {
            continue;
        }
        if policy.resolve(body, platform) == Contact::Landed {
            body.grounded = true;
        }
    }

    body.blocked = moving && body.vel.x == 0.0;

    if body.pos.y > params.playfield.y {
        body.pos.y = params.playfield.y - body.size.y;
        body.vel.y = 0.0;
        body.grounded = true;
        outcome.fell = true;
        if body.faction().is_avatar() {
            body.take_damage(params.fall_damage);
            outcome.damage = params.fall_damage;
        }
    }

    outcome
}

/// Bullets travel in a straight line and ignore gravity and platforms
pub fn advance_bullet(bullet: &mut Body) {
    bullet.pos += bullet.vel;
}

/// False once the bullet has left the playfield extended by the margin
pub fn bullet_in_bounds(bullet: &Body, params: &PhysicsParams) -> bool {
    let bounds = Aabb::new(Vec2::ZERO, params.playfield).expanded(params.bullet_margin);
    bullet.aabb().overlaps(&bounds)
}
