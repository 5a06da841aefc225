//! Simulated bodies - avatars, enemies and bullets share one type

mod components;

pub use components::*;

use bevy::prelude::*;

use crate::ai::EnemyProfile;
use crate::constants::*;
use crate::physics::Aabb;
use crate::tuning::GameplayTuning;

/// Any simulated actor. Behavior dispatches on [`Faction`].
///
/// Position is the top-left corner; y grows downward.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    faction: Faction,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub health: u32,
    pub max_health: u32,
    /// Steps until the body may fire again
    pub shoot_cooldown: u32,
    /// -1.0 = left, 1.0 = right
    pub facing: f32,
    /// Bound on |vx| enforced by the physics step
    pub max_speed: f32,
    /// Horizontal anchor for enemy patrols
    pub home_x: f32,
    /// Horizontal motion was stopped by a wall or the playfield edge last step
    pub blocked: bool,
}

impl Body {
    pub fn new(faction: Faction, pos: Vec2, size: Vec2) -> Self {
        Self {
            faction,
            pos,
            vel: Vec2::ZERO,
            size,
            grounded: false,
            health: 1,
            max_health: 1,
            shoot_cooldown: 0,
            facing: 1.0,
            max_speed: f32::INFINITY,
            home_x: pos.x,
            blocked: false,
        }
    }

    /// Player or shadow avatar at full health
    pub fn avatar(faction: Faction, pos: Vec2, tuning: &GameplayTuning) -> Self {
        debug_assert!(faction.is_avatar());
        Self {
            health: AVATAR_MAX_HEALTH,
            max_health: AVATAR_MAX_HEALTH,
            max_speed: tuning.max_speed,
            ..Self::new(faction, pos, AVATAR_SIZE)
        }
    }

    pub fn enemy(kind: EnemyKind, pos: Vec2, profile: &EnemyProfile) -> Self {
        Self {
            health: profile.health,
            max_health: profile.health,
            max_speed: profile.max_speed(),
            ..Self::new(Faction::Enemy(kind), pos, profile.size)
        }
    }

    /// Bullet leaving the shooter's center in its facing direction.
    /// Returns None for bodies that cannot shoot.
    pub fn bullet_from(shooter: &Body, speed: f32) -> Option<Self> {
        let tag = shooter.faction.as_shooter()?;
        let mut bullet = Self::new(Faction::Bullet(tag), shooter.center(), BULLET_SIZE);
        bullet.vel = Vec2::new(shooter.facing * speed, 0.0);
        bullet.facing = shooter.facing;
        Some(bullet)
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn distance_to(&self, other: &Body) -> f32 {
        self.center().distance(other.center())
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.aabb().overlaps(&other.aabb())
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Saturating damage. Returns true if this hit brought health to zero.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    pub fn health_percent(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32 * 100.0
    }

    pub fn tick_cooldown(&mut self) {
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_inherits_shooter_faction() {
        let tuning = GameplayTuning::default();
        let mut shadow = Body::avatar(Faction::Shadow, Vec2::new(100.0, 200.0), &tuning);
        shadow.facing = -1.0;
        let bullet = Body::bullet_from(&shadow, 12.0).unwrap();
        assert_eq!(bullet.faction(), Faction::Bullet(Shooter::Shadow));
        assert_eq!(bullet.vel, Vec2::new(-12.0, 0.0));
        assert_eq!(bullet.pos, shadow.center());
    }

    #[test]
    fn test_bullets_cannot_shoot() {
        let bullet = Body::new(Faction::Bullet(Shooter::Player), Vec2::ZERO, BULLET_SIZE);
        assert!(Body::bullet_from(&bullet, 12.0).is_none());
    }

    #[test]
    fn test_take_damage_reports_death_once() {
        let mut body = Body::new(Faction::Enemy(EnemyKind::Boss), Vec2::ZERO, BOSS_SIZE);
        body.health = 2;
        assert!(!body.take_damage(1));
        assert!(body.take_damage(5));
        assert_eq!(body.health, 0);
        assert!(!body.take_damage(1));
    }
}
