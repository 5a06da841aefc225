//! Enemy decision making - targeting, chase, patrol and firing

use bevy::prelude::*;

use super::{EnemyProfile, PatrolStyle};
use crate::body::Body;

/// Which avatar an enemy is reacting to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTarget {
    Player,
    Shadow,
}

/// Outcome of one enemy's decision for this step
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyIntent {
    /// Set when an avatar is within aggro range
    pub target: Option<AiTarget>,
    pub bullet: Option<Body>,
}

/// Nearest avatar by center distance. Ties go to the player.
pub fn nearest_avatar(enemy: &Body, player: &Body, shadow: Option<&Body>) -> (AiTarget, f32) {
    let to_player = enemy.distance_to(player);
    match shadow {
        Some(shadow) => {
            let to_shadow = enemy.distance_to(shadow);
            if to_shadow < to_player {
                (AiTarget::Shadow, to_shadow)
            } else {
                (AiTarget::Player, to_player)
            }
        }
        None => (AiTarget::Player, to_player),
    }
}

/// Set this step's velocity and facing for one enemy and fire if allowed.
///
/// Within aggro radius the enemy chases the nearer avatar horizontally; it
/// fires when that avatar is also inside the firing radius and the cooldown
/// has elapsed. Otherwise it patrols. The cooldown ticks down at the end.
pub fn update_enemy(
    enemy: &mut Body,
    player: &Body,
    shadow: Option<&Body>,
    frame: u64,
    profile: &EnemyProfile,
    bullet_speed: f32,
) -> EnemyIntent {
    let (target, distance) = nearest_avatar(enemy, player, shadow);
    let mut intent = EnemyIntent {
        target: None,
        bullet: None,
    };

    if distance < profile.aggro_radius {
        let target_x = match target {
            AiTarget::Shadow => shadow.map_or(player.center().x, |s| s.center().x),
            AiTarget::Player => player.center().x,
        };
        let dir = if target_x < enemy.center().x { -1.0 } else { 1.0 };
        enemy.vel.x = dir * profile.chase_speed;
        enemy.facing = dir;
        intent.target = Some(target);

        if let Some(fire_radius) = profile.fire_radius {
            if distance < fire_radius && enemy.shoot_cooldown == 0 {
                intent.bullet = Body::bullet_from(enemy, bullet_speed);
                enemy.shoot_cooldown = profile.shoot_cooldown;
            }
        }
    } else {
        match profile.patrol {
            PatrolStyle::Oscillate => {
                let offset = enemy.pos.x - enemy.home_x;
                if offset.abs() > profile.patrol_distance {
                    // Head back toward home
                    enemy.facing = -offset.signum();
                } else if enemy.blocked {
                    enemy.facing = -enemy.facing;
                }
                enemy.vel.x = enemy.facing * profile.patrol_speed;
            }
            PatrolStyle::Sweep => {
                let vx = (frame as f32 * profile.sweep_rate).sin() * profile.sweep_speed;
                enemy.vel.x = vx;
                if vx != 0.0 {
                    enemy.facing = vx.signum();
                }
            }
        }
    }

    enemy.tick_cooldown();
    intent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{EnemyKind, Faction, Shooter};
    use crate::tuning::GameplayTuning;

    fn avatar(faction: Faction, x: f32, y: f32) -> Body {
        Body::avatar(faction, Vec2::new(x, y), &GameplayTuning::default())
    }

    fn enemy(kind: EnemyKind, x: f32, y: f32, profile: &EnemyProfile) -> Body {
        Body::enemy(kind, Vec2::new(x, y), profile)
    }

    #[test]
    fn test_nearer_avatar_is_targeted() {
        let profile = EnemyProfile::normal();
        let mut e = enemy(EnemyKind::Normal, 500.0, 300.0, &profile);
        let player = avatar(Faction::Player, 580.0, 290.0);
        let shadow = avatar(Faction::Shadow, 440.0, 290.0);

        let intent = update_enemy(&mut e, &player, Some(&shadow), 1, &profile, 12.0);
        assert_eq!(intent.target, Some(AiTarget::Shadow));
        assert_eq!(e.facing, -1.0);
        assert_eq!(e.vel.x, -profile.chase_speed);
    }

    #[test]
    fn test_outside_aggro_patrols() {
        let profile = EnemyProfile::normal();
        let mut e = enemy(EnemyKind::Normal, 500.0, 300.0, &profile);
        let player = avatar(Faction::Player, 50.0, 300.0);

        let intent = update_enemy(&mut e, &player, None, 1, &profile, 12.0);
        assert_eq!(intent.target, None);
        assert_eq!(e.vel.x, profile.patrol_speed * e.facing);
    }

    #[test]
    fn test_patrol_turns_back_past_distance() {
        let profile = EnemyProfile::normal();
        let mut e = enemy(EnemyKind::Normal, 500.0, 300.0, &profile);
        e.pos.x = e.home_x + profile.patrol_distance + 1.0;
        e.facing = 1.0;
        let player = avatar(Faction::Player, 50.0, 300.0);

        update_enemy(&mut e, &player, None, 1, &profile, 12.0);
        assert_eq!(e.facing, -1.0);
        assert!(e.vel.x < 0.0);
    }

    #[test]
    fn test_patrol_reverses_when_blocked() {
        let profile = EnemyProfile::normal();
        let mut e = enemy(EnemyKind::Normal, 500.0, 300.0, &profile);
        e.pos.x = e.home_x + 10.0;
        e.facing = 1.0;
        e.blocked = true;
        let player = avatar(Faction::Player, 50.0, 300.0);

        update_enemy(&mut e, &player, None, 1, &profile, 12.0);
        assert_eq!(e.facing, -1.0);
        assert_eq!(e.vel.x, -profile.patrol_speed);

        // Unblocked inside the patrol range keeps heading
        e.blocked = false;
        update_enemy(&mut e, &player, None, 2, &profile, 12.0);
        assert_eq!(e.facing, -1.0);
    }

    #[test]
    fn test_normal_enemies_never_fire() {
        let profile = EnemyProfile::normal();
        let mut e = enemy(EnemyKind::Normal, 500.0, 300.0, &profile);
        let player = avatar(Faction::Player, 505.0, 290.0);
        for frame in 0..200 {
            let intent = update_enemy(&mut e, &player, None, frame, &profile, 12.0);
            assert!(intent.bullet.is_none());
        }
    }

    #[test]
    fn test_boss_fires_within_radius_and_respects_cooldown() {
        let profile = EnemyProfile::boss();
        let mut boss = enemy(EnemyKind::Boss, 500.0, 300.0, &profile);
        let player = avatar(Faction::Player, 400.0, 290.0);

        let intent = update_enemy(&mut boss, &player, None, 1, &profile, 12.0);
        let bullet = intent.bullet.expect("boss should fire");
        assert_eq!(bullet.faction(), Faction::Bullet(Shooter::Enemy(EnemyKind::Boss)));
        assert!(bullet.vel.x < 0.0);
        assert_eq!(boss.shoot_cooldown, profile.shoot_cooldown - 1);

        let mut shots = 1;
        for frame in 2..=(profile.shoot_cooldown as u64) {
            if update_enemy(&mut boss, &player, None, frame, &profile, 12.0).bullet.is_some() {
                shots += 1;
            }
        }
        assert_eq!(shots, 1);
        assert!(
            update_enemy(&mut boss, &player, None, 41, &profile, 12.0)
                .bullet
                .is_some()
        );
    }

    #[test]
    fn test_boss_sweeps_when_idle() {
        let profile = EnemyProfile::boss();
        let mut boss = enemy(EnemyKind::Boss, 900.0, 300.0, &profile);
        let player = avatar(Faction::Player, 50.0, 300.0);
        update_enemy(&mut boss, &player, None, 100, &profile, 12.0);
        let expected = (100.0f32 * profile.sweep_rate).sin() * profile.sweep_speed;
        assert!((boss.vel.x - expected).abs() < 1e-6);
    }
}
