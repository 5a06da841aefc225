//! Combat resolver - bullet hits, pickups and level completion
//!
//! Runs after physics each step. Every function works on the world's body
//! lists directly and reports through the event bus.

use crate::ai::EnemyProfiles;
use crate::body::{Body, Faction, Shooter};
use crate::events::{Avatar, EventBus, GameEvent, HitCause, HitTarget};
use crate::physics::{PhysicsParams, bullet_in_bounds};
use crate::scoring::Score;
use crate::world::Collectible;

/// Drop bullets that have left the playfield (plus margin)
pub fn remove_stray_bullets(bullets: &mut Vec<Body>, params: &PhysicsParams) {
    bullets.retain(|b| bullet_in_bounds(b, params));
}

/// Resolve avatar bullets against enemies.
///
/// A bullet is consumed by the first live enemy it overlaps whether or not
/// the faction table lets it do damage. Enemy bullets pass through enemies.
pub fn resolve_enemy_hits(
    bullets: &mut Vec<Body>,
    enemies: &mut Vec<Body>,
    profiles: &EnemyProfiles,
    score: &mut Score,
    bus: &mut EventBus,
) {
    bullets.retain(|bullet| {
        let Faction::Bullet(shooter) = bullet.faction() else {
            return true;
        };
        if !shooter.is_avatar() {
            return true;
        }
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.is_alive() && e.overlaps(bullet))
        else {
            return true;
        };
        let Faction::Enemy(kind) = enemy.faction() else {
            return true;
        };

        if kind.vulnerable_to(shooter) {
            bus.emit(GameEvent::Hit {
                target: HitTarget::Enemy(kind),
                cause: HitCause::Bullet,
            });
            if enemy.take_damage(1) {
                let points = profiles.get(kind).points;
                score.enemy_defeated(points);
                bus.emit(GameEvent::EnemyDefeated { kind, points });
            }
        }
        false
    });

    enemies.retain(Body::is_alive);
}

/// Resolve enemy bullets against the avatars, player first
pub fn resolve_avatar_hits(
    bullets: &mut Vec<Body>,
    player: &mut Body,
    mut shadow: Option<&mut Body>,
    damage: u32,
    bus: &mut EventBus,
) {
    bullets.retain(|bullet| {
        let Faction::Bullet(Shooter::Enemy(_)) = bullet.faction() else {
            return true;
        };
        let victim = if player.overlaps(bullet) {
            Some((&mut *player, Avatar::Player))
        } else {
            match shadow.as_deref_mut() {
                Some(s) if s.overlaps(bullet) => Some((s, Avatar::Shadow)),
                _ => None,
            }
        };
        let Some((body, avatar)) = victim else {
            return true;
        };
        body.take_damage(damage);
        bus.emit(GameEvent::Hit {
            target: HitTarget::Avatar(avatar),
            cause: HitCause::Bullet,
        });
        false
    });
}

/// Award uncollected items touched by either avatar. Each item pays out once.
pub fn resolve_collectibles(
    collectibles: &mut [Collectible],
    player: &Body,
    shadow: Option<&Body>,
    score: &mut Score,
    bus: &mut EventBus,
) {
    for item in collectibles.iter_mut().filter(|c| !c.is_collected()) {
        let by = if player.aabb().overlaps(&item.rect) {
            Avatar::Player
        } else if shadow.is_some_and(|s| s.aabb().overlaps(&item.rect)) {
            Avatar::Shadow
        } else {
            continue;
        };
        if let Some(points) = item.collect() {
            score.item_collected(points);
            bus.emit(GameEvent::ItemCollected {
                tier: item.tier,
                by,
                points,
            });
        }
    }
}

/// All enemies gone and every item collected
pub fn level_cleared(enemies: &[Body], collectibles: &[Collectible]) -> bool {
    enemies.is_empty() && collectibles.iter().all(Collectible::is_collected)
}
