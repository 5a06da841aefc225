//! Level spawning - scale normalized level data into world geometry

use bevy::prelude::*;

use super::LevelData;
use crate::ai::EnemyProfiles;
use crate::body::Body;
use crate::constants::*;
use crate::world::{Collectible, Platform};

/// Everything a level contributes to a fresh world, in pixels
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Body>,
    pub collectibles: Vec<Collectible>,
    pub player_spawn: Vec2,
}

/// Scale a level to the playfield and build its bodies
pub fn build_layout(level: &LevelData, playfield: Vec2, profiles: &EnemyProfiles) -> LevelLayout {
    let scale = |x: f32, y: f32| Vec2::new(x * playfield.x, y * playfield.y);

    let platforms = level
        .platforms
        .iter()
        .map(|p| Platform::new(scale(p.x, p.y), scale(p.width, p.height)))
        .collect();

    let enemies = level
        .enemies
        .iter()
        .map(|e| Body::enemy(e.kind, scale(e.x, e.y), profiles.get(e.kind)))
        .collect();

    let collectibles = level
        .items
        .iter()
        .map(|i| Collectible::new(scale(i.x, i.y), i.tier))
        .collect();

    LevelLayout {
        platforms,
        enemies,
        collectibles,
        player_spawn: Vec2::new(PLAYER_SPAWN_X, playfield.y * PLAYER_SPAWN_Y_FRACTION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{EnemyKind, Faction};
    use crate::levels::LevelDatabase;

    #[test]
    fn test_layout_scales_to_playfield() {
        let db = LevelDatabase::default_levels();
        let playfield = Vec2::new(1000.0, 500.0);
        let layout = build_layout(db.get(0).unwrap(), playfield, &EnemyProfiles::default());

        assert_eq!(layout.platforms.len(), 4);
        let ground = layout.platforms[0].rect;
        assert_eq!(ground.min, Vec2::new(0.0, 0.85 * 500.0));
        assert_eq!(ground.size, Vec2::new(1000.0, 0.15 * 500.0));
        assert_eq!(layout.enemies[0].pos, Vec2::new(0.25 * 1000.0, 0.6 * 500.0));
        assert_eq!(layout.collectibles.len(), 2);
        assert_eq!(layout.player_spawn, Vec2::new(PLAYER_SPAWN_X, 250.0));
    }

    #[test]
    fn test_boss_uses_boss_profile() {
        let db = LevelDatabase::default_levels();
        let layout = build_layout(
            db.get(4).unwrap(),
            Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            &EnemyProfiles::default(),
        );
        let boss = layout
            .enemies
            .iter()
            .find(|e| e.faction() == Faction::Enemy(EnemyKind::Boss))
            .unwrap();
        assert_eq!(boss.health, BOSS_HEALTH);
        assert_eq!(boss.size, BOSS_SIZE);
    }
}
