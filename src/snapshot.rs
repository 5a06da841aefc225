//! Snapshot system - read-only captures of the world for renderers and debugging
//!
//! A [`WorldSnapshot`] is everything a renderer needs to draw one frame. The
//! trigger system below also writes them to disk as JSON when notable events
//! happen (level changes, game over, victory).

use bevy::prelude::*;
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::body::Body;
use crate::events::{BusEvent, GameEvent};
use crate::scoring::Score;
use crate::world::{Collectible, GameState, GameWorld};

/// Directory where snapshots are saved
pub const SNAPSHOT_DIR: &str = "snapshots";

/// Serializable view of the whole world after a step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub frame: u64,
    pub state: GameState,
    /// 1-based
    pub level: u32,
    pub level_name: String,
    pub score: Score,
    pub player_health_percent: f32,
    pub shadow_active: bool,
    pub bodies: Vec<BodySnapshot>,
    pub collectibles: Vec<CollectibleSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub faction: String,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub size: [f32; 2],
    pub health: u32,
    pub facing: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectibleSnapshot {
    pub tier: String,
    pub position: [f32; 2],
    pub collected: bool,
}

impl BodySnapshot {
    fn of(body: &Body) -> Self {
        Self {
            faction: body.faction().label(),
            position: body.pos.to_array(),
            velocity: body.vel.to_array(),
            size: body.size.to_array(),
            health: body.health,
            facing: body.facing,
        }
    }
}

impl CollectibleSnapshot {
    fn of(item: &Collectible) -> Self {
        Self {
            tier: item.tier.label().to_string(),
            position: item.rect.min.to_array(),
            collected: item.is_collected(),
        }
    }
}

impl WorldSnapshot {
    /// Bodies are listed player, shadow, enemies, bullets
    pub fn capture(world: &GameWorld) -> Self {
        let mut bodies = Vec::with_capacity(2 + world.enemies.len() + world.bullets.len());
        bodies.push(BodySnapshot::of(&world.player));
        if let Some(shadow) = &world.shadow {
            bodies.push(BodySnapshot::of(&shadow.body));
        }
        bodies.extend(world.enemies.iter().map(BodySnapshot::of));
        bodies.extend(world.bullets.iter().map(BodySnapshot::of));

        Self {
            frame: world.frame(),
            state: world.state(),
            level: world.level_number(),
            level_name: world.level_name().to_string(),
            score: world.score.clone(),
            player_health_percent: world.player.health_percent(),
            shadow_active: world.shadow.is_some(),
            bodies,
            collectibles: world.collectibles.iter().map(CollectibleSnapshot::of).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize snapshot: {}", e))
    }
}

/// Configuration for what triggers snapshots on disk
#[derive(Resource, Debug, Clone)]
pub struct SnapshotConfig {
    /// Enable/disable the entire system
    pub enabled: bool,
    /// Capture when a level starts or completes
    pub on_level_change: bool,
    /// Capture on game over and victory
    pub on_run_end: bool,
    pub dir: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            on_level_change: true,
            on_run_end: true,
            dir: PathBuf::from(SNAPSHOT_DIR),
        }
    }
}

/// Name of the snapshot to take for this batch of events, if any.
/// The last matching event wins.
pub fn snapshot_trigger(config: &SnapshotConfig, events: &[BusEvent]) -> Option<String> {
    let mut trigger = None;
    for event in events {
        match &event.event {
            GameEvent::LevelStart { level, .. } if config.on_level_change => {
                trigger = Some(format!("level_start_{}", level));
            }
            GameEvent::LevelComplete { level, .. } if config.on_level_change => {
                trigger = Some(format!("level_complete_{}", level));
            }
            GameEvent::GameOver { .. } if config.on_run_end => {
                trigger = Some("game_over".to_string());
            }
            GameEvent::Victory { .. } if config.on_run_end => {
                trigger = Some("victory".to_string());
            }
            _ => {}
        }
    }
    trigger
}

/// Write `snapshot` as `<dir>/<timestamp>_<trigger>.json`
pub fn save_snapshot(
    snapshot: &WorldSnapshot,
    trigger: &str,
    dir: &PathBuf,
) -> Result<PathBuf, String> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create snapshot directory {}: {}", dir.display(), e))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S_%3f");
    let path = dir.join(format!("{}_{}.json", timestamp, trigger));
    let json = snapshot.to_json()?;
    fs::write(&path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::GameEvent;
    use crate::levels::LevelDatabase;
    use crate::tuning::GameplayTuning;

    fn world() -> GameWorld {
        GameWorld::new(LevelDatabase::default_levels(), GameplayTuning::default()).unwrap()
    }

    #[test]
    fn test_capture_lists_every_body() {
        let mut world = world();
        world.spawn_shadow();
        let snapshot = world.snapshot();

        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.level_name, "Basic Training");
        assert_eq!(snapshot.player_health_percent, 100.0);
        assert!(snapshot.shadow_active);
        assert_eq!(snapshot.bodies.len(), 2 + world.enemies.len());
        assert_eq!(snapshot.bodies[0].faction, "player");
        assert_eq!(snapshot.bodies[1].faction, "shadow");
        assert_eq!(snapshot.collectibles.len(), world.collectibles.len());
        assert!(snapshot.collectibles.iter().all(|c| !c.collected));
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = world().snapshot().to_json().unwrap();
        assert!(json.contains("\"level_name\": \"Basic Training\""));
        assert!(json.contains("\"state\": \"Playing\""));
    }

    #[test]
    fn test_trigger_follows_config() {
        let events = vec![
            BusEvent {
                frame: 3,
                event: GameEvent::Paused,
            },
            BusEvent {
                frame: 4,
                event: GameEvent::GameOver { level: 2, score: 10 },
            },
        ];
        let config = SnapshotConfig::default();
        assert_eq!(snapshot_trigger(&config, &events), Some("game_over".to_string()));

        let config = SnapshotConfig {
            on_run_end: false,
            ..default()
        };
        assert_eq!(snapshot_trigger(&config, &events), None);
    }
}
