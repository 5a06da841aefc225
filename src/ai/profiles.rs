//! Enemy profiles - per-kind behavior parameters
//!
//! Built-in defaults match the shipped game; `assets/enemy_profiles.txt` may
//! override any field per kind.

use bevy::prelude::*;
use std::fs;

use crate::body::EnemyKind;
use crate::constants::*;

/// Path to enemy profiles file
pub const ENEMY_PROFILES_FILE: &str = "assets/enemy_profiles.txt";

/// What an enemy does when no avatar is within aggro range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolStyle {
    /// Walk back and forth around the spawn point
    Oscillate,
    /// Sinusoidal sweep driven by the frame counter
    Sweep,
}

/// Behavior parameters for one enemy kind
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyProfile {
    pub aggro_radius: f32,
    /// None = never fires
    pub fire_radius: Option<f32>,
    pub chase_speed: f32,
    pub patrol: PatrolStyle,
    pub patrol_speed: f32,
    pub patrol_distance: f32,
    pub sweep_speed: f32,
    /// Radians per frame
    pub sweep_rate: f32,
    pub shoot_cooldown: u32,
    pub health: u32,
    pub size: Vec2,
    pub points: u32,
}

impl EnemyProfile {
    pub fn normal() -> Self {
        Self {
            aggro_radius: ENEMY_AGGRO_RADIUS,
            fire_radius: None,
            chase_speed: ENEMY_CHASE_SPEED,
            patrol: PatrolStyle::Oscillate,
            patrol_speed: ENEMY_PATROL_SPEED,
            patrol_distance: ENEMY_PATROL_DISTANCE,
            sweep_speed: 0.0,
            sweep_rate: 0.0,
            shoot_cooldown: ENEMY_SHOOT_COOLDOWN,
            health: 1,
            size: ENEMY_SIZE,
            points: SCORE_ENEMY,
        }
    }

    pub fn boss() -> Self {
        Self {
            aggro_radius: BOSS_AGGRO_RADIUS,
            fire_radius: Some(BOSS_FIRE_RADIUS),
            chase_speed: BOSS_CHASE_SPEED,
            patrol: PatrolStyle::Sweep,
            patrol_speed: 0.0,
            patrol_distance: 0.0,
            sweep_speed: BOSS_SWEEP_SPEED,
            sweep_rate: BOSS_SWEEP_RATE,
            shoot_cooldown: BOSS_SHOOT_COOLDOWN,
            health: BOSS_HEALTH,
            size: BOSS_SIZE,
            points: SCORE_BOSS,
        }
    }

    /// Speed bound handed to the physics step
    pub fn max_speed(&self) -> f32 {
        self.chase_speed
            .max(self.patrol_speed)
            .max(self.sweep_speed)
            .abs()
    }
}

/// Profiles for every enemy kind
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EnemyProfiles {
    pub normal: EnemyProfile,
    pub shadow_kind: EnemyProfile,
    pub boss: EnemyProfile,
}

impl Default for EnemyProfiles {
    fn default() -> Self {
        Self {
            normal: EnemyProfile::normal(),
            shadow_kind: EnemyProfile::normal(),
            boss: EnemyProfile::boss(),
        }
    }
}

impl EnemyProfiles {
    pub fn get(&self, kind: EnemyKind) -> &EnemyProfile {
        match kind {
            EnemyKind::Normal => &self.normal,
            EnemyKind::ShadowKind => &self.shadow_kind,
            EnemyKind::Boss => &self.boss,
        }
    }

    fn get_mut(&mut self, kind: EnemyKind) -> &mut EnemyProfile {
        match kind {
            EnemyKind::Normal => &mut self.normal,
            EnemyKind::ShadowKind => &mut self.shadow_kind,
            EnemyKind::Boss => &mut self.boss,
        }
    }

    /// Load overrides from file, or return defaults if it doesn't exist
    pub fn load_from_file(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => {
                let profiles = Self::parse(&content);
                info!("Loaded enemy profiles from {}", path);
                profiles
            }
            Err(e) => {
                debug!("No enemy profiles at {} ({}), using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Parse `enemy: <kind>` sections of `key: value` lines on top of the
    /// defaults. Unknown kinds, keys and unparsable values are skipped.
    pub fn parse(content: &str) -> Self {
        let mut profiles = Self::default();
        let mut current: Option<EnemyKind> = None;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix("enemy:") {
                current = EnemyKind::from_name(name);
                if current.is_none() {
                    warn!("Unknown enemy kind '{}' in profiles, skipping section", name.trim());
                }
                continue;
            }

            let Some(kind) = current else {
                continue;
            };
            let profile = profiles.get_mut(kind);

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "aggro_radius" => set_f32(&mut profile.aggro_radius, value),
                "fire_radius" => {
                    if value.eq_ignore_ascii_case("none") {
                        profile.fire_radius = None;
                    } else if let Ok(v) = value.parse() {
                        profile.fire_radius = Some(v);
                    }
                }
                "chase_speed" => set_f32(&mut profile.chase_speed, value),
                "patrol" => match value {
                    "oscillate" => profile.patrol = PatrolStyle::Oscillate,
                    "sweep" => profile.patrol = PatrolStyle::Sweep,
                    _ => {}
                },
                "patrol_speed" => set_f32(&mut profile.patrol_speed, value),
                "patrol_distance" => set_f32(&mut profile.patrol_distance, value),
                "sweep_speed" => set_f32(&mut profile.sweep_speed, value),
                "sweep_rate" => set_f32(&mut profile.sweep_rate, value),
                "shoot_cooldown" => {
                    if let Ok(v) = value.parse() {
                        profile.shoot_cooldown = v;
                    }
                }
                "health" => {
                    if let Ok(v) = value.parse::<u32>() {
                        profile.health = v.max(1);
                    }
                }
                "size" => {
                    if let Ok(v) = value.parse::<f32>() {
                        profile.size = Vec2::splat(v);
                    }
                }
                "points" => {
                    if let Ok(v) = value.parse() {
                        profile.points = v;
                    }
                }
                other => debug!("Unknown enemy profile key '{}'", other),
            }
        }

        profiles
    }
}

fn set_f32(field: &mut f32, value: &str) {
    if let Ok(v) = value.parse::<f32>() {
        *field = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_game() {
        let profiles = EnemyProfiles::default();
        assert_eq!(profiles.get(EnemyKind::Normal).aggro_radius, 100.0);
        assert_eq!(profiles.get(EnemyKind::ShadowKind).fire_radius, None);
        assert_eq!(profiles.get(EnemyKind::Boss).fire_radius, Some(150.0));
        assert_eq!(profiles.get(EnemyKind::Boss).health, 3);
        assert_eq!(profiles.get(EnemyKind::Boss).points, 500);
    }

    #[test]
    fn test_shipped_profiles_match_defaults() {
        assert_eq!(EnemyProfiles::load_from_file(ENEMY_PROFILES_FILE), EnemyProfiles::default());
    }

    #[test]
    fn test_parse_overrides_single_kind() {
        let profiles = EnemyProfiles::parse(
            "# harder shadow-kind\n\
             enemy: shadow\n\
             aggro_radius: 180\n\
             fire_radius: 90\n\
             size: 32\n\
             enemy: dragon\n\
             health: 9\n",
        );
        let shadow = profiles.get(EnemyKind::ShadowKind);
        assert_eq!(shadow.aggro_radius, 180.0);
        assert_eq!(shadow.fire_radius, Some(90.0));
        assert_eq!(shadow.size, Vec2::new(32.0, 32.0));
        assert_eq!(profiles.normal, EnemyProfile::normal());
        assert_eq!(profiles.boss, EnemyProfile::boss());
    }
}
