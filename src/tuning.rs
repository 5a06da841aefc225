//! Global gameplay tuning settings (decoupled from the simulation code)

use bevy::log::warn;
use bevy::prelude::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;

// Serde default functions so partial config files stay valid
fn default_gravity() -> f32 {
    GRAVITY
}
fn default_ground_friction() -> f32 {
    GROUND_FRICTION
}
fn default_air_friction() -> f32 {
    AIR_FRICTION
}
fn default_move_accel() -> f32 {
    MOVE_ACCEL
}
fn default_max_speed() -> f32 {
    AVATAR_MAX_SPEED
}
fn default_jump_power() -> f32 {
    JUMP_POWER
}
fn default_bullet_speed() -> f32 {
    BULLET_SPEED
}
fn default_bullet_margin() -> f32 {
    BULLET_BOUNDS_MARGIN
}
fn default_shoot_cooldown() -> u32 {
    AVATAR_SHOOT_COOLDOWN
}
fn default_fall_damage() -> u32 {
    FALL_DAMAGE
}
fn default_enemy_bullet_damage() -> u32 {
    ENEMY_BULLET_DAMAGE
}
fn default_shadow_delay() -> u64 {
    SHADOW_DELAY
}
fn default_log_capacity() -> usize {
    ACTION_LOG_CAPACITY
}
fn default_playfield_width() -> f32 {
    PLAYFIELD_WIDTH
}
fn default_playfield_height() -> f32 {
    PLAYFIELD_HEIGHT
}
fn default_transition_frames() -> u32 {
    LEVEL_TRANSITION_FRAMES
}
fn default_completion_bonus() -> u32 {
    LEVEL_COMPLETE_BONUS
}

/// Path to global gameplay tuning config
pub const GAMEPLAY_TUNING_FILE: &str = "config/gameplay_tuning.json";

/// Serializable tuning values stored in config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameplayTuning {
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_ground_friction")]
    pub ground_friction: f32,
    #[serde(default = "default_air_friction")]
    pub air_friction: f32,
    #[serde(default = "default_move_accel")]
    pub move_accel: f32,
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    #[serde(default = "default_jump_power")]
    pub jump_power: f32,
    #[serde(default = "default_bullet_speed")]
    pub bullet_speed: f32,
    #[serde(default = "default_bullet_margin")]
    pub bullet_margin: f32,
    #[serde(default = "default_shoot_cooldown")]
    pub shoot_cooldown: u32,
    #[serde(default = "default_fall_damage")]
    pub fall_damage: u32,
    #[serde(default = "default_enemy_bullet_damage")]
    pub enemy_bullet_damage: u32,
    /// Steps between a recorded action and its replay on the shadow
    #[serde(default = "default_shadow_delay")]
    pub shadow_delay: u64,
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
    #[serde(default = "default_playfield_width")]
    pub playfield_width: f32,
    #[serde(default = "default_playfield_height")]
    pub playfield_height: f32,
    #[serde(default = "default_transition_frames")]
    pub transition_frames: u32,
    #[serde(default = "default_completion_bonus")]
    pub completion_bonus: u32,
}

impl Default for GameplayTuning {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            ground_friction: default_ground_friction(),
            air_friction: default_air_friction(),
            move_accel: default_move_accel(),
            max_speed: default_max_speed(),
            jump_power: default_jump_power(),
            bullet_speed: default_bullet_speed(),
            bullet_margin: default_bullet_margin(),
            shoot_cooldown: default_shoot_cooldown(),
            fall_damage: default_fall_damage(),
            enemy_bullet_damage: default_enemy_bullet_damage(),
            shadow_delay: default_shadow_delay(),
            log_capacity: default_log_capacity(),
            playfield_width: default_playfield_width(),
            playfield_height: default_playfield_height(),
            transition_frames: default_transition_frames(),
            completion_bonus: default_completion_bonus(),
        }
    }
}

impl GameplayTuning {
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.playfield_width, self.playfield_height)
    }

    /// Clamp values that would break the simulation (zero-sized playfield,
    /// friction above 1, empty action log).
    pub fn sanitized(mut self) -> Self {
        self.playfield_width = self.playfield_width.max(AVATAR_SIZE.x * 2.0);
        self.playfield_height = self.playfield_height.max(AVATAR_SIZE.y * 2.0);
        self.ground_friction = self.ground_friction.clamp(0.0, 1.0);
        self.air_friction = self.air_friction.clamp(0.0, 1.0);
        self.max_speed = self.max_speed.abs();
        self.log_capacity = self.log_capacity.max(1);
        self
    }
}

pub fn load_gameplay_tuning_from_file(path: &str) -> Result<GameplayTuning, String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    serde_json::from_str::<GameplayTuning>(&contents)
        .map(GameplayTuning::sanitized)
        .map_err(|e| format!("Failed to parse {}: {}", path, e))
}

/// Load the global tuning file, falling back to built-in defaults
pub fn load_global_tuning() -> GameplayTuning {
    match load_gameplay_tuning_from_file(GAMEPLAY_TUNING_FILE) {
        Ok(tuning) => tuning,
        Err(err) => {
            warn!("{}, using default tuning", err);
            GameplayTuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let tuning: GameplayTuning = serde_json::from_str(r#"{ "shadow_delay": 30 }"#).unwrap();
        assert_eq!(tuning.shadow_delay, 30);
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.log_capacity, ACTION_LOG_CAPACITY);
    }

    #[test]
    fn test_sanitize_clamps_bad_values() {
        let tuning = GameplayTuning {
            ground_friction: 1.5,
            log_capacity: 0,
            playfield_width: 0.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.ground_friction, 1.0);
        assert_eq!(tuning.log_capacity, 1);
        assert!(tuning.playfield_width >= AVATAR_SIZE.x * 2.0);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let tuning = load_gameplay_tuning_from_file(GAMEPLAY_TUNING_FILE).unwrap();
        assert_eq!(tuning, GameplayTuning::default());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_gameplay_tuning_from_file("config/does_not_exist.json").is_err());
    }
}
