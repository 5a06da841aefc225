//! Tunable constants for shadowsplit
//!
//! All gameplay values are defined here for easy tweaking. Units are pixels and
//! simulation steps (one step = one fixed tick at 60 Hz). Y grows downward.

use bevy::prelude::*;

// =============================================================================
// PLAYFIELD
// =============================================================================

pub const PLAYFIELD_WIDTH: f32 = 1280.0;
pub const PLAYFIELD_HEIGHT: f32 = 720.0;
pub const BULLET_BOUNDS_MARGIN: f32 = 50.0; // Bullets survive this far past the edges

// =============================================================================
// SIZE CONSTANTS
// =============================================================================

pub const AVATAR_SIZE: Vec2 = Vec2::new(32.0, 48.0);
pub const ENEMY_SIZE: Vec2 = Vec2::new(28.0, 28.0);
pub const BOSS_SIZE: Vec2 = Vec2::new(40.0, 40.0);
pub const BULLET_SIZE: Vec2 = Vec2::new(6.0, 6.0);
pub const COLLECTIBLE_SIZE: Vec2 = Vec2::new(16.0, 16.0);

// =============================================================================
// PHYSICS CONSTANTS (per step)
// =============================================================================

pub const GRAVITY: f32 = 0.6;
pub const GROUND_FRICTION: f32 = 0.85; // vx multiplier while grounded
pub const AIR_FRICTION: f32 = 0.98; // vx multiplier while airborne
pub const MOVE_ACCEL: f32 = 0.8; // Impulse added per held move step
pub const AVATAR_MAX_SPEED: f32 = 8.0;
pub const JUMP_POWER: f32 = 16.0;

// =============================================================================
// COMBAT
// =============================================================================

pub const BULLET_SPEED: f32 = 12.0;
pub const AVATAR_SHOOT_COOLDOWN: u32 = 15;
pub const AVATAR_MAX_HEALTH: u32 = 100;
pub const FALL_DAMAGE: u32 = 25;
pub const ENEMY_BULLET_DAMAGE: u32 = 10;

// =============================================================================
// SCORING
// =============================================================================

pub const SCORE_ENEMY: u32 = 100;
pub const SCORE_BOSS: u32 = 500;
pub const SCORE_COIN: u32 = 50;
pub const SCORE_KEY: u32 = 200;
pub const LEVEL_COMPLETE_BONUS: u32 = 1000;

// =============================================================================
// SHADOW
// =============================================================================

pub const SHADOW_DELAY: u64 = 90; // 1.5 seconds at 60 Hz
pub const ACTION_LOG_CAPACITY: usize = 1000;

// =============================================================================
// ENEMIES
// =============================================================================

pub const ENEMY_AGGRO_RADIUS: f32 = 100.0;
pub const ENEMY_CHASE_SPEED: f32 = 1.5;
pub const ENEMY_PATROL_SPEED: f32 = 1.0;
pub const ENEMY_PATROL_DISTANCE: f32 = 100.0;
pub const ENEMY_SHOOT_COOLDOWN: u32 = 60;

pub const BOSS_AGGRO_RADIUS: f32 = 200.0;
pub const BOSS_FIRE_RADIUS: f32 = 150.0;
pub const BOSS_CHASE_SPEED: f32 = 3.0;
pub const BOSS_SWEEP_SPEED: f32 = 2.0;
pub const BOSS_SWEEP_RATE: f32 = 0.01; // Radians per step
pub const BOSS_SHOOT_COOLDOWN: u32 = 40;
pub const BOSS_HEALTH: u32 = 3;

// =============================================================================
// LEVEL FLOW
// =============================================================================

pub const LEVEL_TRANSITION_FRAMES: u32 = 180;
pub const PLAYER_SPAWN_X: f32 = 50.0;
pub const PLAYER_SPAWN_Y_FRACTION: f32 = 0.5;

// =============================================================================
// FILES
// =============================================================================

pub const LEVELS_FILE: &str = "assets/levels.txt";
