//! Shadowsplit - a 2D platformer core where a shadow avatar replays the
//! player's own actions a fixed number of frames later
//!
//! The simulation is a single [`GameWorld`] stepped at a fixed rate. Bevy
//! hosts drive it through [`ShadowSplitPlugin`]; the headless tools in
//! [`simulation`] and [`testing`] drive the same plugin without rendering.

// Core modules
pub mod constants;
pub mod error;
pub mod events;
pub mod plugin;
pub mod simulation;
pub mod snapshot;
pub mod testing;
pub mod tuning;

// Game logic modules
pub mod actions;
pub mod ai;
pub mod body;
pub mod combat;
pub mod input;
pub mod levels;
pub mod physics;
pub mod scoring;
pub mod shadow;
pub mod world;

// Re-export commonly used types for convenience
pub use actions::{
    ActionEffect, ActionKind, ActionLog, ActionRecord, ActionRecorder, AvatarParams, Direction,
    apply_action,
};
pub use ai::{AiTarget, ENEMY_PROFILES_FILE, EnemyIntent, EnemyProfile, EnemyProfiles, update_enemy};
pub use body::{Body, EnemyKind, Faction, Shooter};
pub use constants::*;
pub use error::LevelConfigError;
pub use events::{
    Avatar, BusEvent, EventBuffer, EventBus, GameEvent, HitCause, HitTarget, serialize_event,
};
pub use input::StepInput;
pub use levels::{LevelData, LevelDatabase, PlatformDef};
pub use physics::{
    Aabb, CollisionPolicy, Contact, MinimumTranslationPolicy, PhysicsParams, VelocityAxisPolicy,
    integrate,
};
pub use plugin::{SessionLog, ShadowSplitPlugin};
pub use scoring::Score;
pub use shadow::{Shadow, ShadowReplayEngine};
pub use snapshot::{SnapshotConfig, WorldSnapshot};
pub use tuning::GameplayTuning;
pub use world::{Collectible, GameState, GameWorld, ItemTier, Platform};
