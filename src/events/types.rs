//! Event type definitions for audio triggers and session logs

use serde::{Deserialize, Serialize};

use crate::body::{EnemyKind, Shooter};
use crate::tuning::GameplayTuning;
use crate::world::ItemTier;

/// Which avatar an event concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Avatar {
    Player,
    Shadow,
}

impl std::fmt::Display for Avatar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Avatar::Player => write!(f, "P"),
            Avatar::Shadow => write!(f, "S"),
        }
    }
}

/// What a damaging hit landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    Enemy(EnemyKind),
    Avatar(Avatar),
}

/// Why an avatar lost health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCause {
    Bullet,
    Fall,
}

/// All events the simulation emits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Session started (once per log)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // RFC 3339
    },
    /// Tuning snapshot (logged after session start)
    Config(GameplayTuning),

    // === Flow Events ===
    LevelStart {
        level: u32,
        name: String,
    },
    LevelComplete {
        level: u32,
        score: u32,
    },
    Victory {
        score: u32,
    },
    GameOver {
        level: u32,
        score: u32,
    },
    Paused,
    Resumed,

    // === Avatar Events ===
    Jump {
        avatar: Avatar,
    },
    Shoot {
        shooter: Shooter,
    },
    ShadowCreated,
    ShadowDestroyed,

    // === Combat Events ===
    /// Damage landed (enemy hit by a permitted bullet, avatar hit or fell)
    Hit {
        target: HitTarget,
        cause: HitCause,
    },
    EnemyDefeated {
        kind: EnemyKind,
        points: u32,
    },
    ItemCollected {
        tier: ItemTier,
        by: Avatar,
        points: u32,
    },
}

impl GameEvent {
    /// Get the event type code for compact serialization
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SE",
            GameEvent::Config(_) => "CF",
            GameEvent::LevelStart { .. } => "LS",
            GameEvent::LevelComplete { .. } => "LC",
            GameEvent::Victory { .. } => "VI",
            GameEvent::GameOver { .. } => "GO",
            GameEvent::Paused => "PA",
            GameEvent::Resumed => "RE",
            GameEvent::Jump { .. } => "J",
            GameEvent::Shoot { .. } => "SH",
            GameEvent::ShadowCreated => "S+",
            GameEvent::ShadowDestroyed => "S-",
            GameEvent::Hit { .. } => "H",
            GameEvent::EnemyDefeated { .. } => "ED",
            GameEvent::ItemCollected { .. } => "IC",
        }
    }

    /// Named audio trigger, if this event has one
    pub fn audio_cue(&self) -> Option<&'static str> {
        match self {
            GameEvent::Jump { .. } => Some("jump"),
            GameEvent::Shoot { .. } => Some("shoot"),
            GameEvent::Hit { .. } => Some("hit"),
            GameEvent::EnemyDefeated { .. } => Some("enemy-defeated"),
            GameEvent::ItemCollected { .. } => Some("item-collected"),
            GameEvent::ShadowCreated => Some("shadow-created"),
            GameEvent::ShadowDestroyed => Some("shadow-destroyed"),
            GameEvent::LevelComplete { .. } => Some("level-complete"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_audio_cues() {
        let events = [
            GameEvent::Jump { avatar: Avatar::Player },
            GameEvent::Shoot { shooter: Shooter::Shadow },
            GameEvent::Hit {
                target: HitTarget::Avatar(Avatar::Player),
                cause: HitCause::Fall,
            },
            GameEvent::EnemyDefeated { kind: EnemyKind::Boss, points: 500 },
            GameEvent::ItemCollected { tier: ItemTier::Coin, by: Avatar::Shadow, points: 50 },
            GameEvent::ShadowCreated,
            GameEvent::ShadowDestroyed,
            GameEvent::LevelComplete { level: 1, score: 1150 },
        ];
        let cues: Vec<_> = events.iter().filter_map(|e| e.audio_cue()).collect();
        assert_eq!(cues.len(), 8);
        assert!(GameEvent::Paused.audio_cue().is_none());
    }
}
