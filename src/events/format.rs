//! Compact text format for game event serialization
//!
//! Format: `F:NNNNNN|CODE|data...`
//! - F:NNNNNN = simulation frame (6 digits, wraps at 999999)
//! - CODE = event type code
//! - data = pipe-separated values specific to event type (omitted if none)
//!
//! Examples:
//! ```text
//! F:000000|SE|6f1c...|2026-03-01T12:00:00+00:00
//! F:000001|LS|1|Basic Training
//! F:000040|S+
//! F:000131|SH|S
//! F:000133|H|E:shadowkind|B
//! F:000133|ED|shadowkind|100
//! F:000410|IC|coin|P|50
//! ```

use super::types::{GameEvent, HitCause, HitTarget};

/// Serialize a GameEvent to compact text format
pub fn serialize_event(frame: u64, event: &GameEvent) -> String {
    let stamp = format!("F:{:06}", frame % 1_000_000);
    let code = event.type_code();

    let data = match event {
        GameEvent::SessionStart {
            session_id,
            timestamp,
        } => Some(format!("{}|{}", session_id, timestamp)),
        // Config as compact JSON for easy parsing
        GameEvent::Config(tuning) => {
            Some(serde_json::to_string(tuning).unwrap_or_else(|_| "{}".to_string()))
        }
        GameEvent::LevelStart { level, name } => Some(format!("{}|{}", level, name)),
        GameEvent::LevelComplete { level, score } => Some(format!("{}|{}", level, score)),
        GameEvent::Victory { score } => Some(score.to_string()),
        GameEvent::GameOver { level, score } => Some(format!("{}|{}", level, score)),
        GameEvent::Paused
        | GameEvent::Resumed
        | GameEvent::ShadowCreated
        | GameEvent::ShadowDestroyed => None,
        GameEvent::Jump { avatar } => Some(avatar.to_string()),
        GameEvent::Shoot { shooter } => Some(shooter.code().to_string()),
        GameEvent::Hit { target, cause } => {
            let target = match target {
                HitTarget::Enemy(kind) => format!("E:{}", kind.label()),
                HitTarget::Avatar(avatar) => format!("A:{}", avatar),
            };
            let cause = match cause {
                HitCause::Bullet => "B",
                HitCause::Fall => "F",
            };
            Some(format!("{}|{}", target, cause))
        }
        GameEvent::EnemyDefeated { kind, points } => {
            Some(format!("{}|{}", kind.label(), points))
        }
        GameEvent::ItemCollected { tier, by, points } => {
            Some(format!("{}|{}|{}", tier.label(), by, points))
        }
    };

    match data {
        Some(data) => format!("{}|{}|{}", stamp, code, data),
        None => format!("{}|{}", stamp, code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{EnemyKind, Shooter};
    use crate::events::types::Avatar;
    use crate::world::ItemTier;

    #[test]
    fn test_serialize_level_start() {
        let line = serialize_event(
            1,
            &GameEvent::LevelStart {
                level: 1,
                name: "Basic Training".to_string(),
            },
        );
        assert_eq!(line, "F:000001|LS|1|Basic Training");
    }

    #[test]
    fn test_serialize_combat_events() {
        assert_eq!(
            serialize_event(
                133,
                &GameEvent::Hit {
                    target: HitTarget::Enemy(EnemyKind::ShadowKind),
                    cause: HitCause::Bullet,
                }
            ),
            "F:000133|H|E:shadowkind|B"
        );
        assert_eq!(
            serialize_event(
                410,
                &GameEvent::ItemCollected {
                    tier: ItemTier::Coin,
                    by: Avatar::Player,
                    points: 50,
                }
            ),
            "F:000410|IC|coin|P|50"
        );
        assert_eq!(
            serialize_event(7, &GameEvent::Shoot { shooter: Shooter::Enemy(EnemyKind::Boss) }),
            "F:000007|SH|EB"
        );
    }

    #[test]
    fn test_events_without_data() {
        assert_eq!(serialize_event(40, &GameEvent::ShadowCreated), "F:000040|S+");
        assert_eq!(serialize_event(1_000_041, &GameEvent::Paused), "F:000041|PA");
    }
}
