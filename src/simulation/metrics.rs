//! Metrics collected from headless runs

use serde::Serialize;

use crate::events::{Avatar, BusEvent, GameEvent, HitTarget};
use crate::scoring::Score;

/// Event tallies for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub player_jumps: u32,
    pub shadow_jumps: u32,
    pub shots: u32,
    pub enemy_shots: u32,
    /// Hits taken by the player or shadow, from bullets or falls
    pub avatar_hits: u32,
    pub enemy_hits: u32,
    pub shadows_created: u32,
    pub shadows_destroyed: u32,
    pub pauses: u32,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Jump {
                avatar: Avatar::Player,
            } => self.player_jumps += 1,
            GameEvent::Jump {
                avatar: Avatar::Shadow,
            } => self.shadow_jumps += 1,
            GameEvent::Shoot { shooter } if shooter.is_avatar() => self.shots += 1,
            GameEvent::Shoot { .. } => self.enemy_shots += 1,
            GameEvent::Hit {
                target: HitTarget::Avatar(_),
                ..
            } => self.avatar_hits += 1,
            GameEvent::Hit {
                target: HitTarget::Enemy(_),
                ..
            } => self.enemy_hits += 1,
            GameEvent::ShadowCreated => self.shadows_created += 1,
            GameEvent::ShadowDestroyed => self.shadows_destroyed += 1,
            GameEvent::Paused => self.pauses += 1,
            _ => {}
        }
    }
}

/// Result of a single run
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub seed: u64,
    pub frames: u64,
    /// 1-based level the run ended on
    pub final_level: u32,
    pub level_name: String,
    /// Debug name of the final game state
    pub final_state: String,
    pub score: Score,
    pub stats: RunStats,
    /// Path of the compact event log, if one was written
    pub events_log: Option<String>,
    #[serde(skip)]
    pub events: Vec<BusEvent>,
}

/// Aggregate over a batch of runs
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub runs: usize,
    pub mean_score: f32,
    pub best_score: u32,
    pub best_seed: Option<u64>,
    pub victories: usize,
    pub game_overs: usize,
    pub mean_levels_completed: f32,
    pub results: Vec<RunResult>,
}

impl BatchSummary {
    pub fn from_results(results: Vec<RunResult>) -> Self {
        if results.is_empty() {
            return Self::default();
        }
        let runs = results.len();
        let total: u64 = results.iter().map(|r| r.score.total as u64).sum();
        let levels: u64 = results
            .iter()
            .map(|r| r.score.levels_completed as u64)
            .sum();
        let best = results.iter().max_by_key(|r| r.score.total);

        Self {
            runs,
            mean_score: total as f32 / runs as f32,
            best_score: best.map_or(0, |r| r.score.total),
            best_seed: best.map(|r| r.seed),
            victories: results.iter().filter(|r| r.final_state == "Victory").count(),
            game_overs: results.iter().filter(|r| r.final_state == "GameOver").count(),
            mean_levels_completed: levels as f32 / runs as f32,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{EnemyKind, Shooter};
    use crate::events::HitCause;

    fn result(seed: u64, total: u32, state: &str) -> RunResult {
        RunResult {
            seed,
            frames: 100,
            final_level: 1,
            level_name: "Basic Training".to_string(),
            final_state: state.to_string(),
            score: Score {
                total,
                ..Default::default()
            },
            stats: RunStats::new(),
            events_log: None,
            events: Vec::new(),
        }
    }

    #[test]
    fn test_stats_split_by_side() {
        let mut stats = RunStats::new();
        stats.record(&GameEvent::Shoot {
            shooter: Shooter::Shadow,
        });
        stats.record(&GameEvent::Shoot {
            shooter: Shooter::Enemy(EnemyKind::Boss),
        });
        stats.record(&GameEvent::Hit {
            target: HitTarget::Avatar(Avatar::Player),
            cause: HitCause::Fall,
        });
        stats.record(&GameEvent::Jump {
            avatar: Avatar::Shadow,
        });
        assert_eq!(stats.shots, 1);
        assert_eq!(stats.enemy_shots, 1);
        assert_eq!(stats.avatar_hits, 1);
        assert_eq!(stats.shadow_jumps, 1);
        assert_eq!(stats.player_jumps, 0);
    }

    #[test]
    fn test_summary_aggregates() {
        let summary = BatchSummary::from_results(vec![
            result(1, 100, "Playing"),
            result(2, 300, "GameOver"),
            result(3, 200, "Victory"),
        ]);
        assert_eq!(summary.runs, 3);
        assert_eq!(summary.mean_score, 200.0);
        assert_eq!(summary.best_score, 300);
        assert_eq!(summary.best_seed, Some(2));
        assert_eq!(summary.victories, 1);
        assert_eq!(summary.game_overs, 1);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(BatchSummary::from_results(Vec::new()).runs, 0);
    }
}
