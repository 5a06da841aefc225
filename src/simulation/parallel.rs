//! Parallel simulation execution
//!
//! Uses Rayon to run multiple simulations concurrently.
//! Each simulation runs in its own Bevy app with minimal threading
//! to avoid hitting OS thread limits.

use rayon::prelude::*;

use crate::ai::EnemyProfiles;
use crate::levels::LevelDatabase;
use crate::tuning::GameplayTuning;

use super::app_builder::HeadlessAppBuilder;
use super::config::SimConfig;
use super::metrics::RunResult;
use super::runner::run_once;

/// Initialize the global Rayon pool with the given thread count.
/// Call this once at startup before running parallel simulations.
pub fn init_parallel(threads: usize) -> Result<(), String> {
    if threads == 0 {
        // Rayon's default (auto-detect)
        return Ok(());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| format!("Failed to initialize Rayon thread pool: {}", e))
}

/// Run one simulation per seed in parallel.
/// Results come back in seed order; the first failure aborts the batch.
pub fn run_batch_parallel(
    config: &SimConfig,
    seeds: &[u64],
    levels: &LevelDatabase,
    tuning: &GameplayTuning,
    profiles: &EnemyProfiles,
) -> Result<Vec<RunResult>, String> {
    seeds
        .par_iter()
        .map(|&seed| {
            run_once(
                config,
                seed,
                levels,
                tuning,
                HeadlessAppBuilder::new()
                    .with_profiles(profiles.clone())
                    .with_minimal_threads(),
            )
        })
        .collect()
}
