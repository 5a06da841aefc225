//! Headless simulation runner
//!
//! Drives the plugin with a seeded random input generator for a fixed
//! number of steps and reports what happened.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;

use crate::actions::Direction;
use crate::ai::{ENEMY_PROFILES_FILE, EnemyProfiles};
use crate::events::EventBus;
use crate::input::StepInput;
use crate::levels::LevelDatabase;
use crate::plugin::SessionLog;
use crate::tuning::{self, GameplayTuning};
use crate::world::GameWorld;

use super::app_builder::HeadlessAppBuilder;
use super::config::{InputProfile, SimConfig, SimMode};
use super::metrics::{BatchSummary, RunResult, RunStats};
use super::parallel::{init_parallel, run_batch_parallel};

/// Seeded stand-in for a human at the keyboard
pub struct RandomInputDriver {
    rng: StdRng,
    profile: InputProfile,
    held: Option<Direction>,
}

impl RandomInputDriver {
    pub fn new(seed: u64, profile: InputProfile) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            profile,
            held: None,
        }
    }

    fn roll(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Input for the next step. Direction is held across steps and changes
    /// occasionally; the other buttons are rolled independently.
    pub fn next_input(&mut self) -> StepInput {
        if self.roll(self.profile.direction_change) {
            self.held = match self.rng.gen_range(0..3) {
                0 => None,
                1 => Some(Direction::Left),
                _ => Some(Direction::Right),
            };
        }
        StepInput {
            move_left: self.held == Some(Direction::Left),
            move_right: self.held == Some(Direction::Right),
            jump: self.roll(self.profile.jump),
            shoot: self.roll(self.profile.shoot),
            toggle_shadow: self.roll(self.profile.toggle_shadow),
            pause: self.roll(self.profile.pause),
            // A finished run restarts on its own
            restart: true,
        }
    }
}

/// Run one seeded simulation
pub fn run_once(
    config: &SimConfig,
    seed: u64,
    levels: &LevelDatabase,
    tuning: &GameplayTuning,
    builder: HeadlessAppBuilder,
) -> Result<RunResult, String> {
    let mut app = builder
        .with_levels(levels.clone())
        .with_tuning(tuning.clone())
        .build();

    {
        let mut world = app
            .world_mut()
            .get_resource_mut::<GameWorld>()
            .ok_or("level configuration invalid, no world to simulate")?;
        if config.level > 1 {
            world
                .load_level(config.level as usize - 1)
                .map_err(|e| e.to_string())?;
        }
    }

    if config.events_dir.is_some() {
        let mut session = app.world_mut().resource_mut::<SessionLog>();
        session.enabled = true;
        let timestamp = chrono::Utc::now().to_rfc3339();
        session.buffer.start_session(&timestamp);
        session.buffer.log_config(tuning.clone());
    }

    let mut driver = RandomInputDriver::new(seed, config.input.clone());
    let mut stats = RunStats::new();
    let mut events = Vec::new();

    for _ in 0..config.frames {
        *app.world_mut().resource_mut::<StepInput>() = driver.next_input();
        app.world_mut().run_schedule(FixedUpdate);

        let bus = app.world().resource::<EventBus>();
        for event in bus.processed() {
            stats.record(&event.event);
        }
        events.extend(bus.processed().iter().cloned());
    }

    let events_log = match &config.events_dir {
        Some(dir) => Some(write_event_log(&app, dir, seed)?),
        None => None,
    };

    let world = app.world().resource::<GameWorld>();
    Ok(RunResult {
        seed,
        frames: world.frame(),
        final_level: world.level_number(),
        level_name: world.level_name().to_string(),
        final_state: format!("{:?}", world.state()),
        score: world.score.clone(),
        stats,
        events_log,
        events,
    })
}

fn write_event_log(app: &App, dir: &str, seed: u64) -> Result<String, String> {
    let session = app.world().resource::<SessionLog>();
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create {}: {}", dir, e))?;

    let path = PathBuf::from(dir).join(format!("run_{}_{}.evlog", seed, session.buffer.session_id()));
    fs::write(&path, session.buffer.serialize())
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    Ok(path.display().to_string())
}

/// Levels from the configured file, or the built-in campaign
pub fn load_levels(config: &SimConfig) -> Result<LevelDatabase, String> {
    match &config.levels_file {
        Some(path) => LevelDatabase::load_from_file(path).map_err(|e| e.to_string()),
        None => Ok(LevelDatabase::default_levels()),
    }
}

/// Tuning from the configured file, or the global tuning file with fallback
pub fn load_tuning(config: &SimConfig) -> Result<GameplayTuning, String> {
    match &config.tuning_file {
        Some(path) => tuning::load_gameplay_tuning_from_file(path),
        None => Ok(tuning::load_global_tuning()),
    }
}

/// Entry point for the `simulate` binary
pub fn run_simulation(config: SimConfig) -> Result<(), String> {
    let levels = load_levels(&config)?;
    let tuning = load_tuning(&config)?;
    let profiles = EnemyProfiles::load_from_file(ENEMY_PROFILES_FILE);
    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());

    let json = match config.mode {
        SimMode::Single => {
            if !config.quiet {
                println!("Running {} frames (seed: {})", config.frames, base_seed);
            }
            let builder = HeadlessAppBuilder::new().with_profiles(profiles);
            let builder = if config.quiet {
                builder
            } else {
                builder.with_logging()
            };
            let result = run_once(&config, base_seed, &levels, &tuning, builder)?;
            serde_json::to_string_pretty(&result)
        }
        SimMode::Batch { count } => {
            let seeds: Vec<u64> = (0..count as u64).map(|i| base_seed.wrapping_add(i)).collect();
            if !config.quiet {
                println!(
                    "Running {} runs of {} frames (base seed: {})",
                    count, config.frames, base_seed
                );
            }

            let results = if config.parallel > 0 {
                init_parallel(config.parallel)?;
                run_batch_parallel(&config, &seeds, &levels, &tuning, &profiles)
            } else {
                seeds
                    .iter()
                    .map(|&seed| {
                        let builder = HeadlessAppBuilder::new().with_profiles(profiles.clone());
                        run_once(&config, seed, &levels, &tuning, builder)
                    })
                    .collect()
            }?;

            let summary = BatchSummary::from_results(results);
            if !config.quiet {
                println!(
                    "Mean score {:.1}, best {} (seed {:?}), {} victories, {} game overs",
                    summary.mean_score,
                    summary.best_score,
                    summary.best_seed,
                    summary.victories,
                    summary.game_overs
                );
            }
            serde_json::to_string_pretty(&summary)
        }
    }
    .map_err(|e| format!("Failed to serialize results: {}", e))?;

    match &config.output_file {
        Some(path) => {
            fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path, e))?;
            if !config.quiet {
                println!("Results written to {}", path);
            }
        }
        None => println!("{}", json),
    }
    Ok(())
}
