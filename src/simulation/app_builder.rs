//! Headless App Builder
//!
//! Provides a reusable builder for creating headless Bevy apps for simulation.
//! Used by the simulation runner, scenario tests, and parallel execution.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::time::Duration;

use crate::ai::EnemyProfiles;
use crate::levels::LevelDatabase;
use crate::plugin::{STEP_HZ, ShadowSplitPlugin};
use crate::tuning::GameplayTuning;

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    levels: LevelDatabase,
    tuning: GameplayTuning,
    profiles: EnemyProfiles,
    minimal_threads: bool,
    logging: bool,
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    /// Built-in levels and default tuning
    pub fn new() -> Self {
        Self {
            levels: LevelDatabase::default_levels(),
            tuning: GameplayTuning::default(),
            profiles: EnemyProfiles::default(),
            minimal_threads: false,
            logging: false,
        }
    }

    pub fn with_levels(mut self, levels: LevelDatabase) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_tuning(mut self, tuning: GameplayTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_profiles(mut self, profiles: EnemyProfiles) -> Self {
        self.profiles = profiles;
        self
    }

    /// Enable minimal thread mode (task pools = 1)
    ///
    /// Use this when running many apps in parallel to avoid hitting OS thread limits.
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    /// Install `LogPlugin`. The global subscriber can only be set once per
    /// process, so parallel batches leave this off.
    pub fn with_logging(mut self) -> Self {
        self.logging = true;
        self
    }

    /// Build the app with minimal plugins and the game plugin.
    ///
    /// Callers drive it with `app.world_mut().run_schedule(FixedUpdate)` for
    /// exact step counts, or `app.update()` for wall-clock pacing.
    pub fn build(self) -> App {
        let mut app = App::new();
        let runner = ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / STEP_HZ));

        if self.minimal_threads {
            app.add_plugins(MinimalPlugins.set(runner).set(TaskPoolPlugin {
                task_pool_options: TaskPoolOptions::with_num_threads(1),
            }));
        } else {
            app.add_plugins(MinimalPlugins.set(runner));
        }

        if self.logging {
            app.add_plugins(LogPlugin::default());
        }

        app.add_plugins(
            ShadowSplitPlugin::new(self.levels, self.tuning).with_profiles(self.profiles),
        );
        app.finish();
        app.cleanup();
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use crate::input::StepInput;
    use crate::world::GameWorld;

    #[test]
    fn test_builder_creates_app() {
        let app = HeadlessAppBuilder::new().build();
        assert!(app.world().contains_resource::<GameWorld>());
        assert!(app.world().contains_resource::<StepInput>());
        assert!(app.world().contains_resource::<EventBus>());
    }

    #[test]
    fn test_minimal_threads_creates_app() {
        let app = HeadlessAppBuilder::new().with_minimal_threads().build();
        assert!(app.world().contains_resource::<GameWorld>());
    }

    #[test]
    fn test_custom_tuning_reaches_world() {
        let tuning = GameplayTuning {
            shadow_delay: 30,
            ..default()
        };
        let app = HeadlessAppBuilder::new().with_tuning(tuning).build();
        assert_eq!(app.world().resource::<GameWorld>().tuning().shadow_delay, 30);
    }
}
