//! Test execution engine

use bevy::prelude::*;

use crate::events::EventBus;
use crate::input::StepInput;
use crate::levels::{LevelData, LevelDatabase};
use crate::simulation::HeadlessAppBuilder;
use crate::tuning::GameplayTuning;
use crate::world::GameWorld;

use super::TEST_LEVELS_FILE;
use super::assertions::{
    AssertionError, CapturedEvent, WorldState, check_absent, check_sequence, check_state,
};
use super::input::ScriptedInputs;
use super::parser::TestDefinition;

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Find a level by name in the test levels, then the campaign
pub fn find_level(name: &str) -> Result<LevelData, String> {
    let wanted = normalize(name);
    let test_levels = match LevelDatabase::load_from_file(TEST_LEVELS_FILE) {
        Ok(db) => db.levels,
        Err(e) => return Err(e.to_string()),
    };
    let campaign = LevelDatabase::default_levels().levels;

    test_levels
        .iter()
        .chain(campaign.iter())
        .find(|l| normalize(&l.name) == wanted)
        .cloned()
        .ok_or_else(|| {
            format!(
                "Level '{}' not found. Available: {:?}",
                name,
                test_levels
                    .iter()
                    .chain(campaign.iter())
                    .map(|l| &l.name)
                    .collect::<Vec<_>>()
            )
        })
}

/// Run a single test and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    let level = match find_level(&test.setup.level) {
        Ok(level) => level,
        Err(message) => return TestResult::Error { message },
    };

    // Scenarios are written against the built-in tuning, not config files
    let mut tuning = GameplayTuning::default();
    if let Some(delay) = test.setup.shadow_delay {
        tuning.shadow_delay = delay;
    }

    let mut app = HeadlessAppBuilder::new()
        .with_levels(LevelDatabase {
            levels: vec![level],
        })
        .with_tuning(tuning)
        .build();

    {
        let Some(mut world) = app.world_mut().get_resource_mut::<GameWorld>() else {
            return TestResult::Error {
                message: format!("Level '{}' failed validation", test.setup.level),
            };
        };
        if let Some([x, y]) = test.setup.player {
            world.player.pos = Vec2::new(x, y);
        }
        if let Some(health) = test.setup.player_health {
            world.player.health = health;
        }
        if test.setup.shadow {
            world.spawn_shadow();
        }
    }

    let mut scripted = ScriptedInputs::from_inputs(&test.input);
    for state in &test.expect.state {
        scripted.set_max_frame(state.after_frame);
    }
    if scripted.max_frame == 0 {
        scripted.max_frame = 60;
    }

    let mut state_checks: Vec<_> = test.expect.state.iter().collect();
    state_checks.sort_by_key(|s| s.after_frame);
    let mut next_check = 0;
    let mut captured = Vec::new();

    // Frame 0 state checks see the world before any step
    while let Some(assertion) = state_checks.get(next_check).filter(|s| s.after_frame == 0) {
        let state = WorldState::capture(app.world().resource::<GameWorld>());
        if let Err(error) = check_state(assertion, &state) {
            return TestResult::Fail { error };
        }
        next_check += 1;
    }

    while scripted.should_continue() {
        let input = scripted.advance_frame();
        *app.world_mut().resource_mut::<StepInput>() = input;
        app.world_mut().run_schedule(FixedUpdate);

        captured.extend(
            app.world()
                .resource::<EventBus>()
                .processed()
                .iter()
                .map(CapturedEvent::from_bus),
        );

        let frame = app.world().resource::<GameWorld>().frame();
        while let Some(assertion) = state_checks.get(next_check).filter(|s| s.after_frame == frame) {
            let state = WorldState::capture(app.world().resource::<GameWorld>());
            if let Err(error) = check_state(assertion, &state) {
                return TestResult::Fail { error };
            }
            next_check += 1;
        }
    }

    if let Err(error) = check_sequence(&test.expect.sequence, &captured) {
        return TestResult::Fail { error };
    }
    if let Err(error) = check_absent(&test.expect.absent, &captured) {
        return TestResult::Fail { error };
    }

    TestResult::Pass {
        frames: scripted.current_frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SCENARIOS_DIR;
    use crate::testing::parser::parse_test_file;
    use std::fs;

    #[test]
    fn test_unknown_level_is_error() {
        let def: TestDefinition = toml::from_str(
            r#"
name = "Missing"
[setup]
level = "no such level"
"#,
        )
        .unwrap();
        assert!(matches!(run_test(&def), TestResult::Error { .. }));
    }

    #[test]
    fn test_campaign_level_lookup_is_loose() {
        assert_eq!(find_level("basic_training").unwrap().name, "Basic Training");
        assert_eq!(find_level("Final Showdown").unwrap().name, "Final Showdown");
    }

    #[test]
    fn test_all_scenarios_pass() {
        let mut paths: Vec<_> = fs::read_dir(SCENARIOS_DIR)
            .unwrap()
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|e| e == "toml"))
            .collect();
        paths.sort();
        assert!(!paths.is_empty());

        for path in paths {
            let def = parse_test_file(&path).unwrap();
            let result = run_test(&def);
            assert!(result.is_pass(), "{}: {:?}", path.display(), result);
        }
    }
}
