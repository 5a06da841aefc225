//! TOML test file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::input::StepInput;

/// Complete test definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Test setup configuration
#[derive(Debug, Deserialize)]
pub struct TestSetup {
    /// Level name, looked up in the test levels and then the campaign
    pub level: String,
    /// Move the player here (top-left, pixels) before the first step
    pub player: Option<[f32; 2]>,
    /// Spawn the shadow on the player before the first step
    #[serde(default)]
    pub shadow: bool,
    /// Override the replay delay
    pub shadow_delay: Option<u64>,
    /// Override the player's health
    pub player_health: Option<u32>,
}

/// Input changes at a specific frame.
///
/// Held buttons keep their last value until a later entry changes them.
/// `toggle_shadow`, `pause` and `restart` are presses for that frame only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    pub move_left: Option<bool>,
    pub move_right: Option<bool>,
    pub jump: Option<bool>,
    pub shoot: Option<bool>,
    #[serde(default)]
    pub toggle_shadow: bool,
    #[serde(default)]
    pub pause: bool,
    #[serde(default)]
    pub restart: bool,
}

impl FrameInput {
    /// Apply this entry on top of the held state
    pub fn apply(&self, input: &mut StepInput) {
        if let Some(v) = self.move_left {
            input.move_left = v;
        }
        if let Some(v) = self.move_right {
            input.move_right = v;
        }
        if let Some(v) = self.jump {
            input.jump = v;
        }
        if let Some(v) = self.shoot {
            input.shoot = v;
        }
        input.toggle_shadow = self.toggle_shadow;
        input.pause = self.pause;
        input.restart = self.restart;
    }
}

/// Expected test outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
    /// Event codes that must not occur at all
    #[serde(default)]
    pub absent: Vec<String>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    /// Event code as in the compact log (`J`, `SH`, `S+`, `ED`, ...)
    pub event: String,
    /// Exact data part of the compact log line (`P`, `E:boss|B`, ...)
    pub data: Option<String>,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after simulation
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Test"
[setup]
level = "arena"
shadow = true

[[input]]
frame = 10
move_right = true

[[expect.sequence]]
event = "J"
data = "S"
frame_max = 120
"#;
        let def: TestDefinition = toml::from_str(toml).unwrap();
        assert_eq!(def.name, "Test");
        assert_eq!(def.setup.level, "arena");
        assert!(def.setup.shadow);
        assert_eq!(def.input[0].move_right, Some(true));
        assert_eq!(def.input[0].jump, None);
        assert_eq!(def.expect.sequence[0].data.as_deref(), Some("S"));
    }

    #[test]
    fn test_apply_keeps_unset_buttons() {
        let mut input = StepInput {
            move_left: true,
            toggle_shadow: true,
            ..Default::default()
        };
        FrameInput {
            frame: 3,
            jump: Some(true),
            ..Default::default()
        }
        .apply(&mut input);
        assert!(input.move_left);
        assert!(input.jump);
        assert!(!input.toggle_shadow);
    }
}
