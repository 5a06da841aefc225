//! Scenario testing system for deterministic game testing
//!
//! Runs scripted input from TOML files against a headless world and checks
//! the emitted events and the world state at chosen frames.

pub mod assertions;
pub mod input;
pub mod parser;
pub mod runner;

pub use assertions::{
    AssertionError, CapturedEvent, StateValue, WorldState, check_absent, check_sequence, check_state,
};
pub use input::ScriptedInputs;
pub use parser::{
    ExpectedEvent, FrameInput, StateAssertion, TestDefinition, TestExpectations, TestSetup,
    parse_test_file,
};
pub use runner::{TestResult, find_level, run_test};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";

/// Default path for test levels
pub const TEST_LEVELS_FILE: &str = "config/test_levels.txt";
