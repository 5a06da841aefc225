//! Simulation configuration

use serde::{Deserialize, Serialize};

/// Simulation mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum SimMode {
    /// Run a single seeded run
    #[default]
    Single,
    /// Run `count` runs with seeds derived from the base seed
    Batch { count: u32 },
}

/// Probabilities driving the random input generator, per step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputProfile {
    /// Chance of switching the held direction (left, right or none)
    pub direction_change: f64,
    /// Chance of holding jump
    pub jump: f64,
    /// Chance of holding shoot
    pub shoot: f64,
    /// Chance of pressing the shadow toggle
    pub toggle_shadow: f64,
    /// Chance of pressing pause
    pub pause: f64,
}

impl Default for InputProfile {
    fn default() -> Self {
        Self {
            direction_change: 0.05,
            jump: 0.08,
            shoot: 0.1,
            toggle_shadow: 0.005,
            pause: 0.0,
        }
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub mode: SimMode,
    /// Steps to run per simulation
    pub frames: u64,
    /// Starting level (1-based)
    pub level: u32,
    /// RNG seed for reproducibility (None = random)
    pub seed: Option<u64>,
    pub input: InputProfile,
    /// Level file (None = built-in levels)
    pub levels_file: Option<String>,
    /// Tuning file (None = config/gameplay_tuning.json with fallback)
    pub tuning_file: Option<String>,
    /// Output file path (None = stdout)
    pub output_file: Option<String>,
    /// Directory for compact event logs (None = no logs)
    pub events_dir: Option<String>,
    /// Suppress progress output
    pub quiet: bool,
    /// Number of parallel threads (0 = sequential, N = N threads)
    pub parallel: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mode: SimMode::Single,
            frames: 3600,
            level: 1,
            seed: None,
            input: InputProfile::default(),
            levels_file: None,
            tuning_file: None,
            output_file: None,
            events_dir: None,
            quiet: false,
            parallel: 0,
        }
    }
}

/// Local simulation settings (gitignored, user's custom settings)
pub const SIM_SETTINGS_FILE: &str = "config/simulation_settings.json";

impl SimConfig {
    /// Load configuration from a JSON settings file
    pub fn from_file(path: &str) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
    }

    /// Local settings file if present, otherwise built-in defaults
    pub fn from_config_files() -> Self {
        Self::from_file(SIM_SETTINGS_FILE).unwrap_or_default()
    }

    /// Parse configuration from command line arguments
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_arg_list(&args[1..])
    }

    /// Settings file first, then command line overrides
    pub fn from_arg_list(args: &[String]) -> Self {
        let mut config = Self::from_config_files();

        if let Some(i) = args.iter().position(|a| a == "--settings") {
            if let Some(path) = args.get(i + 1) {
                match Self::from_file(path) {
                    Ok(loaded) => config = loaded,
                    Err(e) => eprintln!("Warning: {}", e),
                }
            }
        }

        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1);
            match args[i].as_str() {
                "--settings" => {
                    i += 1;
                }
                "--frames" => {
                    if let Some(v) = value {
                        config.frames = v.parse().unwrap_or(config.frames);
                        i += 1;
                    }
                }
                "--level" => {
                    if let Some(v) = value {
                        config.level = v.parse().unwrap_or(1).max(1);
                        i += 1;
                    }
                }
                "--seed" => {
                    if let Some(v) = value {
                        config.seed = v.parse().ok();
                        i += 1;
                    }
                }
                "--batch" => {
                    if let Some(v) = value {
                        let count = v.parse().unwrap_or(1);
                        config.mode = SimMode::Batch { count };
                        i += 1;
                    }
                }
                "--levels-file" => {
                    if let Some(v) = value {
                        config.levels_file = Some(v.clone());
                        i += 1;
                    }
                }
                "--tuning" => {
                    if let Some(v) = value {
                        config.tuning_file = Some(v.clone());
                        i += 1;
                    }
                }
                "--output" => {
                    if let Some(v) = value {
                        config.output_file = Some(v.clone());
                        i += 1;
                    }
                }
                "--events" => {
                    if let Some(v) = value {
                        config.events_dir = Some(v.clone());
                        i += 1;
                    }
                }
                "--parallel" => {
                    if let Some(v) = value {
                        config.parallel = v.parse().unwrap_or(0);
                        i += 1;
                    }
                }
                "--quiet" | "-q" => {
                    config.quiet = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {}
            }
            i += 1;
        }

        config
    }
}

fn print_help() {
    println!(
        r#"Shadow Splitter headless simulation

USAGE:
    cargo run --bin simulate -- [OPTIONS]

OPTIONS:
    --settings <FILE>      Load settings from JSON file (CLI args override file settings)
    --frames <N>           Steps per run (default: 3600)
    --level <N>            Starting level, 1-based (default: 1)
    --seed <N>             RNG seed for reproducibility
    --batch <N>            Run N seeded runs
    --levels-file <FILE>   Level file (default: built-in levels)
    --tuning <FILE>        Gameplay tuning JSON (default: config/gameplay_tuning.json)
    --output <FILE>        Output JSON to file (default: stdout)
    --events <DIR>         Write a compact event log per run into DIR
    --parallel <N>         Run batches in parallel with N threads
    --quiet, -q            Suppress progress output
    --help, -h             Show this help

EXAMPLES:
    cargo run --bin simulate -- --frames 600 --seed 42
    cargo run --bin simulate -- --batch 32 --parallel 8 --output results.json
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_args_override_defaults() {
        let config = SimConfig::from_arg_list(&args(&[
            "--frames", "120", "--seed", "7", "--batch", "4", "--level", "3", "-q",
        ]));
        assert_eq!(config.frames, 120);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.mode, SimMode::Batch { count: 4 });
        assert_eq!(config.level, 3);
        assert!(config.quiet);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{ "frames": 10 }"#).unwrap();
        assert_eq!(config.frames, 10);
        assert_eq!(config.mode, SimMode::Single);
        assert_eq!(config.input, InputProfile::default());
    }
}
