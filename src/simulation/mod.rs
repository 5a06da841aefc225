//! Headless simulation - runs the game without rendering
//!
//! Seeded random input drives the plugin for a fixed number of steps,
//! singly or in rayon batches, and reports scores and event tallies.

pub mod app_builder;
pub mod config;
pub mod metrics;
pub mod parallel;
pub mod runner;

pub use app_builder::HeadlessAppBuilder;
pub use config::{InputProfile, SimConfig, SimMode};
pub use metrics::{BatchSummary, RunResult, RunStats};
pub use parallel::{init_parallel, run_batch_parallel};
pub use runner::{RandomInputDriver, run_once, run_simulation};
