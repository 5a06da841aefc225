//! Headless simulation tool
//!
//! Plays the campaign with seeded random input and reports score and event
//! statistics as JSON.
//!
//! Usage:
//!   cargo run --bin simulate -- --help
//!   cargo run --bin simulate -- --frames 7200 --seed 42
//!   cargo run --bin simulate -- --batch 100 --parallel 8 --output results.json
//!   cargo run --bin simulate -- --level 3 --events event_logs

use shadowsplit::simulation::{SimConfig, run_simulation};

fn main() {
    let config = SimConfig::from_args();
    if let Err(e) = run_simulation(config) {
        eprintln!("simulate: {}", e);
        std::process::exit(1);
    }
}
