//! Scenario test runner CLI
//!
//! Usage:
//!   cargo run --bin test-scenarios                  # Run all scenarios
//!   cargo run --bin test-scenarios -- shadow        # Run scenarios whose path contains "shadow"
//!   cargo run --bin test-scenarios -- --list        # List scenarios with descriptions
//!   cargo run --bin test-scenarios -- --verbose     # Expected/actual detail on failure

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use shadowsplit::testing::{SCENARIOS_DIR, TestResult, parse_test_file, run_test};

struct Options {
    verbose: bool,
    list: bool,
    filter: Option<String>,
}

fn parse_options() -> Options {
    let mut options = Options {
        verbose: false,
        list: false,
        filter: None,
    };
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => options.verbose = true,
            "--list" | "-l" => options.list = true,
            other if !other.starts_with('-') => options.filter = Some(other.to_string()),
            other => eprintln!("Ignoring unknown option {}", other),
        }
    }
    options
}

fn main() {
    let options = parse_options();
    let base = Path::new(SCENARIOS_DIR);

    if !base.is_dir() {
        eprintln!("No scenarios directory at {}", SCENARIOS_DIR);
        process::exit(1);
    }

    let paths = discover(base, options.filter.as_deref());
    if paths.is_empty() {
        eprintln!(
            "No scenario files found{}",
            options
                .filter
                .as_ref()
                .map(|f| format!(" matching '{}'", f))
                .unwrap_or_default()
        );
        process::exit(1);
    }

    if options.list {
        list(base, &paths);
        return;
    }

    println!("Shadow Splitter scenarios");
    println!("=========================\n");

    let (mut passed, mut failed, mut errors) = (0, 0, 0);
    for path in &paths {
        let name = display_name(base, path);
        let result = match parse_test_file(path) {
            Ok(def) => run_test(&def),
            Err(message) => TestResult::Error { message },
        };
        match &result {
            TestResult::Pass { .. } => passed += 1,
            TestResult::Fail { .. } => failed += 1,
            TestResult::Error { .. } => errors += 1,
        }
        report(&name, &result, options.verbose);
    }

    println!("\n=========================");
    println!("{} passed, {} failed, {} errors", passed, failed, errors);

    if failed + errors > 0 {
        process::exit(1);
    }
}

/// All `.toml` files under `base`, sorted, optionally filtered by relative path
fn discover(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut dirs = vec![base.to_path_buf()];

    while let Some(dir) = dirs.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                dirs.push(path);
            } else if path.extension().is_some_and(|e| e == "toml")
                && filter.is_none_or(|f| display_name(base, &path).contains(f))
            {
                found.push(path);
            }
        }
    }

    found.sort();
    found
}

fn display_name(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .with_extension("")
        .to_string_lossy()
        .to_string()
}

fn list(base: &Path, paths: &[PathBuf]) {
    for path in paths {
        let name = display_name(base, path);
        match parse_test_file(path) {
            Ok(def) => println!(
                "  {:<28} {}",
                name,
                def.description.as_deref().unwrap_or(&def.name)
            ),
            Err(e) => println!("  {:<28} (unreadable: {})", name, e),
        }
    }
}

fn report(name: &str, result: &TestResult, verbose: bool) {
    let dots = ".".repeat(36usize.saturating_sub(name.len()).max(2));

    match result {
        TestResult::Pass { frames } => println!("  {} {} PASS ({} frames)", name, dots, frames),
        TestResult::Fail { error } => {
            println!("  {} {} FAIL", name, dots);
            if verbose {
                println!("    {}", error);
            } else {
                println!("    {}", error.message);
            }
        }
        TestResult::Error { message } => {
            println!("  {} {} ERROR", name, dots);
            println!("    {}", message);
        }
    }
}
