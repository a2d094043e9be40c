// Growth Runner - Load and execute growth scenario YAML files
//
// Usage:
//   cargo run --bin growth_runner scenarios/baseline_growth.yaml
//   cargo run --bin growth_runner scenarios/  (runs all .yaml files in directory)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rn_rust::rn_optimization::min_bonus_for_target;
use rn_rust::rn_simulation::{days_to_target_with, simulate_with, GrowthConfig};

/// Growth scenario file format
#[derive(Debug, serde::Deserialize)]
struct ScenarioFile {
    /// Scenario metadata
    #[serde(default)]
    meta: ScenarioMeta,

    /// Simulation configuration
    config: ScenarioConfig,

    /// Optional bonus calibration run
    #[serde(default)]
    calibration: Option<CalibrationConfig>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ScenarioMeta {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ScenarioConfig {
    /// Per-person daily referral probability
    adoption_probability: f64,

    /// Days to project
    days: usize,

    // Growth model overrides (optional)
    initial_referrers: Option<f64>,
    referral_capacity: Option<f64>,
    max_days: Option<u64>,

    /// Report cumulative totals every N days (default: 5)
    #[serde(default = "default_report_interval")]
    report_interval: usize,
}

#[derive(Debug, serde::Deserialize)]
struct CalibrationConfig {
    /// Hires to reach
    target_hires: u64,

    /// Day budget for the target
    day_budget: u64,

    /// Linear adoption curve: probability bought per bonus dollar
    prob_per_dollar: f64,

    /// Probability ceiling of the curve (default: 1.0)
    #[serde(default = "default_max_probability")]
    max_probability: f64,
}

fn default_report_interval() -> usize {
    5
}

fn default_max_probability() -> f64 {
    1.0
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <scenario.yaml | directory/>", args[0]);
        eprintln!("\nExamples:");
        eprintln!("  {} scenarios/baseline_growth.yaml", args[0]);
        eprintln!("  {} scenarios/", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);

    if path.is_file() {
        run_scenario_file(path);
    } else if path.is_dir() {
        run_scenario_directory(path);
    } else {
        eprintln!("Error: Path does not exist: {}", path.display());
        std::process::exit(1);
    }
}

fn run_scenario_directory(dir: &Path) {
    let mut scenarios: Vec<PathBuf> = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let ext = path.extension().and_then(|s| s.to_str());
            if ext == Some("yaml") || ext == Some("yml") {
                scenarios.push(path);
            }
        }
    }

    scenarios.sort();

    if scenarios.is_empty() {
        eprintln!("No .yaml files found in {}", dir.display());
        std::process::exit(1);
    }

    println!("\nFound {} scenario(s) to run\n", scenarios.len());

    for (i, scenario_path) in scenarios.iter().enumerate() {
        println!("\n{}/{} Running: {}\n", i + 1, scenarios.len(), scenario_path.display());
        run_scenario_file(scenario_path);
    }

    println!("\nAll scenarios complete\n");
}

fn run_scenario_file(path: &Path) {
    println!("Loading scenario from: {}", path.display());

    let yaml_content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", path.display(), e);
        std::process::exit(1);
    });

    let scenario: ScenarioFile = serde_yaml::from_str(&yaml_content).unwrap_or_else(|e| {
        eprintln!("Failed to parse {}: {}", path.display(), e);
        std::process::exit(1);
    });

    println!("\n========================================================");
    match scenario.meta.name {
        Some(ref name) => println!("  {}", name),
        None => match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => println!("  Scenario: {}", stem),
            None => println!("  Scenario"),
        },
    }
    println!("========================================================\n");

    if let Some(ref desc) = scenario.meta.description {
        println!("{}\n", desc);
    }

    let mut growth = GrowthConfig::default();
    if let Some(v) = scenario.config.initial_referrers {
        growth.initial_referrers = v;
    }
    if let Some(v) = scenario.config.referral_capacity {
        growth.referral_capacity = v;
    }
    if let Some(v) = scenario.config.max_days {
        growth.max_days = v;
    }

    let p = scenario.config.adoption_probability;
    let days = scenario.config.days;
    let totals = simulate_with(&growth, p, days);

    println!("{:>8} {:>20}", "Day", "Cumulative");
    println!("{}", "-".repeat(30));
    let interval = scenario.config.report_interval.max(1);
    for (day, total) in totals.iter().enumerate() {
        if (day + 1) % interval == 0 || day + 1 == days {
            println!("{:>8} {:>20.2}", day + 1, total);
        }
    }

    if let Some(cal) = scenario.calibration {
        println!("\nCalibration: {} hires within {} days", cal.target_hires, cal.day_budget);

        let curve = |bonus: f64| (bonus * cal.prob_per_dollar).min(cal.max_probability);
        match days_to_target_with(&growth, p, cal.target_hires) {
            Some(d) => println!("  at scenario p={}: {} days", p, d),
            None => println!("  at scenario p={}: unreachable", p),
        }
        match min_bonus_for_target(cal.day_budget, cal.target_hires, curve) {
            Some(bonus) => println!("  minimum qualifying bonus: ${}", bonus),
            None => println!("  no bonus meets the target within the budget"),
        }
    }
}
