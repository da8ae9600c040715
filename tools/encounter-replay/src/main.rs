//! encounter-replay: drive the avoidance core through a scripted encounter.
//!
//! Usage:
//!   encounter-replay run --scenario crossing.json [--config pwt_outer_dist=200]
//!   encounter-replay sample > crossing.json

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::process;

use colregs_behavior::{AvoidanceManager, BehaviorConfig};
use colregs_core::types::{ContactReport, KinematicState};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// A scripted encounter. Every vessel holds course and speed.
#[derive(Debug, Serialize, Deserialize)]
struct Scenario {
    /// Behavior parameters, applied in key order.
    #[serde(default)]
    config: BTreeMap<String, String>,
    own: KinematicState,
    contacts: Vec<ScenarioContact>,
    #[serde(default = "default_dt")]
    dt: f64,
    duration: f64,
    #[serde(default)]
    in_extremis: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ScenarioContact {
    name: String,
    #[serde(default)]
    contact_type: String,
    state: KinematicState,
    /// Time at which the tracker drops the contact.
    #[serde(default)]
    retire_at: Option<f64>,
}

fn default_dt() -> f64 {
    0.25
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "sample" => cmd_sample(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "encounter-replay: COLREGS avoidance encounter replay\n\
         \n\
         Commands:\n\
         \n\
         run       Replay a scenario, printing one JSON snapshot per tick\n\
         \n\
           --scenario <path>  Scenario JSON file\n\
           --config <k=v>     Extra behavior parameter (can specify multiple)\n\
         \n\
         sample    Print an example crossing scenario\n\
         \n\
         Set RUST_LOG=debug to see mode transitions.\n"
    );
}

fn parse_scenario_path(args: &[String]) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == "--scenario" && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}

fn parse_config_overrides(args: &[String]) -> Vec<String> {
    let mut pairs = Vec::new();
    for i in 0..args.len() {
        if args[i] == "--config" && i + 1 < args.len() {
            pairs.push(args[i + 1].clone());
        }
    }
    pairs
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let path = match parse_scenario_path(args) {
        Some(p) => p,
        None => {
            eprintln!("Error: --scenario <path> is required");
            process::exit(1);
        }
    };

    let text = match std::fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            process::exit(1);
        }
    };
    let scenario: Scenario = match serde_json::from_str(&text) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing scenario: {e}");
            process::exit(1);
        }
    };
    if !(scenario.dt > 0.0 && scenario.duration >= 0.0) {
        eprintln!("Error: dt must be > 0 and duration >= 0");
        process::exit(1);
    }

    let mut config = BehaviorConfig::default();
    let mut rejected = 0;
    for (param, value) in &scenario.config {
        if config.set_param(param, value).is_err() {
            rejected += 1;
        }
    }
    let overrides = parse_config_overrides(args).join("\n");
    rejected += config
        .apply_config_text(&overrides)
        .iter()
        .filter(|r| !r.accepted)
        .count();
    if rejected > 0 {
        warn!(rejected, "some configuration pairs were rejected");
    }

    replay(&scenario, config);
}

fn replay(scenario: &Scenario, config: BehaviorConfig) {
    let alert_range = config.pwt_outer_dist();
    let mut manager = AvoidanceManager::new(config);
    let mut alerted: HashSet<String> = HashSet::new();
    let steps = (scenario.duration / scenario.dt).floor() as u64;
    let mut surfaces = 0usize;

    info!(
        contacts = scenario.contacts.len(),
        steps, "starting encounter replay"
    );

    for step in 0..=steps {
        let now = step as f64 * scenario.dt;
        let own = scenario.own.advanced(now - scenario.own.timestamp);
        let reports: Vec<ContactReport> = scenario
            .contacts
            .iter()
            .map(|c| {
                let mut report = ContactReport::new(
                    &c.name,
                    c.state.advanced(now - c.state.timestamp),
                )
                .with_type(&c.contact_type);
                report.retired = c.retire_at.is_some_and(|t| now >= t);
                report
            })
            .collect();

        // Stand-in for the contact manager's range alert.
        for report in &reports {
            if !report.retired
                && own.range_to(&report.state) <= alert_range
                && alerted.insert(report.name.clone())
            {
                manager.handle_alert(&report.name);
            }
        }

        let snapshot = manager.tick(now, &own, &reports, scenario.in_extremis);
        surfaces += snapshot.surfaces.len();
        match serde_json::to_string(&snapshot) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!("Error encoding snapshot: {e}");
                process::exit(1);
            }
        }
    }

    info!(surfaces, live = manager.len(), "replay finished");
}

// --- Sample command ---

fn cmd_sample() {
    let scenario = Scenario {
        config: [
            ("completed_dist", "250"),
            ("pwt_inner_dist", "150"),
            ("pwt_outer_dist", "200"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
        own: KinematicState::new(0.0, 0.0, 0.0, 2.0, 0.0),
        contacts: vec![ScenarioContact {
            name: "ferry".to_string(),
            contact_type: "ship".to_string(),
            state: KinematicState::new(150.0, 150.0, 270.0, 2.0, 0.0),
            retire_at: None,
        }],
        dt: default_dt(),
        duration: 120.0,
        in_extremis: false,
    };
    match serde_json::to_string_pretty(&scenario) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error encoding sample: {e}");
            process::exit(1);
        }
    }
}
