use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::Rng;

use seer_core::probe::{self, ScenarioReport};
use seer_core::rng::seeded;
use seer_core::{CombinedOracle, Journal, OracleConfig, Phase};

use super::yes_no;

/// Flip thresholds drawn when none is given.
const Q_RANGE: std::ops::RangeInclusive<u32> = 10..=20;

/// Options for the `run` command.
pub struct RunArgs {
    pub q: Option<u32>,
    pub seed: Option<u64>,
    pub countdown: u32,
    pub requests: u32,
    pub output: PathBuf,
    pub json: bool,
}

pub fn run(args: &RunArgs) -> Result<(), String> {
    let mut rng = seeded(args.seed);
    let q = args.q.unwrap_or_else(|| rng.random_range(Q_RANGE));

    let config = OracleConfig::default()
        .with_flip_threshold(q)
        .with_countdown(args.countdown);
    let mut oracle = CombinedOracle::with_rng(&config, rng)
        .map_err(|e| format!("failed to create oracle: {e}"))?;

    tracing::info!(q, countdown = args.countdown, requests = args.requests, "starting run");

    let mut journal = Journal::new();
    let report = probe::run_scenario(&mut oracle, args.requests, &mut journal)
        .map_err(|e| format!("scenario failed: {e}"))?;

    let content = if args.json {
        journal.export_json().map_err(|e| e.to_string())?
    } else {
        journal.export_text()
    };
    std::fs::write(&args.output, &content)
        .map_err(|e| format!("cannot write to {}: {e}", args.output.display()))?;

    print_summary(&report, q, args);
    Ok(())
}

fn print_summary(report: &ScenarioReport, q: u32, args: &RunArgs) {
    let seed = args
        .seed
        .map_or_else(|| "random".to_string(), |s| s.to_string());
    println!(
        "  {} numMixerTmVolatileSeer {}",
        "Run".bold(),
        format!("(Q={q}, countdown={}, seed={seed})", args.countdown).dimmed()
    );
    println!();

    let mut pings = Table::new();
    pings.set_content_arrangement(ContentArrangement::Dynamic);
    pings.set_header(vec!["Parity", "Ping"]);
    for (parity, ok) in &report.pings {
        pings.add_row(vec![parity.to_string(), yes_no(*ok).to_string()]);
    }
    println!("{pings}");
    println!();

    let stats = &report.requests;
    let mut requests = Table::new();
    requests.set_content_arrangement(ContentArrangement::Dynamic);
    requests.set_header(vec!["Requests", "Active", "Delivered", "Rejected", "Inactive"]);
    requests.add_row(vec![
        stats.total().to_string(),
        stats.active.to_string(),
        stats.delivered().to_string(),
        stats.rejected.to_string(),
        stats.inactive.to_string(),
    ]);
    println!("{requests}");
    println!();

    let status = &report.status;
    let phase = match status.phase {
        Phase::AliveOn => status.phase.to_string().green(),
        Phase::AliveOff => status.phase.to_string().yellow(),
        Phase::Exhausted | Phase::Dead => status.phase.to_string().red(),
    };
    println!(
        "  Final state: {phase} | countdown {} | flips {}/{} | controller changes {}",
        status.countdown, status.flips, status.lifetime_flips, status.controller_changes
    );
    println!("  Log written to {}", args.output.display());
}
