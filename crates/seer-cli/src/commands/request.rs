use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use seer_core::rng::seeded;
use seer_core::{
    CombinedOracle, Oracle, OracleConfig, OracleKind, RequestOutcome, RequestStats, Seer,
    TimeMixedSeer, TimeMixedVolatileSeer, VolatileSeer,
};

use super::{outcome_label, yes_no};

pub fn run(variant: &str, q: u32, seed: Option<u64>, count: u32, message: &str) -> Result<(), String> {
    let kind = OracleKind::parse(variant).map_err(|e| e.to_string())?;
    let mut oracle = build(kind, q, seed).map_err(|e| format!("failed to create oracle: {e}"))?;

    println!(
        "  {} {} {}",
        "Requesting".bold(),
        oracle.name(),
        format!("(Q={q}, {count} requests)").dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Active", "Outcome", "Answer"]);

    let mut stats = RequestStats::default();
    for i in 1..=count {
        let was_active = oracle.active();
        let mut answer = message.to_string();
        oracle.request(&mut answer);
        let outcome = RequestOutcome::classify(was_active, &answer);
        stats.record(&outcome);
        table.add_row(vec![
            i.to_string(),
            yes_no(was_active).to_string(),
            outcome_label(&outcome).to_string(),
            answer,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} delivered, {} rejected, {} inactive",
        stats.delivered(),
        stats.rejected,
        stats.inactive
    );
    Ok(())
}

/// Construct a request-answering oracle of the given kind.
fn build(kind: OracleKind, q: u32, seed: Option<u64>) -> Result<Box<dyn Oracle>, String> {
    let rng = seeded(seed);
    let oracle: Box<dyn Oracle> = match kind {
        OracleKind::Seer => Box::new(Seer::new(q).map_err(|e| e.to_string())?),
        OracleKind::TimeMixedSeer => {
            Box::new(TimeMixedSeer::with_rng(q, rng).map_err(|e| e.to_string())?)
        }
        OracleKind::VolatileSeer => {
            Box::new(VolatileSeer::with_rng(q, rng).map_err(|e| e.to_string())?)
        }
        OracleKind::TimeMixedVolatileSeer => {
            Box::new(TimeMixedVolatileSeer::with_rng(q, rng).map_err(|e| e.to_string())?)
        }
        OracleKind::CombinedOracle => {
            let config = OracleConfig::default().with_flip_threshold(q);
            Box::new(CombinedOracle::with_rng(&config, rng).map_err(|e| e.to_string())?)
        }
        OracleKind::NumMixer => {
            return Err(format!("{kind} does not answer requests; try `seer run`"));
        }
    };
    Ok(oracle)
}
