//! Driver routines that exercise oracles and journal what they observe.
//!
//! These only use the public [`Oracle`] and [`Sampler`] operations, so they
//! work on any variant and never reach into oracle state.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::combined::{CombinedOracle, OracleStatus};
use crate::error::SeerResult;
use crate::journal::{Journal, JournalEntry};
use crate::mixer::{Parity, Sampler};
use crate::rng::RandomSource;
use crate::seer::Oracle;

/// Message the scenario driver requests with.
pub const SCENARIO_MESSAGE: &str = "Lorem ipsum dolor.";

/// Buffer size the scenario driver pings with.
pub const SCENARIO_PING_SIZE: usize = 10;

/// Requests the scenario driver issues by default.
pub const SCENARIO_REQUESTS: u32 = 30;

/// How a single request was answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestOutcome {
    /// The oracle answered with this message.
    Delivered(String),
    /// The oracle was active but the answer came back empty.
    Rejected,
    /// The oracle was inactive when asked.
    Inactive,
}

impl RequestOutcome {
    /// Classify an answer given whether the oracle was active beforehand.
    pub fn classify(was_active: bool, answer: &str) -> Self {
        if !was_active {
            Self::Inactive
        } else if answer.is_empty() {
            Self::Rejected
        } else {
            Self::Delivered(answer.to_string())
        }
    }
}

/// Totals for a request series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStats {
    /// Requests made while the oracle was active.
    pub active: u32,
    /// Requests made while the oracle was inactive.
    pub inactive: u32,
    /// Active requests that came back empty.
    pub rejected: u32,
}

impl RequestStats {
    /// Count one outcome.
    pub fn record(&mut self, outcome: &RequestOutcome) {
        match outcome {
            RequestOutcome::Delivered(_) => self.active += 1,
            RequestOutcome::Rejected => {
                self.active += 1;
                self.rejected += 1;
            }
            RequestOutcome::Inactive => self.inactive += 1,
        }
    }

    /// Requests that returned a message.
    pub fn delivered(&self) -> u32 {
        self.active - self.rejected
    }

    /// All requests counted.
    pub fn total(&self) -> u32 {
        self.active + self.inactive
    }
}

/// Issue `count` requests, each with a fresh copy of `message`, journaling
/// every answer and every change of the oracle's active state.
pub fn request_series(
    oracle: &mut dyn Oracle,
    count: u32,
    message: &str,
    journal: &mut Journal,
) -> RequestStats {
    let name = oracle.name().to_string();
    let mut stats = RequestStats::default();
    journal.append(JournalEntry::RequestsStarted {
        oracle: name.clone(),
        active: oracle.active(),
        timestamp: Utc::now(),
    });

    for _ in 0..count {
        let was_active = oracle.active();
        let mut answer = message.to_string();
        oracle.request(&mut answer);
        let outcome = RequestOutcome::classify(was_active, &answer);
        stats.record(&outcome);
        journal.append(JournalEntry::Request {
            outcome,
            timestamp: Utc::now(),
        });

        let now_active = oracle.active();
        if now_active != was_active {
            tracing::debug!(oracle = %name, active = now_active, "state changed");
            journal.append(JournalEntry::StateChanged {
                oracle: name.clone(),
                active: now_active,
                timestamp: Utc::now(),
            });
        }
    }

    journal.append(JournalEntry::RequestSummary {
        oracle: name,
        stats,
        timestamp: Utc::now(),
    });
    stats
}

/// Switch a sampler to `parity` (journaling whether it was already set),
/// then ping it with a buffer of `size` values.
///
/// Returns the ping outcome. Fails only on a zero `size`.
pub fn ping_with_parity(
    sampler: &mut dyn Sampler,
    parity: Parity,
    size: usize,
    journal: &mut Journal,
) -> SeerResult<bool> {
    let changed = sampler.set_controller_state(parity);
    journal.header(&format!("PING {}", sampler.controller_state_name()))?;
    journal.append(JournalEntry::ControllerChange {
        parity,
        changed,
        timestamp: Utc::now(),
    });

    let mut buffer = vec![0; size];
    let ok = sampler.ping(&mut buffer)?;
    tracing::debug!(%parity, ok, "ping");
    journal.append(JournalEntry::Ping {
        requested: size,
        values: ok.then_some(buffer),
        timestamp: Utc::now(),
    });
    Ok(ok)
}

/// Journal a sampler's controller change count and activity.
pub fn record_stats(sampler: &dyn Sampler, journal: &mut Journal) -> SeerResult<()> {
    journal.header("STATS")?;
    journal.append(JournalEntry::Stats {
        controller_changes: sampler.state_change_count(),
        active: sampler.is_active(),
        timestamp: Utc::now(),
    });
    Ok(())
}

/// What a scenario run observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Each parity pinged and whether the ping succeeded.
    pub pings: Vec<(Parity, bool)>,
    /// Totals for the request phase.
    pub requests: RequestStats,
    /// The oracle's state at the end.
    pub status: OracleStatus,
}

/// Drive a combined oracle through both facets: ping it in every parity,
/// record its stats, then issue `requests` requests.
pub fn run_scenario<R: RandomSource>(
    oracle: &mut CombinedOracle<R>,
    requests: u32,
    journal: &mut Journal,
) -> SeerResult<ScenarioReport> {
    let mut pings = Vec::with_capacity(Parity::all().len());
    for parity in Parity::all() {
        let ok = ping_with_parity(&mut *oracle, *parity, SCENARIO_PING_SIZE, journal)?;
        pings.push((*parity, ok));
    }
    record_stats(&*oracle, journal)?;

    journal.header(Oracle::name(&*oracle))?;
    let stats = request_series(&mut *oracle, requests, SCENARIO_MESSAGE, journal);

    let status = oracle.status();
    tracing::info!(phase = %status.phase, countdown = status.countdown, "scenario finished");
    journal.append(JournalEntry::FinalStatus {
        status: status.clone(),
        timestamp: Utc::now(),
    });

    Ok(ScenarioReport {
        pings,
        requests: stats,
        status,
    })
}
