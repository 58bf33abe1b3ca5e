//! Journal entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combined::OracleStatus;
use crate::mixer::Parity;
use crate::probe::{RequestOutcome, RequestStats};

/// A single observation recorded by a driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// A boxed section header.
    Header {
        /// Header text.
        title: String,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
    /// An attempt to switch a sampler's output controller.
    ControllerChange {
        /// The parity asked for.
        parity: Parity,
        /// False if the controller was already in that parity.
        changed: bool,
        /// When attempted.
        timestamp: DateTime<Utc>,
    },
    /// A ping and what it returned.
    Ping {
        /// Buffer size handed to the sampler.
        requested: usize,
        /// The samples, or `None` if the ping failed.
        values: Option<Vec<i32>>,
        /// When pinged.
        timestamp: DateTime<Utc>,
    },
    /// Sampler statistics.
    Stats {
        /// Output controller changes so far.
        controller_changes: u32,
        /// Whether the sampler was active.
        active: bool,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
    /// The start of a request series.
    RequestsStarted {
        /// Oracle variant name.
        oracle: String,
        /// Whether the oracle was active at the start.
        active: bool,
        /// When started.
        timestamp: DateTime<Utc>,
    },
    /// A single request and how it was answered.
    Request {
        /// The classified answer.
        outcome: RequestOutcome,
        /// When requested.
        timestamp: DateTime<Utc>,
    },
    /// An oracle became active or inactive.
    StateChanged {
        /// Oracle variant name.
        oracle: String,
        /// The new state.
        active: bool,
        /// When observed.
        timestamp: DateTime<Utc>,
    },
    /// Totals for a finished request series.
    RequestSummary {
        /// Oracle variant name.
        oracle: String,
        /// Request totals.
        stats: RequestStats,
        /// When finished.
        timestamp: DateTime<Utc>,
    },
    /// Final state of a combined oracle.
    FinalStatus {
        /// The snapshot.
        status: OracleStatus,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
}

impl JournalEntry {
    /// When the entry was recorded.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Header { timestamp, .. }
            | Self::ControllerChange { timestamp, .. }
            | Self::Ping { timestamp, .. }
            | Self::Stats { timestamp, .. }
            | Self::RequestsStarted { timestamp, .. }
            | Self::Request { timestamp, .. }
            | Self::StateChanged { timestamp, .. }
            | Self::RequestSummary { timestamp, .. }
            | Self::FinalStatus { timestamp, .. } => *timestamp,
        }
    }
}
