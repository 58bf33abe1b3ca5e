//! Journal storage and export.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::SeerResult;
use crate::probe::RequestOutcome;
use super::banner;
use super::entry::JournalEntry;

/// A chronological log of driver observations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Append a section header, rejecting titles too wide for a banner.
    pub fn header(&mut self, title: &str) -> SeerResult<()> {
        banner::check_title(title)?;
        self.append(JournalEntry::Header {
            title: title.to_string(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as pretty-printed JSON.
    pub fn export_json(&self) -> SeerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Export the journal as a plain-text log.
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry {
                JournalEntry::Header { title, .. } => {
                    out.push_str(&banner::render(title));
                    out.push('\n');
                }
                JournalEntry::ControllerChange {
                    parity, changed, ..
                } => {
                    if *changed {
                        out.push_str(&format!("State set to {parity}.\n"));
                    } else {
                        out.push_str("State change failed (already set).\n");
                    }
                }
                JournalEntry::Ping {
                    requested, values, ..
                } => {
                    match values {
                        Some(values) => {
                            out.push_str(&format!(
                                "Ping successful ({requested} elements requested):\n"
                            ));
                            for v in values {
                                out.push_str(&format!("{v}\n"));
                            }
                        }
                        None => out.push_str("Ping failed.\n"),
                    }
                    out.push_str("\n\n");
                }
                JournalEntry::Stats {
                    controller_changes,
                    active,
                    ..
                } => {
                    out.push_str(&format!(
                        "Output controller state change count: {controller_changes}.\n"
                    ));
                    let state = if *active { "active" } else { "inactive" };
                    out.push_str(&format!("Output controller is {state}.\n\n\n"));
                }
                JournalEntry::RequestsStarted { oracle, active, .. } => {
                    out.push_str("Requesting messages...\n\n");
                    out.push_str(&state_line(oracle, *active));
                }
                JournalEntry::Request { outcome, .. } => match outcome {
                    RequestOutcome::Delivered(message) => {
                        out.push_str(&format!("{message}\n"));
                    }
                    RequestOutcome::Rejected => out.push_str("Rejected...\n"),
                    RequestOutcome::Inactive => out.push_str("Inactive...\n"),
                },
                JournalEntry::StateChanged { oracle, active, .. } => {
                    out.push('\n');
                    out.push_str(&state_line(oracle, *active));
                }
                JournalEntry::RequestSummary { oracle, stats, .. } => {
                    out.push_str(&format!(
                        "\n{oracle} was inactive for \"{}\" requests.\n",
                        stats.inactive
                    ));
                    out.push_str(&format!(
                        "{oracle} was active for \"{}\" requests and rejected \"{}\" of them.\n\n",
                        stats.active, stats.rejected
                    ));
                }
                JournalEntry::FinalStatus { status, .. } => {
                    out.push_str(&format!(
                        "Final state: {} (countdown {}, flips {}/{}).\n",
                        status.phase, status.countdown, status.flips, status.lifetime_flips
                    ));
                }
            }
        }
        out
    }
}

fn state_line(oracle: &str, active: bool) -> String {
    let state = if active { "active" } else { "inactive" };
    format!("== {oracle} is now {state}. ==\n")
}

#[cfg(test)]
mod tests {
    use crate::combined::{OracleStatus, Phase};
    use crate::error::SeerError;
    use crate::mixer::Parity;
    use crate::probe::RequestStats;
    use super::*;

    #[test]
    fn empty_journal() {
        let j = Journal::new();
        assert!(j.is_empty());
        assert_eq!(j.len(), 0);
        assert_eq!(j.export_text(), "");
    }

    #[test]
    fn header_renders_banner() {
        let mut j = Journal::new();
        j.header("STATS").unwrap();
        let txt = j.export_text();
        assert!(txt.starts_with("##########################\n"));
        assert!(txt.contains("#         STATS          #"));
    }

    #[test]
    fn header_too_wide() {
        let mut j = Journal::new();
        let err = j.header("a header far too wide for the box").unwrap_err();
        assert!(matches!(err, SeerError::PreconditionViolated(_)));
        assert!(j.is_empty());
    }

    #[test]
    fn export_text_ping() {
        let mut j = Journal::new();
        j.append(JournalEntry::ControllerChange {
            parity: Parity::Even,
            changed: true,
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::Ping {
            requested: 2,
            values: Some(vec![4, 8]),
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::ControllerChange {
            parity: Parity::Even,
            changed: false,
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::Ping {
            requested: 2,
            values: None,
            timestamp: Utc::now(),
        });
        let txt = j.export_text();
        assert!(txt.contains("State set to EVEN.\n"));
        assert!(txt.contains("Ping successful (2 elements requested):\n4\n8\n"));
        assert!(txt.contains("State change failed (already set).\n"));
        assert!(txt.contains("Ping failed.\n"));
    }

    #[test]
    fn export_text_requests() {
        let mut j = Journal::new();
        j.append(JournalEntry::RequestsStarted {
            oracle: "seer".to_string(),
            active: true,
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::Request {
            outcome: RequestOutcome::Delivered("hi".to_string()),
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::Request {
            outcome: RequestOutcome::Rejected,
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::StateChanged {
            oracle: "seer".to_string(),
            active: false,
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::Request {
            outcome: RequestOutcome::Inactive,
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::RequestSummary {
            oracle: "seer".to_string(),
            stats: RequestStats {
                active: 2,
                inactive: 1,
                rejected: 1,
            },
            timestamp: Utc::now(),
        });
        let txt = j.export_text();
        assert!(txt.starts_with("Requesting messages...\n\n== seer is now active. ==\n"));
        assert!(txt.contains("hi\nRejected...\n\n== seer is now inactive. ==\nInactive...\n"));
        assert!(txt.contains("seer was inactive for \"1\" requests."));
        assert!(txt.contains("seer was active for \"2\" requests and rejected \"1\" of them."));
    }

    #[test]
    fn export_text_stats_and_status() {
        let mut j = Journal::new();
        j.append(JournalEntry::Stats {
            controller_changes: 2,
            active: false,
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::FinalStatus {
            status: OracleStatus {
                phase: Phase::Exhausted,
                parity: Parity::Odd,
                countdown: 0,
                flips: 3,
                lifetime_flips: 40,
                controller_changes: 2,
            },
            timestamp: Utc::now(),
        });
        let txt = j.export_text();
        assert!(txt.contains("Output controller state change count: 2."));
        assert!(txt.contains("Output controller is inactive."));
        assert!(txt.contains("Final state: exhausted (countdown 0, flips 3/40)."));
    }

    #[test]
    fn journal_serde_roundtrip() {
        let mut j = Journal::new();
        j.header("PING MIX").unwrap();
        j.append(JournalEntry::Request {
            outcome: RequestOutcome::Delivered("x".to_string()),
            timestamp: Utc::now(),
        });
        let json = j.export_json().unwrap();
        let j2: Journal = serde_json::from_str(&json).unwrap();
        assert_eq!(j2.len(), 2);
        assert_eq!(j2.entries()[0].timestamp(), j.entries()[0].timestamp());
    }
}
