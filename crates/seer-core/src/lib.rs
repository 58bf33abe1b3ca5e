//! Stateful stochastic oracles.
//!
//! A seer reveals a hidden message while active and flips between active and
//! inactive every `Q` requests. Variants add a bounded lifetime with case
//! mixing ([`TimeMixedSeer`]), random rejection ([`VolatileSeer`]), or both
//! ([`TimeMixedVolatileSeer`]). A [`NumMixer`] samples a dataset under a
//! countdown, and a [`CombinedOracle`] unifies a sampler with a time-mixed
//! volatile seer so both facets share one state and one budget.
//!
//! Every variant owns a single [`OracleCore`] and a single random source;
//! facets are functions over that core rather than layers of state.
//!
//! Refusal is normal: inactive, dead, exhausted and rejecting oracles answer
//! with an empty message or `false`. Only misuse yields a [`SeerError`].

pub mod combined;
pub mod config;
pub mod error;
pub mod journal;
pub mod kind;
pub mod mixer;
pub mod probe;
pub mod rng;
pub mod seer;
pub mod state;
pub mod time_mixed;
pub mod tm_volatile;
pub mod volatile;

pub use combined::{CombinedOracle, OracleStatus, Phase};
pub use config::OracleConfig;
pub use error::{SeerError, SeerResult};
pub use journal::{Journal, JournalEntry};
pub use kind::OracleKind;
pub use mixer::{NumMixer, Parity, Sampler};
pub use probe::{RequestOutcome, RequestStats, ScenarioReport};
pub use rng::{RandomSource, ScriptedRolls};
pub use seer::{Oracle, Seer};
pub use state::OracleCore;
pub use time_mixed::TimeMixedSeer;
pub use tm_volatile::TimeMixedVolatileSeer;
pub use volatile::VolatileSeer;
