//! The combined oracle: a sampler and a time-mixed volatile seer in one.
//!
//! Three independently evolving substates gate every call:
//!
//! - `dead`, reached after `K * 2` flips of the seer facet and never undone;
//! - the seer's active flag, toggled every `Q` requests;
//! - the countdown, spent by every effective ping or request and never
//!   replenished.
//!
//! The oracle is active only while it is alive, flagged active, and has
//! countdown left. Both facets spend the same countdown, so pings and
//! requests compete for one budget.
//!
//! ```text
//!            Q requests               Q requests
//!   ALIVE_ON ----------> ALIVE_OFF ----------> ALIVE_ON ...
//!      |  \                  |
//!      |   countdown = 0     | flips = K * 2
//!      v                     v
//!   EXHAUSTED              DEAD
//! ```

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::OracleConfig;
use crate::error::SeerResult;
use crate::kind::OracleKind;
use crate::mixer::{Countdown, Parity, ParityController, Sampler, require_buffer};
use crate::rng::{self, RandomSource};
use crate::seer::Oracle;
use crate::state::OracleCore;
use crate::{time_mixed, volatile};

/// Where a combined oracle is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Alive, flagged active, countdown left: calls are effective.
    AliveOn,
    /// Alive and countdown left, but flagged inactive.
    AliveOff,
    /// Countdown spent. Terminal.
    Exhausted,
    /// Flip limit reached. Terminal.
    Dead,
}

impl Phase {
    /// Whether no call can ever make the oracle active again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Dead)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AliveOn => write!(f, "alive (on)"),
            Self::AliveOff => write!(f, "alive (off)"),
            Self::Exhausted => write!(f, "exhausted"),
            Self::Dead => write!(f, "dead"),
        }
    }
}

/// A point-in-time view of a combined oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleStatus {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Current output controller state.
    pub parity: Parity,
    /// Countdown ticks left.
    pub countdown: u32,
    /// Seer flips so far.
    pub flips: u32,
    /// Flips at which the oracle dies.
    pub lifetime_flips: u32,
    /// Output controller changes so far.
    pub controller_changes: u32,
}

/// A sampler and a time-mixed volatile seer sharing one state, one
/// countdown and one random source.
#[derive(Debug, Clone)]
pub struct CombinedOracle<R = StdRng> {
    core: OracleCore,
    controller: ParityController,
    countdown: Countdown,
    rng: R,
}

impl CombinedOracle<StdRng> {
    /// Create an oracle with the default dataset and countdown, seeded from
    /// OS entropy.
    pub fn new(q: u32) -> SeerResult<Self> {
        Self::from_config(&OracleConfig::default().with_flip_threshold(q))
    }

    /// Create an oracle over `dataset` with the default countdown.
    pub fn with_dataset(q: u32, dataset: Vec<i32>) -> SeerResult<Self> {
        Self::from_config(
            &OracleConfig::default()
                .with_flip_threshold(q)
                .with_dataset(dataset),
        )
    }

    /// Create an oracle from a configuration.
    pub fn from_config(config: &OracleConfig) -> SeerResult<Self> {
        Self::with_rng(config, rng::seeded(config.seed))
    }
}

impl<R: RandomSource> CombinedOracle<R> {
    /// Create an oracle drawing from `rng`. The configured seed is ignored.
    pub fn with_rng(config: &OracleConfig, rng: R) -> SeerResult<Self> {
        Ok(Self {
            core: OracleCore::new(config.flip_threshold)?,
            controller: ParityController::new(config.dataset.clone()),
            countdown: Countdown::new(config.countdown),
            rng,
        })
    }

    /// Alive, flagged active, and countdown left.
    pub fn is_active(&self) -> bool {
        !self.core.is_dead() && self.core.is_flagged_active() && !self.countdown.is_exhausted()
    }

    /// Whether the flip limit has been reached.
    pub fn is_dead(&self) -> bool {
        self.core.is_dead()
    }

    /// Countdown ticks left.
    pub fn countdown(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Seer flips so far. Distinct from [`Sampler::state_change_count`],
    /// which counts output controller changes.
    pub fn flip_count(&self) -> u32 {
        self.core.mortality().state_change_count()
    }

    /// The shared seer state.
    pub fn core(&self) -> &OracleCore {
        &self.core
    }

    /// The output controller.
    pub fn controller(&self) -> &ParityController {
        &self.controller
    }

    /// Current lifecycle phase. Death takes precedence over exhaustion.
    pub fn phase(&self) -> Phase {
        if self.core.is_dead() {
            Phase::Dead
        } else if self.countdown.is_exhausted() {
            Phase::Exhausted
        } else if self.core.is_flagged_active() {
            Phase::AliveOn
        } else {
            Phase::AliveOff
        }
    }

    /// Snapshot the observable state.
    pub fn status(&self) -> OracleStatus {
        OracleStatus {
            phase: self.phase(),
            parity: self.controller.parity(),
            countdown: self.countdown.remaining(),
            flips: self.flip_count(),
            lifetime_flips: self.core.mortality().lifetime_flips(),
            controller_changes: self.controller.state_change_count(),
        }
    }
}

impl<R: RandomSource> Oracle for CombinedOracle<R> {
    /// Replace the hidden message, then advance the seer facet unless the
    /// oracle is dead or exhausted. A request made while active spends one
    /// countdown tick; one made while flagged inactive only advances the
    /// flip counter. The rejection roll is applied last, on every call.
    fn request(&mut self, message: &mut String) {
        self.core.set_message(message.as_str());
        if self.core.is_dead() || self.countdown.is_exhausted() {
            message.clear();
        } else {
            let was_active = self.is_active();
            time_mixed::advance(&mut self.core, message, &mut self.rng);
            if was_active {
                self.countdown.tick();
            }
        }
        volatile::reject(message, &mut self.rng);
    }

    fn active(&self) -> bool {
        self.is_active()
    }

    fn kind(&self) -> OracleKind {
        OracleKind::CombinedOracle
    }
}

impl<R: RandomSource> Sampler for CombinedOracle<R> {
    fn controller_state(&self) -> Parity {
        self.controller.parity()
    }

    fn set_controller_state(&mut self, parity: Parity) -> bool {
        self.controller.set_parity(parity)
    }

    fn check_state_valid(&self) -> bool {
        self.controller.is_valid()
    }

    fn gen_rand_num(&mut self) -> Option<i32> {
        self.controller.sample(&mut self.rng)
    }

    fn state_change_count(&self) -> u32 {
        self.controller.state_change_count()
    }

    fn is_active(&self) -> bool {
        CombinedOracle::is_active(self)
    }

    fn ping(&mut self, buffer: &mut [i32]) -> SeerResult<bool> {
        require_buffer(buffer)?;
        if !self.is_active() || !self.controller.fill(buffer, &mut self.rng) {
            return Ok(false);
        }
        self.countdown.tick();
        Ok(true)
    }

    fn kind(&self) -> OracleKind {
        OracleKind::CombinedOracle
    }
}
