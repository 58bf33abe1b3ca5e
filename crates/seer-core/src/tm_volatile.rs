//! Time-mixed volatile seers.
//!
//! Both facets run over one [`OracleCore`] in a fixed order: the caller's
//! message replaces the hidden message, the time-mixed request runs (dead
//! check, flip and death tracking, case mixing), and the rejection roll is
//! applied last. The rejection roll happens on every call, dead or alive.

use rand::rngs::StdRng;

use crate::error::SeerResult;
use crate::kind::OracleKind;
use crate::rng::{self, RandomSource};
use crate::seer::Oracle;
use crate::state::OracleCore;
use crate::{time_mixed, volatile};

/// The merged request over a single core and a single random source.
pub fn request<R: RandomSource + ?Sized>(core: &mut OracleCore, message: &mut String, rng: &mut R) {
    core.set_message(message.as_str());
    time_mixed::request(core, message, rng);
    volatile::reject(message, rng);
}

/// A seer that dies, mixes case, rejects randomly and takes caller messages.
#[derive(Debug, Clone)]
pub struct TimeMixedVolatileSeer<R = StdRng> {
    core: OracleCore,
    rng: R,
}

impl TimeMixedVolatileSeer<StdRng> {
    /// Create a seer seeded from OS entropy.
    pub fn new(q: u32) -> SeerResult<Self> {
        Self::with_rng(q, rng::seeded(None))
    }

    /// Create a seer with a reproducible seed.
    pub fn seeded(q: u32, seed: u64) -> SeerResult<Self> {
        Self::with_rng(q, rng::seeded(Some(seed)))
    }
}

impl<R: RandomSource> TimeMixedVolatileSeer<R> {
    /// Create a seer drawing from `rng`.
    pub fn with_rng(q: u32, rng: R) -> SeerResult<Self> {
        Ok(Self {
            core: OracleCore::new(q)?,
            rng,
        })
    }

    /// The shared state.
    pub fn core(&self) -> &OracleCore {
        &self.core
    }

    /// Whether the seer has died.
    pub fn is_dead(&self) -> bool {
        self.core.is_dead()
    }
}

impl<R: RandomSource> Oracle for TimeMixedVolatileSeer<R> {
    fn request(&mut self, message: &mut String) {
        request(&mut self.core, message, &mut self.rng);
    }

    fn active(&self) -> bool {
        !self.core.is_dead() && self.core.is_flagged_active()
    }

    fn kind(&self) -> OracleKind {
        OracleKind::TimeMixedVolatileSeer
    }
}
