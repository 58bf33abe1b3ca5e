//! Volatile seers: random rejection and caller-supplied messages.
//!
//! Every request first stores the caller's message as the new hidden message,
//! then asks the underlying seer, then rolls `0..=9`. A roll below
//! [`REJECT_CHANCE`] empties the answer whatever the seer said.

use rand::rngs::StdRng;

use crate::error::SeerResult;
use crate::kind::OracleKind;
use crate::rng::{self, MAX_ROLL, RandomSource};
use crate::seer::{self, Oracle};
use crate::state::OracleCore;

/// Out of ten, how often a request is rejected.
pub const REJECT_CHANCE: i32 = 5;

/// Roll for rejection and empty `message` on a hit. Returns true if rejected.
pub fn reject<R: RandomSource + ?Sized>(message: &mut String, rng: &mut R) -> bool {
    if rng.roll(0, MAX_ROLL) < REJECT_CHANCE {
        if !message.is_empty() {
            tracing::trace!("request rejected");
        }
        message.clear();
        return true;
    }
    false
}

/// The volatile request: replace the message, ask the seer, roll rejection.
pub fn request<R: RandomSource + ?Sized>(core: &mut OracleCore, message: &mut String, rng: &mut R) {
    core.set_message(message.as_str());
    seer::request(core, message);
    reject(message, rng);
}

/// A seer that randomly rejects requests.
#[derive(Debug, Clone)]
pub struct VolatileSeer<R = StdRng> {
    core: OracleCore,
    rng: R,
}

impl VolatileSeer<StdRng> {
    /// Create a volatile seer seeded from OS entropy.
    pub fn new(q: u32) -> SeerResult<Self> {
        Self::with_rng(q, rng::seeded(None))
    }

    /// Create a volatile seer with a reproducible seed.
    pub fn seeded(q: u32, seed: u64) -> SeerResult<Self> {
        Self::with_rng(q, rng::seeded(Some(seed)))
    }
}

impl<R: RandomSource> VolatileSeer<R> {
    /// Create a volatile seer drawing from `rng`.
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
}

impl<R: RandomSource> Oracle for VolatileSeer<R> {
    fn request(&mut self, message: &mut String) {
        request(&mut self.core, message, &mut self.rng);
    }

    fn active(&self) -> bool {
        self.core.is_flagged_active()
    }

    fn kind(&self) -> OracleKind {
        OracleKind::VolatileSeer
    }
}
