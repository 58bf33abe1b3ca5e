//! Time-mixed seers: bounded lifetime plus case mixing.
//!
//! A time-mixed seer dies once it has flipped `K * 2` times, where
//! `K = Q * 2`. A dead seer answers every request with an empty message and
//! never changes state again. While alive, every non-empty answer has the case
//! of each character toggled with a 30% chance.

use rand::rngs::StdRng;

use crate::error::SeerResult;
use crate::kind::OracleKind;
use crate::rng::{self, MAX_ROLL, RandomSource};
use crate::seer::{self, Oracle};
use crate::state::OracleCore;

/// Out of ten, how often a character has its case toggled.
pub const MIX_CHANCE: i32 = 3;

/// Toggle the ASCII case of each character with a 30% chance.
///
/// Every character consumes one draw, including characters that have no
/// case. The length of `text` never changes.
pub fn mix_case<R: RandomSource + ?Sized>(text: &mut String, rng: &mut R) {
    let mixed: String = text
        .chars()
        .map(|c| {
            if rng.roll(0, MAX_ROLL) < MAX_ROLL + 1 - MIX_CHANCE {
                c
            } else if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect();
    *text = mixed;
}

/// Delegate to the seer request, track flips toward death, and mix the case
/// of a non-empty answer. Callers decide beforehand whether the core may be
/// advanced at all.
///
/// Returns true if the request flipped the active flag.
pub(crate) fn advance<R: RandomSource + ?Sized>(
    core: &mut OracleCore,
    message: &mut String,
    rng: &mut R,
) -> bool {
    let flipped = seer::request(core, message);
    if flipped {
        core.record_flip();
    }
    if !message.is_empty() {
        mix_case(message, rng);
    }
    flipped
}

/// The time-mixed request: dead cores answer empty without changing state,
/// live cores advance.
pub fn request<R: RandomSource + ?Sized>(core: &mut OracleCore, message: &mut String, rng: &mut R) {
    if core.is_dead() {
        message.clear();
    } else {
        advance(core, message, rng);
    }
}

/// A seer with a bounded lifetime that mixes the case of its answers.
#[derive(Debug, Clone)]
pub struct TimeMixedSeer<R = StdRng> {
    core: OracleCore,
    rng: R,
}

impl TimeMixedSeer<StdRng> {
    /// Create a time-mixed seer seeded from OS entropy.
    pub fn new(q: u32) -> SeerResult<Self> {
        Self::with_rng(q, rng::seeded(None))
    }

    /// Create a time-mixed seer with a reproducible seed.
    pub fn seeded(q: u32, seed: u64) -> SeerResult<Self> {
        Self::with_rng(q, rng::seeded(Some(seed)))
    }
}

impl<R: RandomSource> TimeMixedSeer<R> {
    /// Create a time-mixed seer drawing from `rng`.
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

impl<R: RandomSource> Oracle for TimeMixedSeer<R> {
    fn request(&mut self, message: &mut String) {
        request(&mut self.core, message, &mut self.rng);
    }

    fn active(&self) -> bool {
        !self.core.is_dead() && self.core.is_flagged_active()
    }

    fn kind(&self) -> OracleKind {
        OracleKind::TimeMixedSeer
    }
}
