//! Shared oracle state.
//!
//! Every seer variant owns exactly one [`OracleCore`]. The facet functions in
//! [`crate::seer`], [`crate::time_mixed`] and [`crate::volatile`] all operate
//! on a `&mut OracleCore`, so the active flag, hidden message and flip
//! counters are never duplicated between facets.

use serde::{Deserialize, Serialize};

use crate::error::{SeerError, SeerResult};

/// The message a seer reveals until a caller replaces it.
pub const DEFAULT_MESSAGE: &str = "Be Sure To Drink Your Ovaltine.";

/// Multiplier from the flip threshold `Q` to the cycle limit `K`.
pub const CYCLE_MULTIPLIER: u32 = 2;

/// Dead/alive bookkeeping for variants with a bounded lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mortality {
    dead: bool,
    state_change_count: u32,
    cycle_limit: u32,
}

impl Mortality {
    fn new(flip_threshold: u32) -> Self {
        Self {
            dead: false,
            state_change_count: 0,
            cycle_limit: flip_threshold.saturating_mul(CYCLE_MULTIPLIER),
        }
    }

    /// Whether the terminal dead state has been reached.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Flips recorded so far.
    pub fn state_change_count(&self) -> u32 {
        self.state_change_count
    }

    /// The cycle limit `K` (`Q * 2`).
    pub fn cycle_limit(&self) -> u32 {
        self.cycle_limit
    }

    /// Flips after which the owner dies (`K * 2`).
    pub fn lifetime_flips(&self) -> u32 {
        self.cycle_limit.saturating_mul(2)
    }

    /// Record one flip. Returns true if this flip killed the owner.
    pub(crate) fn record_flip(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.state_change_count += 1;
        if self.state_change_count == self.lifetime_flips() {
            self.dead = true;
            tracing::debug!(flips = self.state_change_count, "oracle died");
            return true;
        }
        false
    }
}

/// The state shared by every facet of an oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleCore {
    active: bool,
    request_count: u32,
    flip_threshold: u32,
    message: String,
    mortality: Mortality,
}

impl OracleCore {
    /// Create an active core that flips every `flip_threshold` requests.
    pub fn new(flip_threshold: u32) -> SeerResult<Self> {
        if flip_threshold == 0 {
            return Err(SeerError::InvalidArgument(
                "flip threshold must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            active: true,
            request_count: 0,
            flip_threshold,
            message: DEFAULT_MESSAGE.to_string(),
            mortality: Mortality::new(flip_threshold),
        })
    }

    /// The raw active flag, ignoring death and countdowns.
    pub fn is_flagged_active(&self) -> bool {
        self.active
    }

    /// Requests since the last flip (always below the threshold).
    pub fn request_count(&self) -> u32 {
        self.request_count
    }

    /// Requests between flips (`Q`).
    pub fn flip_threshold(&self) -> u32 {
        self.flip_threshold
    }

    /// The hidden message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replace the hidden message.
    pub fn set_message(&mut self, message: &str) {
        message.clone_into(&mut self.message);
    }

    /// Lifetime bookkeeping.
    pub fn mortality(&self) -> &Mortality {
        &self.mortality
    }

    /// Whether the core has died.
    pub fn is_dead(&self) -> bool {
        self.mortality.dead
    }

    /// Count one request, flipping the active flag when the threshold is
    /// reached. Returns true if the flag flipped.
    pub(crate) fn count_request(&mut self) -> bool {
        self.request_count += 1;
        if self.request_count == self.flip_threshold {
            self.active = !self.active;
            self.request_count = 0;
            tracing::trace!(active = self.active, "oracle flipped");
            return true;
        }
        false
    }

    pub(crate) fn record_flip(&mut self) -> bool {
        self.mortality.record_flip()
    }
}
