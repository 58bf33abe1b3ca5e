//! Randomness sources for oracle facets.
//!
//! Every facet draws through [`RandomSource`], so a single generator can be
//! shared by all facets of an oracle and swapped for a scripted one in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Highest face of the `0..=9` roll used for case mixing and rejection.
pub const MAX_ROLL: i32 = 9;

/// A source of uniformly distributed integers.
pub trait RandomSource {
    /// Draw a uniform integer in `low..=high`.
    fn roll(&mut self, low: i32, high: i32) -> i32;
}

impl RandomSource for StdRng {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        self.random_range(low..=high)
    }
}

/// Build the default generator, seeded when a seed is given and from OS
/// entropy otherwise.
pub fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Replays a fixed cyclic sequence of draws.
///
/// Each draw is clamped into the requested range, so a script written for
/// `0..=9` rolls stays meaningful when an oracle asks for a dataset index.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<i32>,
    cursor: usize,
}

impl ScriptedRolls {
    /// Create a script. An empty script always yields the low bound.
    pub fn new(rolls: impl Into<Vec<i32>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: 0,
        }
    }

    /// A script that always draws `value`.
    pub fn constant(value: i32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRolls {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        let value = if self.rolls.is_empty() {
            low
        } else {
            self.rolls[self.cursor % self.rolls.len()]
        };
        self.cursor += 1;
        value.clamp(low, high)
    }
}
