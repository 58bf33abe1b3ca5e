//! Countdown-bearing dataset samplers.
//!
//! A sampler holds a dataset of integers and an output controller that
//! selects which parity it may emit. Each successful ping fills the caller's
//! buffer with random dataset values of that parity and spends one tick of a
//! countdown. Once the countdown reaches zero the sampler can no longer be
//! pinged.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::OracleConfig;
use crate::error::{SeerError, SeerResult};
use crate::kind::OracleKind;
use crate::rng::{self, RandomSource};

/// Which values the output controller lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Parity {
    /// Any value.
    #[default]
    Mix,
    /// Even values only.
    Even,
    /// Odd values only.
    Odd,
}

impl Parity {
    /// All parities in driver order.
    pub fn all() -> &'static [Self] {
        &[Self::Mix, Self::Even, Self::Odd]
    }

    /// The controller state name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mix => "MIX",
            Self::Even => "EVEN",
            Self::Odd => "ODD",
        }
    }

    /// Whether `value` may be emitted under this parity.
    pub fn admits(self, value: i32) -> bool {
        match self {
            Self::Mix => true,
            Self::Even => value % 2 == 0,
            Self::Odd => value % 2 != 0,
        }
    }

    /// Parse a parity from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mix" | "mixed" | "any" => Some(Self::Mix),
            "even" => Some(Self::Even),
            "odd" => Some(Self::Odd),
            _ => None,
        }
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A decrementing budget. Exhaustion is permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// Create a countdown with `remaining` ticks.
    pub fn new(remaining: u32) -> Self {
        Self { remaining }
    }

    /// Ticks left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether no ticks remain.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Spend one tick. Returns false if already exhausted.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            tracing::debug!("countdown exhausted");
        }
        true
    }
}

/// The dataset and output controller behind every sampler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityController {
    parity: Parity,
    dataset: Vec<i32>,
    state_change_count: u32,
}

impl ParityController {
    /// Create a controller in [`Parity::Mix`] over `dataset`.
    pub fn new(dataset: Vec<i32>) -> Self {
        Self {
            parity: Parity::Mix,
            dataset,
            state_change_count: 0,
        }
    }

    /// Current parity.
    pub fn parity(&self) -> Parity {
        self.parity
    }

    /// The dataset values are drawn from.
    pub fn dataset(&self) -> &[i32] {
        &self.dataset
    }

    /// How many times the parity has been changed.
    pub fn state_change_count(&self) -> u32 {
        self.state_change_count
    }

    /// Switch parity. Setting the parity already in effect changes nothing
    /// and returns false.
    pub fn set_parity(&mut self, parity: Parity) -> bool {
        if parity == self.parity {
            return false;
        }
        self.parity = parity;
        self.state_change_count += 1;
        true
    }

    /// Whether the dataset holds any value of the current parity.
    pub fn is_valid(&self) -> bool {
        self.dataset.iter().any(|v| self.parity.admits(*v))
    }

    fn candidates(&self) -> Vec<i32> {
        self.dataset
            .iter()
            .copied()
            .filter(|v| self.parity.admits(*v))
            .collect()
    }

    /// Draw one value of the current parity.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<i32> {
        let candidates = self.candidates();
        pick(&candidates, rng)
    }

    /// Fill every slot of `buffer` with values of the current parity.
    /// Leaves `buffer` untouched and returns false if there are none.
    pub fn fill<R: RandomSource + ?Sized>(&self, buffer: &mut [i32], rng: &mut R) -> bool {
        let candidates = self.candidates();
        if candidates.is_empty() {
            return false;
        }
        for slot in buffer.iter_mut() {
            if let Some(v) = pick(&candidates, rng) {
                *slot = v;
            }
        }
        true
    }
}

fn pick<R: RandomSource + ?Sized>(candidates: &[i32], rng: &mut R) -> Option<i32> {
    let last = candidates.len().checked_sub(1)?;
    let idx = rng.roll(0, last as i32) as usize;
    candidates.get(idx).copied()
}

pub(crate) fn require_buffer(buffer: &[i32]) -> SeerResult<()> {
    if buffer.is_empty() {
        return Err(SeerError::PreconditionViolated(
            "ping buffer must hold at least one value".to_string(),
        ));
    }
    Ok(())
}

/// Anything that can be pinged for dataset samples.
///
/// As with [`crate::Oracle`], operational failure is `Ok(false)`: an
/// exhausted, inactive or parity-starved sampler declines without error.
pub trait Sampler {
    /// Current output controller state.
    fn controller_state(&self) -> Parity;

    /// Switch the output controller. Returns false if already in `parity`.
    fn set_controller_state(&mut self, parity: Parity) -> bool;

    /// Name of the current controller state.
    fn controller_state_name(&self) -> &'static str {
        self.controller_state().name()
    }

    /// Whether the dataset holds values of the current parity.
    fn check_state_valid(&self) -> bool;

    /// Draw one value of the current parity without spending the countdown.
    fn gen_rand_num(&mut self) -> Option<i32>;

    /// How many times the output controller has changed.
    fn state_change_count(&self) -> u32;

    /// Whether a ping could currently succeed, parity aside.
    fn is_active(&self) -> bool;

    /// Fill `buffer` with samples and spend one countdown tick.
    ///
    /// Fails with [`SeerError::PreconditionViolated`] on an empty buffer.
    /// Returns `Ok(false)` and leaves `buffer` untouched if the sampler is
    /// inactive or the parity has no values.
    fn ping(&mut self, buffer: &mut [i32]) -> SeerResult<bool>;

    /// The variant tag.
    fn kind(&self) -> OracleKind;
}

/// A standalone sampler.
#[derive(Debug, Clone)]
pub struct NumMixer<R = StdRng> {
    controller: ParityController,
    countdown: Countdown,
    rng: R,
}

impl NumMixer<StdRng> {
    /// Create a sampler over the default dataset and countdown, seeded from
    /// OS entropy.
    pub fn new() -> Self {
        let config = OracleConfig::default();
        Self::with_rng(config.dataset, config.countdown, rng::seeded(None))
    }

    /// Create a sampler from a configuration. The flip threshold is unused.
    pub fn from_config(config: &OracleConfig) -> Self {
        Self::with_rng(
            config.dataset.clone(),
            config.countdown,
            rng::seeded(config.seed),
        )
    }
}

impl Default for NumMixer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> NumMixer<R> {
    /// Create a sampler drawing from `rng`.
    pub fn with_rng(dataset: Vec<i32>, countdown: u32, rng: R) -> Self {
        Self {
            controller: ParityController::new(dataset),
            countdown: Countdown::new(countdown),
            rng,
        }
    }

    /// The output controller.
    pub fn controller(&self) -> &ParityController {
        &self.controller
    }

    /// Ticks left before the sampler goes quiet.
    pub fn countdown(&self) -> u32 {
        self.countdown.remaining()
    }
}

impl<R: RandomSource> Sampler for NumMixer<R> {
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
        !self.countdown.is_exhausted()
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
        OracleKind::NumMixer
    }
}

#[cfg(test)]
mod tests {
    use crate::rng::ScriptedRolls;
    use super::*;

    fn mixer(dataset: Vec<i32>, countdown: u32) -> NumMixer<ScriptedRolls> {
        NumMixer::with_rng(dataset, countdown, ScriptedRolls::new(vec![0, 1, 2, 3]))
    }

    #[test]
    fn parity_admits() {
        assert!(Parity::Mix.admits(3));
        assert!(Parity::Even.admits(-4));
        assert!(!Parity::Even.admits(7));
        assert!(Parity::Odd.admits(-3));
        assert!(!Parity::Odd.admits(0));
    }

    #[test]
    fn parity_parse_and_display() {
        assert_eq!(Parity::parse("EVEN"), Some(Parity::Even));
        assert_eq!(Parity::parse(" odd "), Some(Parity::Odd));
        assert_eq!(Parity::parse("any"), Some(Parity::Mix));
        assert_eq!(Parity::parse("prime"), None);
        assert_eq!(Parity::Mix.to_string(), "MIX");
    }

    #[test]
    fn countdown_ticks_to_zero() {
        let mut c = Countdown::new(2);
        assert!(c.tick());
        assert!(c.tick());
        assert!(c.is_exhausted());
        assert!(!c.tick());
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn set_controller_state_same_is_noop() {
        let mut m = mixer(vec![1, 2], 5);
        assert!(!m.set_controller_state(Parity::Mix));
        assert_eq!(m.state_change_count(), 0);
        assert!(m.set_controller_state(Parity::Even));
        assert_eq!(m.controller_state_name(), "EVEN");
        assert_eq!(m.state_change_count(), 1);
    }

    #[test]
    fn ping_fills_with_parity() {
        let mut m = mixer(vec![1, 2, 3, 4, 5, 6], 5);
        m.set_controller_state(Parity::Even);
        let mut buf = [0; 4];
        assert!(m.ping(&mut buf).unwrap());
        assert_eq!(buf, [2, 4, 6, 6]);
        assert_eq!(m.countdown(), 4);
    }

    #[test]
    fn ping_fails_without_parity() {
        let mut m = mixer(vec![2, 4], 5);
        m.set_controller_state(Parity::Odd);
        assert!(!m.check_state_valid());
        let mut buf = [-1; 3];
        assert!(!m.ping(&mut buf).unwrap());
        assert_eq!(buf, [-1; 3]);
        assert_eq!(m.countdown(), 5);
    }

    #[test]
    fn ping_stops_at_countdown() {
        let mut m = mixer(vec![1], 3);
        let mut buf = [0; 1];
        for _ in 0..3 {
            assert!(m.ping(&mut buf).unwrap());
        }
        assert!(!m.is_active());
        let mut buf = [9; 2];
        assert!(!m.ping(&mut buf).unwrap());
        assert_eq!(buf, [9; 2]);
    }

    #[test]
    fn empty_buffer_is_precondition_violation() {
        let mut m = mixer(vec![1], 3);
        let err = m.ping(&mut []).unwrap_err();
        assert!(matches!(err, SeerError::PreconditionViolated(_)));
        assert_eq!(m.countdown(), 3);
    }

    #[test]
    fn gen_rand_num_respects_parity() {
        let mut m = NumMixer::with_rng((1..=100).collect(), 5, rng::seeded(Some(1)));
        m.set_controller_state(Parity::Odd);
        for _ in 0..100 {
            let v = m.gen_rand_num().unwrap();
            assert!(v % 2 != 0);
        }
        assert_eq!(m.countdown(), 5);
    }

    #[test]
    fn empty_dataset_never_pings() {
        let mut m = mixer(Vec::new(), 3);
        assert!(!m.check_state_valid());
        assert_eq!(m.gen_rand_num(), None);
        assert!(!m.ping(&mut [0; 2]).unwrap());
    }

    #[test]
    fn default_mixer() {
        let m = NumMixer::new();
        assert_eq!(m.controller().dataset().len(), 100);
        assert_eq!(m.countdown(), OracleConfig::default().countdown);
        assert_eq!(m.kind(), OracleKind::NumMixer);
    }
}
