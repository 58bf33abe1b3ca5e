//! Construction parameters for oracles.

/// Default requests between flips.
pub const DEFAULT_FLIP_THRESHOLD: u32 = 10;

/// Default countdown for sampler-bearing oracles.
pub const DEFAULT_COUNTDOWN: u32 = 20;

/// Parameters shared by every oracle constructor.
///
/// The flip threshold and the countdown are independent budgets: one paces
/// the seer facet, the other limits how many effective calls a sampler
/// facet will take.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// RNG seed for reproducible runs. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Requests between active/inactive flips (`Q`).
    pub flip_threshold: u32,
    /// Effective calls a sampler-bearing oracle accepts.
    pub countdown: u32,
    /// Values a sampler draws from.
    pub dataset: Vec<i32>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            seed: None,
            flip_threshold: DEFAULT_FLIP_THRESHOLD,
            countdown: DEFAULT_COUNTDOWN,
            dataset: (1..=100).collect(),
        }
    }
}

impl OracleConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the flip threshold `Q`. Zero is rejected when an oracle is built.
    pub fn with_flip_threshold(mut self, q: u32) -> Self {
        self.flip_threshold = q;
        self
    }

    /// Set the countdown.
    pub fn with_countdown(mut self, countdown: u32) -> Self {
        self.countdown = countdown;
        self
    }

    /// Set the sampler dataset.
    pub fn with_dataset(mut self, dataset: Vec<i32>) -> Self {
        self.dataset = dataset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = OracleConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.flip_threshold, 10);
        assert_eq!(cfg.countdown, 20);
        assert_eq!(cfg.dataset.first(), Some(&1));
        assert_eq!(cfg.dataset.last(), Some(&100));
    }

    #[test]
    fn builder_methods() {
        let cfg = OracleConfig::default()
            .with_seed(123)
            .with_flip_threshold(3)
            .with_countdown(7)
            .with_dataset(vec![2, 4]);
        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.flip_threshold, 3);
        assert_eq!(cfg.countdown, 7);
        assert_eq!(cfg.dataset, vec![2, 4]);
    }
}
