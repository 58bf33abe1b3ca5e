//! Static identification tags for oracle variants.

use serde::{Deserialize, Serialize};

use crate::error::{SeerError, SeerResult};

/// Which oracle variant an object is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OracleKind {
    /// Plain seer: flips every Q requests.
    Seer,
    /// Seer that dies after a bounded number of flips and mixes case.
    TimeMixedSeer,
    /// Seer that randomly rejects requests.
    VolatileSeer,
    /// Both of the above over one shared state.
    TimeMixedVolatileSeer,
    /// Countdown-bearing dataset sampler.
    NumMixer,
    /// Sampler and time-mixed volatile seer unified.
    CombinedOracle,
}

impl OracleKind {
    /// The diagnostic name of the variant.
    pub fn name(self) -> &'static str {
        match self {
            Self::Seer => "seer",
            Self::TimeMixedSeer => "tmSeer",
            Self::VolatileSeer => "volatileSeer",
            Self::TimeMixedVolatileSeer => "tmVolatileSeer",
            Self::NumMixer => "numMixer",
            Self::CombinedOracle => "numMixerTmVolatileSeer",
        }
    }

    /// All variants that answer `request`.
    pub fn seers() -> &'static [Self] {
        &[
            Self::Seer,
            Self::TimeMixedSeer,
            Self::VolatileSeer,
            Self::TimeMixedVolatileSeer,
            Self::CombinedOracle,
        ]
    }

    /// Parse a variant from a user-supplied string.
    ///
    /// Accepts the diagnostic name in any case, plus kebab-case aliases.
    pub fn parse(s: &str) -> SeerResult<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "seer" => Ok(Self::Seer),
            "tmseer" | "tm-seer" | "time-mixed" => Ok(Self::TimeMixedSeer),
            "volatileseer" | "volatile-seer" | "volatile" => Ok(Self::VolatileSeer),
            "tmvolatileseer" | "tm-volatile-seer" | "tm-volatile" => {
                Ok(Self::TimeMixedVolatileSeer)
            }
            "nummixer" | "num-mixer" | "mixer" => Ok(Self::NumMixer),
            "nummixertmvolatileseer" | "combined" => Ok(Self::CombinedOracle),
            other => Err(SeerError::UnknownVariant(other.to_string())),
        }
    }
}

impl std::fmt::Display for OracleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(OracleKind::Seer.name(), "seer");
        assert_eq!(
            OracleKind::CombinedOracle.to_string(),
            "numMixerTmVolatileSeer"
        );
    }

    #[test]
    fn parse_round_trips_names() {
        for kind in OracleKind::seers() {
            assert_eq!(OracleKind::parse(kind.name()).unwrap(), *kind);
        }
        assert_eq!(
            OracleKind::parse(OracleKind::NumMixer.name()).unwrap(),
            OracleKind::NumMixer
        );
    }

    #[test]
    fn parse_aliases() {
        assert_eq!(
            OracleKind::parse("tm_volatile").unwrap(),
            OracleKind::TimeMixedVolatileSeer
        );
        assert_eq!(
            OracleKind::parse(" Combined ").unwrap(),
            OracleKind::CombinedOracle
        );
    }

    #[test]
    fn parse_unknown() {
        let err = OracleKind::parse("prophet").unwrap_err();
        assert!(matches!(err, SeerError::UnknownVariant(ref s) if s == "prophet"));
    }
}
