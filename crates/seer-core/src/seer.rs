//! The base seer and the [`Oracle`] trait every seer variant implements.
//!
//! A seer starts active and reveals its hidden message on request. Every
//! `Q` requests it flips between active and inactive. The flip is evaluated
//! after the message is retrieved, so the request that triggers a flip still
//! sees the state it started in.

use crate::error::SeerResult;
use crate::kind::OracleKind;
use crate::state::OracleCore;

/// Anything that answers seer-style requests.
///
/// Failure is not an error here: an inactive, dead or rejecting oracle
/// simply leaves `message` empty. Callers should expect empty answers often.
pub trait Oracle {
    /// Ask for the hidden message. On return `message` holds the answer, or
    /// is empty if the oracle declined.
    fn request(&mut self, message: &mut String);

    /// Whether the next request can be answered (ignoring random rejection).
    fn active(&self) -> bool;

    /// The variant tag.
    fn kind(&self) -> OracleKind;

    /// The diagnostic name of the variant.
    fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Reveal the hidden message if the core is active, then count the request.
///
/// Returns true if this request flipped the active flag.
pub fn request(core: &mut OracleCore, message: &mut String) -> bool {
    if core.is_flagged_active() {
        core.message().clone_into(message);
    } else {
        message.clear();
    }
    core.count_request()
}

/// A plain seer.
#[derive(Debug, Clone)]
pub struct Seer {
    core: OracleCore,
}

impl Seer {
    /// Create a seer that flips every `q` requests.
    pub fn new(q: u32) -> SeerResult<Self> {
        Ok(Self {
            core: OracleCore::new(q)?,
        })
    }

    /// The shared state.
    pub fn core(&self) -> &OracleCore {
        &self.core
    }
}

impl Oracle for Seer {
    fn request(&mut self, message: &mut String) {
        request(&mut self.core, message);
    }

    fn active(&self) -> bool {
        self.core.is_flagged_active()
    }

    fn kind(&self) -> OracleKind {
        OracleKind::Seer
    }
}
