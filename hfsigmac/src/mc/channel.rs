use hfcore::physics::constants::{
    PDG_K_PLUS, PDG_LAMBDA_C_PLUS, PDG_PI_MINUS, PDG_PI_PLUS, PDG_PROTON, PDG_SIGMA_C_0,
    PDG_SIGMA_C_PLUS_PLUS,
};
use serde::{Deserialize, Serialize};

/// Bit positions of the Σc decay channels in `McMatchLabel::flag`.
pub const DECAY_TYPE_SC0_TO_P_K_PI_PI: u8 = 0;
pub const DECAY_TYPE_SCPLUSPLUS_TO_P_K_PI_PI: u8 = 1;

/// Λc+ → pK-π+ final state, shared by both Σc channels.
pub const LC_TO_P_K_PI_DAUGHTERS: [i32; 3] = [PDG_PROTON, -PDG_K_PLUS, PDG_PI_PLUS];

/// The two Σc decay channels, Σc0 → Λc+ π- and Σc++ → Λc+ π+ (and charge conjugates).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SigmacChannel {
    Sc0,
    ScPlusPlus,
}

impl SigmacChannel {
    pub const ALL: [SigmacChannel; 2] = [SigmacChannel::Sc0, SigmacChannel::ScPlusPlus];

    /// Channel of a reconstructed candidate with the given net charge.
    pub fn from_charge(charge: i8) -> Option<Self> {
        match charge {
            0 => Some(SigmacChannel::Sc0),
            2 | -2 => Some(SigmacChannel::ScPlusPlus),
            _ => None,
        }
    }

    pub fn pdg_code(self) -> i32 {
        match self {
            SigmacChannel::Sc0 => PDG_SIGMA_C_0,
            SigmacChannel::ScPlusPlus => PDG_SIGMA_C_PLUS_PLUS,
        }
    }

    pub fn soft_pi_pdg_code(self) -> i32 {
        match self {
            SigmacChannel::Sc0 => PDG_PI_MINUS,
            SigmacChannel::ScPlusPlus => PDG_PI_PLUS,
        }
    }

    /// Final state p K π π, Λc prongs first, then the soft pion.
    pub fn final_state(self) -> [i32; 4] {
        let [p, k, pi] = LC_TO_P_K_PI_DAUGHTERS;
        [p, k, pi, self.soft_pi_pdg_code()]
    }

    /// Immediate daughters Λc π.
    pub fn immediate_daughters(self) -> [i32; 2] {
        [PDG_LAMBDA_C_PLUS, self.soft_pi_pdg_code()]
    }

    /// Unsigned channel flag.
    pub fn flag(self) -> i8 {
        match self {
            SigmacChannel::Sc0 => 1 << DECAY_TYPE_SC0_TO_P_K_PI_PI,
            SigmacChannel::ScPlusPlus => 1 << DECAY_TYPE_SCPLUSPLUS_TO_P_K_PI_PI,
        }
    }
}

/// Monte-Carlo truth label of one candidate or generated particle.
///
/// `flag` is the channel flag signed by the charge conjugation of the match,
/// 0 when unmatched; `origin` is 0 (unmatched), 1 (prompt) or 2 (non-prompt).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McMatchLabel {
    pub flag: i8,
    pub origin: i8,
}

impl McMatchLabel {
    pub const UNMATCHED: McMatchLabel = McMatchLabel { flag: 0, origin: 0 };

    pub fn is_matched(&self) -> bool {
        self.flag != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_from_charge() {
        assert_eq!(SigmacChannel::from_charge(0), Some(SigmacChannel::Sc0));
        assert_eq!(SigmacChannel::from_charge(-2), Some(SigmacChannel::ScPlusPlus));
        assert_eq!(SigmacChannel::from_charge(1), None);
    }

    #[test]
    fn test_patterns() {
        assert_eq!(SigmacChannel::Sc0.final_state(), [2212, -321, 211, -211]);
        assert_eq!(SigmacChannel::ScPlusPlus.final_state(), [2212, -321, 211, 211]);
        assert_eq!(SigmacChannel::Sc0.immediate_daughters(), [4122, -211]);
        assert_eq!(SigmacChannel::Sc0.flag(), 1);
        assert_eq!(SigmacChannel::ScPlusPlus.flag(), 2);
    }
}
