use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::physics::constants::MASS_LAMBDA_C_PLUS;
use crate::physics::kinematics;

/// Bit position of the Λc+ → pK-π+ decay type in `LcCandidate::hf_flag`.
pub const DECAY_TYPE_LC_TO_P_K_PI: u8 = 1;

/// A reconstructed three-prong Λc± candidate, produced upstream.
///
/// Two mass hypotheses are evaluated for the same three tracks:
/// p K π (prong order) and π K p (reversed order).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LcCandidate {
    pub global_index: i64,
    pub collision_id: i64,
    /// Global indices of the three prong tracks
    pub prong_ids: [i64; 3],
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    /// Decay-type bitmask
    pub hf_flag: u8,
    pub is_sel_lc_to_p_k_pi: i32,
    pub is_sel_lc_to_pi_k_p: i32,
    pub inv_mass_lc_to_p_k_pi: f64,
    pub inv_mass_lc_to_pi_k_p: f64,
    /// Reconstruction-level MC flag, signed decay-type bit (simulation only)
    #[serde(default)]
    pub flag_mc_match_rec: i8,
}

impl LcCandidate {
    #[inline]
    pub fn momentum(&self) -> Vector3<f64> {
        Vector3::new(self.px, self.py, self.pz)
    }

    /// Rapidity under the Λc mass hypothesis.
    pub fn y(&self) -> f64 {
        kinematics::rapidity(&self.momentum(), MASS_LAMBDA_C_PLUS)
    }

    #[inline]
    pub fn has_decay_type(&self, decay_type: u8) -> bool {
        self.hf_flag & (1 << decay_type) != 0
    }

    /// Selected under at least one of the two hypotheses with flag >= `threshold`.
    #[inline]
    pub fn is_selected(&self, threshold: i32) -> bool {
        self.is_sel_lc_to_p_k_pi >= threshold || self.is_sel_lc_to_pi_k_p >= threshold
    }
}
