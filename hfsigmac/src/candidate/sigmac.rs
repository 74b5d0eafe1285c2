use hfcore::data::candidate::LcCandidate;
use hfcore::physics::constants::{MASS_PI_PLUS, MASS_SIGMA_C_0, MASS_SIGMA_C_PLUS_PLUS};
use hfcore::physics::kinematics;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A Σc0,++ candidate: one Λc candidate paired with one soft-pion track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SigmacCandidate {
    pub collision_id: i64,
    pub px_lc: f64,
    pub py_lc: f64,
    pub pz_lc: f64,
    pub px_soft_pi: f64,
    pub py_soft_pi: f64,
    pub pz_soft_pi: f64,
    /// Global index of the Λc candidate
    pub prong_lc_id: i64,
    /// Global index of the soft-pion track
    pub prong_soft_pi_id: i64,
    /// Decay-type bitmask inherited from the Λc
    pub hf_flag: u8,
    /// 0 or ±2
    pub charge: i8,
    /// Λc Minv(pKπ) within the configured window
    pub status_spread_lc_to_p_k_pi: bool,
    /// Λc Minv(πKp) within the configured window
    pub status_spread_lc_to_pi_k_p: bool,
}

impl SigmacCandidate {
    #[inline]
    pub fn momentum_lc(&self) -> Vector3<f64> {
        Vector3::new(self.px_lc, self.py_lc, self.pz_lc)
    }

    #[inline]
    pub fn momentum_soft_pi(&self) -> Vector3<f64> {
        Vector3::new(self.px_soft_pi, self.py_soft_pi, self.pz_soft_pi)
    }

    #[inline]
    pub fn momentum(&self) -> Vector3<f64> {
        self.momentum_lc() + self.momentum_soft_pi()
    }

    /// PDG mass of the Σc state matching the candidate charge.
    pub fn mass_hypothesis(&self) -> f64 {
        if self.charge == 0 { MASS_SIGMA_C_0 } else { MASS_SIGMA_C_PLUS_PLUS }
    }

    /// Σc invariant mass given the Λc mass, with the soft track as a pion.
    pub fn inv_mass(&self, mass_lc: f64) -> f64 {
        kinematics::inv_mass(
            &[self.momentum_lc(), self.momentum_soft_pi()],
            &[mass_lc, MASS_PI_PLUS],
        )
    }
}

/// Derived columns of a Σc candidate.
///
/// Masses are only filled for the Λc hypotheses that passed the mass window,
/// using the reconstructed Λc mass of that hypothesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SigmacCandidateExt {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub pt: f64,
    pub p: f64,
    pub eta: f64,
    pub phi: f64,
    pub y: f64,
    pub inv_mass_sc_to_p_k_pi_pi: Option<f64>,
    pub inv_mass_sc_to_pi_k_p_pi: Option<f64>,
    /// m(Σc) - m(Λc), pKπ hypothesis
    pub delta_inv_mass_p_k_pi: Option<f64>,
    /// m(Σc) - m(Λc), πKp hypothesis
    pub delta_inv_mass_pi_k_p: Option<f64>,
}

impl SigmacCandidateExt {
    pub fn new(sc: &SigmacCandidate, lc: &LcCandidate) -> Self {
        let mom = sc.momentum();

        let m_p_k_pi = sc
            .status_spread_lc_to_p_k_pi
            .then(|| sc.inv_mass(lc.inv_mass_lc_to_p_k_pi));
        let m_pi_k_p = sc
            .status_spread_lc_to_pi_k_p
            .then(|| sc.inv_mass(lc.inv_mass_lc_to_pi_k_p));

        SigmacCandidateExt {
            px: mom.x,
            py: mom.y,
            pz: mom.z,
            pt: kinematics::pt(&mom),
            p: kinematics::p(&mom),
            eta: kinematics::pseudorapidity(&mom),
            phi: kinematics::phi(&mom),
            y: kinematics::rapidity(&mom, sc.mass_hypothesis()),
            inv_mass_sc_to_p_k_pi_pi: m_p_k_pi,
            inv_mass_sc_to_pi_k_p_pi: m_pi_k_p,
            delta_inv_mass_p_k_pi: m_p_k_pi.map(|m| m - lc.inv_mass_lc_to_p_k_pi),
            delta_inv_mass_pi_k_p: m_pi_k_p.map(|m| m - lc.inv_mass_lc_to_pi_k_p),
        }
    }
}

/// Σc candidates with their derived columns, row-aligned.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SigmacTables {
    pub candidates: Vec<SigmacCandidate>,
    pub candidates_ext: Vec<SigmacCandidateExt>,
}

impl SigmacTables {
    pub fn push(&mut self, sc: SigmacCandidate, lc: &LcCandidate) {
        self.candidates_ext.push(SigmacCandidateExt::new(&sc, lc));
        self.candidates.push(sc);
    }

    /// Move all rows of `other` to the end of `self`.
    pub fn append(&mut self, other: &mut SigmacTables) {
        self.candidates.append(&mut other.candidates);
        self.candidates_ext.append(&mut other.candidates_ext);
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
