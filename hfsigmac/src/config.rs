//! Task configuration.
//!
//! Every field has a default, so a JSON file only needs to list what it overrides.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hfcore::data::track::ITS_N_LAYERS;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SigmacResult};

/// Selection of the Λc± candidates used for Σc creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LcSelectionConfig {
    /// Minimum selection flag under either mass hypothesis
    pub selection_flag_lc: i32,
    /// Max |y| of the Λc, disabled when negative
    pub y_cand_lc_max: f64,
    /// Max |Minv(pKπ) - m(Λc)|
    pub m_p_k_pi_cand_lc_max: f64,
    /// Max |Minv(πKp) - m(Λc)|
    pub m_pi_k_p_cand_lc_max: f64,
}

impl Default for LcSelectionConfig {
    fn default() -> Self {
        Self {
            selection_flag_lc: 1,
            y_cand_lc_max: -1.0,
            m_p_k_pi_cand_lc_max: 0.03,
            m_pi_k_p_cand_lc_max: 0.03,
        }
    }
}

/// Selection of the soft π± tracks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftPionConfig {
    pub eta_max: f64,
    /// Bit i set = ITS layer i counts towards `its_hits_min`
    pub its_hit_map: u8,
    /// Minimum number of hits among the layers in `its_hit_map`
    pub its_hits_min: u8,
    /// cm
    pub dca_xy_max: f64,
    /// cm
    pub dca_z_max: f64,
}

impl Default for SoftPionConfig {
    fn default() -> Self {
        Self {
            eta_max: 0.9,
            its_hit_map: 127,
            its_hits_min: 1,
            dca_xy_max: 0.065,
            dca_z_max: 0.065,
        }
    }
}

impl SoftPionConfig {
    /// ITS layers selected by `its_hit_map`, ascending.
    pub fn its_layers(&self) -> Vec<u8> {
        (0..ITS_N_LAYERS)
            .filter(|&layer| self.its_hit_map & (1 << layer) != 0)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.eta_max.is_finite() && self.eta_max > 0.0) {
            return Err(ConfigError::InvalidEtaMax(self.eta_max));
        }
        if !(self.dca_xy_max >= 0.0) {
            return Err(ConfigError::NegativeDca { name: "dca_xy_max", value: self.dca_xy_max });
        }
        if !(self.dca_z_max >= 0.0) {
            return Err(ConfigError::NegativeDca { name: "dca_z_max", value: self.dca_z_max });
        }
        if self.its_hit_map >> ITS_N_LAYERS != 0 {
            return Err(ConfigError::HitMapOutOfRange(self.its_hit_map));
        }
        let n_layers = self.its_layers().len();
        if usize::from(self.its_hits_min) > n_layers {
            return Err(ConfigError::HitsMinUnreachable { hits_min: self.its_hits_min, n_layers });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigmacConfig {
    pub lc: LcSelectionConfig,
    pub soft_pi: SoftPionConfig,
    /// Run the Monte-Carlo matching
    pub process_mc: bool,
}

impl SigmacConfig {
    pub fn from_json_file(path: &Path) -> SigmacResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: SigmacConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that make the selection meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.lc.m_p_k_pi_cand_lc_max >= 0.0) {
            return Err(ConfigError::NegativeMassWindow {
                name: "m_p_k_pi_cand_lc_max",
                value: self.lc.m_p_k_pi_cand_lc_max,
            });
        }
        if !(self.lc.m_pi_k_p_cand_lc_max >= 0.0) {
            return Err(ConfigError::NegativeMassWindow {
                name: "m_pi_k_p_cand_lc_max",
                value: self.lc.m_pi_k_p_cand_lc_max,
            });
        }
        self.soft_pi.validate()
    }
}
