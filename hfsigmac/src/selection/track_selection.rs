//! Soft-pion track quality filtering.
//!
//! The filter is built once from the configuration and shared read-only
//! by every collision.

use hfcore::data::track::Track;
use itertools::Itertools;

use crate::config::SoftPionConfig;
use crate::error::ConfigError;

/// Quality filter for soft-pion candidate tracks.
///
/// All bounds are inclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackQualityFilter {
    pub eta_max: f64,
    pub dca_xy_max: f64,
    pub dca_z_max: f64,
    pub require_its_refit: bool,
    pub its_hits_min: u8,
    /// ITS layers counting towards `its_hits_min`
    its_layers: Vec<u8>,
    its_layer_mask: u8,
}

impl TrackQualityFilter {
    pub fn from_config(config: &SoftPionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let its_layers = config.its_layers();
        let its_layer_mask = its_layers.iter().fold(0u8, |mask, &l| mask | (1 << l));

        log::info!(
            "Soft pion ITS hitmap: {} layers [{}], at least {} hit(s) required",
            its_layers.len(),
            its_layers.iter().join(", "),
            config.its_hits_min
        );

        Ok(Self {
            eta_max: config.eta_max,
            dca_xy_max: config.dca_xy_max,
            dca_z_max: config.dca_z_max,
            require_its_refit: true,
            its_hits_min: config.its_hits_min,
            its_layers,
            its_layer_mask,
        })
    }

    pub fn its_layers(&self) -> &[u8] {
        &self.its_layers
    }

    /// Hits of `t` in the selected ITS layers.
    #[inline]
    pub fn its_hits(&self, t: &Track) -> u32 {
        (t.its_cluster_map & self.its_layer_mask).count_ones()
    }

    /// Check if a track passes this quality filter.
    #[inline]
    pub fn passes(&self, t: &Track) -> bool {
        if !(t.eta.abs() <= self.eta_max) {
            return false;
        }
        if !(t.dca_xy.abs() <= self.dca_xy_max) {
            return false;
        }
        if !(t.dca_z.abs() <= self.dca_z_max) {
            return false;
        }
        if self.require_its_refit && !t.its_refit {
            return false;
        }
        self.its_hits(t) >= u32::from(self.its_hits_min)
    }

    /// Keep the tracks that pass, in input order.
    pub fn filter<'a>(&self, tracks: impl IntoIterator<Item = &'a Track>) -> Vec<&'a Track> {
        tracks.into_iter().filter(|t| self.passes(t)).collect()
    }

    /// Get statistics about why tracks are failing.
    ///
    /// A track is counted once for every criterion it fails.
    pub fn diagnose(&self, tracks: &[Track]) -> SelectionDiagnostics {
        let mut diag = SelectionDiagnostics { total: tracks.len(), ..Default::default() };

        for t in tracks {
            let mut failed = false;

            if !(t.eta.abs() <= self.eta_max) {
                diag.failed_eta += 1;
                failed = true;
            }
            if !(t.dca_xy.abs() <= self.dca_xy_max) {
                diag.failed_dca_xy += 1;
                failed = true;
            }
            if !(t.dca_z.abs() <= self.dca_z_max) {
                diag.failed_dca_z += 1;
                failed = true;
            }
            if self.require_its_refit && !t.its_refit {
                diag.failed_its_refit += 1;
                failed = true;
            }
            if self.its_hits(t) < u32::from(self.its_hits_min) {
                diag.failed_its_hits += 1;
                failed = true;
            }

            if !failed {
                diag.passed += 1;
            }
        }

        diag
    }
}

/// Diagnostics about soft-pion selection failures.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionDiagnostics {
    pub total: usize,
    pub passed: usize,

    pub failed_eta: usize,
    pub failed_dca_xy: usize,
    pub failed_dca_z: usize,
    pub failed_its_refit: usize,
    pub failed_its_hits: usize,
}

impl SelectionDiagnostics {
    pub fn summary(&self) -> String {
        let failed = self.total - self.passed;
        let pct = if self.total > 0 {
            (self.passed as f64 / self.total as f64) * 100.0
        } else {
            100.0
        };

        format!(
            "SelectionDiagnostics: {}/{} passed ({:.1}%), {} failed\n\
             Failures by criterion:\n\
             - eta: {}\n\
             - dca_xy: {}\n\
             - dca_z: {}\n\
             - its_refit: {}\n\
             - its_hits: {}",
            self.passed,
            self.total,
            pct,
            failed,
            self.failed_eta,
            self.failed_dca_xy,
            self.failed_dca_z,
            self.failed_its_refit,
            self.failed_its_hits,
        )
    }
}
