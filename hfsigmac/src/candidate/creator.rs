//! Σc0,++ → Λc+(→pK-π+) π-,+ candidate creation.
//!
//! Every selected Λc candidate of a collision is paired with every soft-pion
//! track of the same collision. Soft pions are not pre-associated to any Λc,
//! so the scan is fully combinatorial: O(#Λc × #tracks) per collision.

use hfcore::data::candidate::{LcCandidate, DECAY_TYPE_LC_TO_P_K_PI};
use hfcore::data::track::Track;
use hfcore::physics::constants::MASS_LAMBDA_C_PLUS;

use crate::candidate::charge::sigmac_charge;
use crate::candidate::sigmac::{SigmacCandidate, SigmacTables};
use crate::config::{LcSelectionConfig, SigmacConfig};
use crate::data::event::{CollisionGroup, IndexedTable};
use crate::error::ConfigError;
use crate::selection::track_selection::TrackQualityFilter;

/// Which Λc mass hypotheses lie within the configured window of the PDG mass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MassWindowStatus {
    pub p_k_pi: bool,
    pub pi_k_p: bool,
}

impl MassWindowStatus {
    #[inline]
    pub fn any(&self) -> bool {
        self.p_k_pi || self.pi_k_p
    }
}

/// Per-collision bookkeeping, summed over the batch by the workflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CreatorStats {
    pub lc_preselected: usize,
    pub lc_in_mass_window: usize,
    pub soft_pi_selected: usize,
    pub candidates: usize,
    pub invalid_charge: usize,
}

impl std::ops::AddAssign for CreatorStats {
    fn add_assign(&mut self, rhs: Self) {
        self.lc_preselected += rhs.lc_preselected;
        self.lc_in_mass_window += rhs.lc_in_mass_window;
        self.soft_pi_selected += rhs.soft_pi_selected;
        self.candidates += rhs.candidates;
        self.invalid_charge += rhs.invalid_charge;
    }
}

/// Builds Σc candidates; holds only the constant selection settings.
#[derive(Clone, Debug)]
pub struct SigmacCandidateCreator {
    lc_selection: LcSelectionConfig,
    soft_pi_filter: TrackQualityFilter,
}

impl SigmacCandidateCreator {
    pub fn new(config: &SigmacConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            lc_selection: config.lc.clone(),
            soft_pi_filter: TrackQualityFilter::from_config(&config.soft_pi)?,
        })
    }

    pub fn soft_pi_filter(&self) -> &TrackQualityFilter {
        &self.soft_pi_filter
    }

    /// Λc preselection: selection flag threshold, pK-π decay type and optional |y| cut.
    pub fn preselect_lc(&self, lc: &LcCandidate) -> bool {
        if !lc.is_selected(self.lc_selection.selection_flag_lc) {
            return false;
        }
        if !lc.has_decay_type(DECAY_TYPE_LC_TO_P_K_PI) {
            return false;
        }
        let y_max = self.lc_selection.y_cand_lc_max;
        !(y_max >= 0.0 && lc.y().abs() > y_max)
    }

    /// Mass-window check of both hypotheses against the PDG Λc mass.
    pub fn mass_window_status(&self, lc: &LcCandidate) -> MassWindowStatus {
        MassWindowStatus {
            p_k_pi: lc.is_sel_lc_to_p_k_pi >= 1
                && (lc.inv_mass_lc_to_p_k_pi - MASS_LAMBDA_C_PLUS).abs()
                    <= self.lc_selection.m_p_k_pi_cand_lc_max,
            pi_k_p: lc.is_sel_lc_to_pi_k_p >= 1
                && (lc.inv_mass_lc_to_pi_k_p - MASS_LAMBDA_C_PLUS).abs()
                    <= self.lc_selection.m_pi_k_p_cand_lc_max,
        }
    }

    /// Build the Σc candidates of one collision, appending them (and their
    /// derived columns) to `out`.
    ///
    /// Prong charges are looked up in `track_table`, which must cover the
    /// Λc prongs (they need not pass the soft-pion selection).
    pub fn process_collision(
        &self,
        group: &CollisionGroup<'_>,
        track_table: &IndexedTable<'_, Track>,
        out: &mut SigmacTables,
    ) -> CreatorStats {
        let mut stats = CreatorStats::default();

        // the soft-pion selection does not depend on the Λc, evaluate it once
        let soft_pions = self.soft_pi_filter.filter(group.tracks.iter().copied());
        stats.soft_pi_selected = soft_pions.len();

        for &lc in &group.lc_candidates {
            if !self.preselect_lc(lc) {
                continue;
            }
            stats.lc_preselected += 1;

            let status = self.mass_window_status(lc);
            if !status.any() {
                continue;
            }
            stats.lc_in_mass_window += 1;

            let prong_charges = match prong_charges(lc, track_table) {
                Some(charges) => charges,
                None => continue,
            };

            for &soft_pi in &soft_pions {
                // the soft pion must not be one of the Λc prongs
                if lc.prong_ids.contains(&soft_pi.global_index) {
                    continue;
                }

                let charge = match sigmac_charge(prong_charges, soft_pi.sign) {
                    Ok(c) => c,
                    Err(e) => {
                        log::error!(
                            ">>> {} (Λc {}, soft pion {}, collision {})",
                            e,
                            lc.global_index,
                            soft_pi.global_index,
                            group.collision_id
                        );
                        stats.invalid_charge += 1;
                        continue;
                    }
                };

                let sc = SigmacCandidate {
                    collision_id: lc.collision_id,
                    px_lc: lc.px,
                    py_lc: lc.py,
                    pz_lc: lc.pz,
                    px_soft_pi: soft_pi.px,
                    py_soft_pi: soft_pi.py,
                    pz_soft_pi: soft_pi.pz,
                    prong_lc_id: lc.global_index,
                    prong_soft_pi_id: soft_pi.global_index,
                    hf_flag: lc.hf_flag,
                    charge,
                    status_spread_lc_to_p_k_pi: status.p_k_pi,
                    status_spread_lc_to_pi_k_p: status.pi_k_p,
                };
                out.push(sc, lc);
                stats.candidates += 1;
            }
        }

        log::debug!(
            "Collision {}: {} Λc in mass window, {} soft pions, {} Σc candidates",
            group.collision_id,
            stats.lc_in_mass_window,
            stats.soft_pi_selected,
            stats.candidates
        );
        stats
    }
}

fn prong_charges(lc: &LcCandidate, track_table: &IndexedTable<'_, Track>) -> Option<[i8; 3]> {
    let mut charges = [0i8; 3];
    for (charge, &id) in charges.iter_mut().zip(lc.prong_ids.iter()) {
        match track_table.get(id) {
            Some(t) => *charge = t.sign,
            None => {
                log::warn!("Λc candidate {} references missing prong track {}", lc.global_index, id);
                return None;
            }
        }
    }
    Some(charges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: i64, sign: i8) -> Track {
        Track::new(id, 0, [0.3, 0.1, 0.05], sign, 0.01, 0.01, 0b0000_0111, true)
    }

    fn lc(id: i64, prongs: [i64; 3], m_p_k_pi: f64, m_pi_k_p: f64) -> LcCandidate {
        LcCandidate {
            global_index: id,
            collision_id: 0,
            prong_ids: prongs,
            px: 2.0,
            py: 1.0,
            pz: 0.5,
            hf_flag: 1 << DECAY_TYPE_LC_TO_P_K_PI,
            is_sel_lc_to_p_k_pi: 1,
            is_sel_lc_to_pi_k_p: 1,
            inv_mass_lc_to_p_k_pi: m_p_k_pi,
            inv_mass_lc_to_pi_k_p: m_pi_k_p,
            flag_mc_match_rec: 0,
        }
    }

    fn creator() -> SigmacCandidateCreator {
        SigmacCandidateCreator::new(&SigmacConfig::default()).unwrap()
    }

    #[test]
    fn test_mass_window_status() {
        let c = creator();
        let status = c.mass_window_status(&lc(1, [10, 11, 12], MASS_LAMBDA_C_PLUS + 0.02, 2.4));
        assert_eq!(status, MassWindowStatus { p_k_pi: true, pi_k_p: false });

        // hypothesis not selected upstream: mass is irrelevant
        let mut cand = lc(1, [10, 11, 12], MASS_LAMBDA_C_PLUS, MASS_LAMBDA_C_PLUS);
        cand.is_sel_lc_to_p_k_pi = 0;
        let status = c.mass_window_status(&cand);
        assert_eq!(status, MassWindowStatus { p_k_pi: false, pi_k_p: true });
    }

    #[test]
    fn test_preselection() {
        let c = creator();
        let mut cand = lc(1, [10, 11, 12], MASS_LAMBDA_C_PLUS, MASS_LAMBDA_C_PLUS);
        assert!(c.preselect_lc(&cand));
        cand.hf_flag = 1;
        assert!(!c.preselect_lc(&cand));

        let mut config = SigmacConfig::default();
        config.lc.y_cand_lc_max = 0.1;
        let c = SigmacCandidateCreator::new(&config).unwrap();
        let mut cand = lc(1, [10, 11, 12], MASS_LAMBDA_C_PLUS, MASS_LAMBDA_C_PLUS);
        cand.pz = 0.0;
        assert!(c.preselect_lc(&cand));
        cand.pz = 10.0;
        assert!(!c.preselect_lc(&cand));
    }

    #[test]
    fn test_process_collision_pairs_and_overlap() {
        let c = creator();
        let tracks = vec![track(10, 1), track(11, -1), track(12, 1), track(20, -1), track(21, 1)];
        let table = IndexedTable::build(&tracks, |t| t.global_index);
        let lcs = vec![lc(1, [10, 11, 12], MASS_LAMBDA_C_PLUS, 2.5)];
        let group = CollisionGroup {
            collision_id: 0,
            lc_candidates: lcs.iter().collect(),
            tracks: tracks.iter().collect(),
        };

        let mut out = SigmacTables::default();
        let stats = c.process_collision(&group, &table, &mut out);

        // prongs 10, 11, 12 are excluded as soft pions
        assert_eq!(out.len(), 2);
        assert_eq!(out.candidates_ext.len(), 2);
        assert_eq!(stats.candidates, 2);
        assert_eq!(stats.soft_pi_selected, 5);
        let sc = &out.candidates;
        assert_eq!((sc[0].prong_soft_pi_id, sc[0].charge), (20, 0));
        assert_eq!((sc[1].prong_soft_pi_id, sc[1].charge), (21, 2));
        assert!(sc.iter().all(|sc| sc.status_spread_lc_to_p_k_pi && !sc.status_spread_lc_to_pi_k_p));
    }

    #[test]
    fn test_invalid_charge_pair_is_dropped() {
        let c = creator();
        // Λc prongs with net charge +3 are inconsistent: +1 gives 4, -1 gives a valid 2
        let tracks = vec![track(10, 1), track(11, 1), track(12, 1), track(20, 1), track(21, -1)];
        let table = IndexedTable::build(&tracks, |t| t.global_index);
        let lcs = vec![lc(1, [10, 11, 12], MASS_LAMBDA_C_PLUS, 2.5)];
        let group = CollisionGroup {
            collision_id: 0,
            lc_candidates: lcs.iter().collect(),
            tracks: vec![&tracks[3], &tracks[4]],
        };

        let mut out = SigmacTables::default();
        let stats = c.process_collision(&group, &table, &mut out);
        assert_eq!(stats.invalid_charge, 1);
        assert_eq!(stats.candidates, 1);
        assert_eq!(out.len(), 1);
        assert_eq!((out.candidates[0].prong_soft_pi_id, out.candidates[0].charge), (21, 2));
    }

    #[test]
    fn test_missing_prong_skips_lc() {
        let c = creator();
        let tracks = vec![track(10, 1), track(20, -1)];
        let table = IndexedTable::build(&tracks, |t| t.global_index);
        let lcs = vec![lc(1, [10, 11, 12], MASS_LAMBDA_C_PLUS, 2.5)];
        let group = CollisionGroup {
            collision_id: 0,
            lc_candidates: lcs.iter().collect(),
            tracks: tracks.iter().collect(),
        };
        let mut out = SigmacTables::default();
        c.process_collision(&group, &table, &mut out);
        assert!(out.is_empty());
    }
}
