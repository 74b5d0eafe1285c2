//! Monte-Carlo matching of Σc candidates and generated Σc particles.
//!
//! Both matchers emit exactly one label per input row, in input order.
//! Rows are independent, so the label streams are computed in parallel.

use hfcore::algorithm::origin::charm_hadron_origin;
use hfcore::algorithm::reco_decay::{is_matched_mc_gen, matched_mc_rec};
use hfcore::data::candidate::{LcCandidate, DECAY_TYPE_LC_TO_P_K_PI};
use hfcore::data::mc_particle::McParticles;
use hfcore::data::track::Track;
use hfcore::physics::constants::PDG_LAMBDA_C_PLUS;
use rayon::prelude::*;

use crate::candidate::sigmac::SigmacCandidate;
use crate::data::event::IndexedTable;
use crate::mc::channel::{McMatchLabel, SigmacChannel, LC_TO_P_K_PI_DAUGHTERS};

/// Generations searched between the reconstructed daughters and the Σc:
/// Σc → Λc → (resonance →) p K π.
const REC_DEPTH_MAX: u8 = 3;
/// Λc → (resonance →) p K π
const LC_DEPTH_MAX: u8 = 2;

fn label(channel: SigmacChannel, sign: i8, particles: &McParticles, index: usize) -> McMatchLabel {
    McMatchLabel {
        flag: sign * channel.flag(),
        origin: charm_hadron_origin(particles, index).code(),
    }
}

/// Reconstruction-level matching of Σc candidates.
pub struct McRecMatcher<'a> {
    particles: &'a McParticles,
    lc_table: &'a IndexedTable<'a, LcCandidate>,
    track_table: &'a IndexedTable<'a, Track>,
}

impl<'a> McRecMatcher<'a> {
    pub fn new(
        particles: &'a McParticles,
        lc_table: &'a IndexedTable<'a, LcCandidate>,
        track_table: &'a IndexedTable<'a, Track>,
    ) -> Self {
        McRecMatcher { particles, lc_table, track_table }
    }

    fn mc_particle_of(&self, track_id: i64) -> Option<usize> {
        match self.track_table.get(track_id) {
            Some(t) => t.mc_particle_id,
            None => {
                log::warn!("Σc candidate references missing track {}", track_id);
                None
            }
        }
    }

    pub fn match_candidate(&self, sc: &SigmacCandidate) -> McMatchLabel {
        let lc = match self.lc_table.get(sc.prong_lc_id) {
            Some(lc) => lc,
            None => {
                log::warn!("Σc candidate references missing Λc candidate {}", sc.prong_lc_id);
                return McMatchLabel::UNMATCHED;
            }
        };

        // the Λc must be matched to exactly Λc+ → pK-π+ already
        if i32::from(lc.flag_mc_match_rec).abs() != 1 << DECAY_TYPE_LC_TO_P_K_PI {
            return McMatchLabel::UNMATCHED;
        }

        let channel = match SigmacChannel::from_charge(sc.charge) {
            Some(c) => c,
            None => {
                log::warn!("Σc candidate with impossible charge {} in MC matching", sc.charge);
                return McMatchLabel::UNMATCHED;
            }
        };

        // Λc prongs in stored order, then the soft pion
        let mut daughters = [0usize; 4];
        let track_ids = [lc.prong_ids[0], lc.prong_ids[1], lc.prong_ids[2], sc.prong_soft_pi_id];
        for (slot, &id) in daughters.iter_mut().zip(track_ids.iter()) {
            match self.mc_particle_of(id) {
                Some(p) => *slot = p,
                // fake track, no generated particle behind it
                None => return McMatchLabel::UNMATCHED,
            }
        }

        match matched_mc_rec(
            self.particles,
            &daughters,
            channel.pdg_code(),
            &channel.final_state(),
            true,
            Some(REC_DEPTH_MAX),
        ) {
            Some(mother) => label(channel, mother.sign, self.particles, mother.index),
            None => McMatchLabel::UNMATCHED,
        }
    }

    pub fn match_all(&self, candidates: &[SigmacCandidate]) -> Vec<McMatchLabel> {
        candidates.par_iter().map(|sc| self.match_candidate(sc)).collect()
    }
}

/// Generation-level matching of Σc particles.
pub struct McGenMatcher<'a> {
    particles: &'a McParticles,
}

impl<'a> McGenMatcher<'a> {
    pub fn new(particles: &'a McParticles) -> Self {
        McGenMatcher { particles }
    }

    pub fn match_particle(&self, index: usize) -> McMatchLabel {
        for channel in SigmacChannel::ALL {
            let sign = match is_matched_mc_gen(
                self.particles,
                index,
                channel.pdg_code(),
                &channel.immediate_daughters(),
                true,
                Some(1),
            ) {
                Some(s) => s,
                None => continue,
            };

            // Σc → Λc π found, now the Λc must decay into pK-π+
            let particle = match self.particles.get(index) {
                Some(p) => p,
                None => return McMatchLabel::UNMATCHED,
            };
            let lc_decays = particle.daughter_ids.iter().any(|&d| {
                self.particles
                    .get(d)
                    .is_some_and(|p| p.pdg_code.abs() == PDG_LAMBDA_C_PLUS)
                    && is_matched_mc_gen(
                        self.particles,
                        d,
                        PDG_LAMBDA_C_PLUS,
                        &LC_TO_P_K_PI_DAUGHTERS,
                        true,
                        Some(LC_DEPTH_MAX),
                    )
                    .is_some()
            });
            return if lc_decays {
                label(channel, sign, self.particles, index)
            } else {
                McMatchLabel::UNMATCHED
            };
        }
        McMatchLabel::UNMATCHED
    }

    pub fn match_all(&self) -> Vec<McMatchLabel> {
        (0..self.particles.len())
            .into_par_iter()
            .map(|i| self.match_particle(i))
            .collect()
    }
}
