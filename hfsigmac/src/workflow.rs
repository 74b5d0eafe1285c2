//! Batch workflow: Σc candidate creation followed, on simulation, by the
//! reconstruction- and generation-level Monte-Carlo matching.
//!
//! Collisions are independent and processed in parallel; the output rows
//! keep the collision order of the input batch.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::candidate::creator::{CreatorStats, SigmacCandidateCreator};
use crate::candidate::sigmac::SigmacTables;
use crate::config::SigmacConfig;
use crate::data::event::EventBatch;
use crate::error::ConfigError;
use crate::mc::channel::McMatchLabel;
use crate::mc::matching::{McGenMatcher, McRecMatcher};

/// All output tables of one batch.
///
/// The label streams are present only when the MC matching ran; `mc_rec` is
/// row-aligned with `candidates`, `mc_gen` with the input generated particles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SigmacOutput {
    #[serde(flatten)]
    pub tables: SigmacTables,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_rec: Option<Vec<McMatchLabel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_gen: Option<Vec<McMatchLabel>>,
}

pub struct SigmacWorkflow {
    config: SigmacConfig,
    creator: SigmacCandidateCreator,
}

impl SigmacWorkflow {
    /// Validates the configuration; nothing is processed with a bad one.
    pub fn new(config: SigmacConfig) -> Result<Self, ConfigError> {
        let creator = SigmacCandidateCreator::new(&config)?;
        Ok(SigmacWorkflow { config, creator })
    }

    /// Build the Σc candidates of every collision in the batch.
    pub fn build_candidates(&self, batch: &EventBatch) -> (SigmacTables, CreatorStats) {
        let groups = batch.group_by_collision();
        let track_table = batch.track_table();

        let per_collision: Vec<(SigmacTables, CreatorStats)> = groups
            .par_iter()
            .map(|group| {
                let mut tables = SigmacTables::default();
                let stats = self.creator.process_collision(group, &track_table, &mut tables);
                (tables, stats)
            })
            .collect();

        let mut tables = SigmacTables::default();
        let mut stats = CreatorStats::default();
        for (mut t, s) in per_collision {
            tables.append(&mut t);
            stats += s;
        }
        (tables, stats)
    }

    pub fn run(&self, batch: &EventBatch) -> SigmacOutput {
        log::info!("{}", self.creator.soft_pi_filter().diagnose(&batch.tracks).summary());

        let (tables, stats) = self.build_candidates(batch);
        log::info!(
            "Built {} Σc candidates from {} collisions ({} Λc preselected, {} in mass window)",
            stats.candidates,
            batch.collisions.len(),
            stats.lc_preselected,
            stats.lc_in_mass_window
        );
        if stats.invalid_charge > 0 {
            log::error!("{} Λc-soft pion pairs dropped for impossible charge", stats.invalid_charge);
        }

        if !self.config.process_mc {
            return SigmacOutput { tables, mc_rec: None, mc_gen: None };
        }

        let track_table = batch.track_table();
        let lc_table = batch.lc_table();
        let mc_rec = McRecMatcher::new(&batch.mc_particles, &lc_table, &track_table)
            .match_all(&tables.candidates);
        let mc_gen = McGenMatcher::new(&batch.mc_particles).match_all();

        log::info!(
            "MC matching: {}/{} Σc candidates matched, {} generated Σc found",
            mc_rec.iter().filter(|l| l.is_matched()).count(),
            mc_rec.len(),
            mc_gen.iter().filter(|l| l.is_matched()).count()
        );

        SigmacOutput { tables, mc_rec: Some(mc_rec), mc_gen: Some(mc_gen) }
    }
}
