use std::collections::HashMap;

use hfcore::data::candidate::LcCandidate;
use hfcore::data::mc_particle::McParticles;
use hfcore::data::track::Track;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    pub global_index: i64,
}

/// One processing pass worth of input: collisions with their tracks and
/// Λc candidates, plus the generated particles when running on simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBatch {
    pub collisions: Vec<Collision>,
    pub tracks: Vec<Track>,
    pub lc_candidates: Vec<LcCandidate>,
    pub mc_particles: McParticles,
}

/// Rows of a table addressable by their global index.
///
/// The first row wins when an index is duplicated.
#[derive(Clone, Debug)]
pub struct IndexedTable<'a, T> {
    rows: &'a [T],
    index: HashMap<i64, usize>,
}

impl<'a, T> IndexedTable<'a, T> {
    pub fn build(rows: &'a [T], key: impl Fn(&T) -> i64) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let id = key(row);
            if index.contains_key(&id) {
                log::warn!("Duplicated global index {} at row {}, keeping the first row", id, i);
                continue;
            }
            index.insert(id, i);
        }
        IndexedTable { rows, index }
    }

    #[inline]
    pub fn get(&self, global_index: i64) -> Option<&'a T> {
        self.index.get(&global_index).map(|&i| &self.rows[i])
    }
}

/// Tracks and Λc candidates of one collision, in input order.
#[derive(Clone, Debug)]
pub struct CollisionGroup<'a> {
    pub collision_id: i64,
    pub lc_candidates: Vec<&'a LcCandidate>,
    pub tracks: Vec<&'a Track>,
}

impl EventBatch {
    pub fn track_table(&self) -> IndexedTable<'_, Track> {
        IndexedTable::build(&self.tracks, |t| t.global_index)
    }

    pub fn lc_table(&self) -> IndexedTable<'_, LcCandidate> {
        IndexedTable::build(&self.lc_candidates, |c| c.global_index)
    }

    /// Group tracks and Λc candidates by collision, following the order of `collisions`.
    ///
    /// Rows pointing to a collision that is not listed are dropped.
    pub fn group_by_collision(&self) -> Vec<CollisionGroup<'_>> {
        let mut lc_by_collision = self.lc_candidates.iter().into_group_map_by(|c| c.collision_id);
        let mut tracks_by_collision = self.tracks.iter().into_group_map_by(|t| t.collision_id);

        let groups: Vec<CollisionGroup<'_>> = self
            .collisions
            .iter()
            .map(|col| CollisionGroup {
                collision_id: col.global_index,
                lc_candidates: lc_by_collision.remove(&col.global_index).unwrap_or_default(),
                tracks: tracks_by_collision.remove(&col.global_index).unwrap_or_default(),
            })
            .collect();

        let orphan_lc: usize = lc_by_collision.values().map(Vec::len).sum();
        let orphan_tracks: usize = tracks_by_collision.values().map(Vec::len).sum();
        if orphan_lc > 0 || orphan_tracks > 0 {
            log::warn!(
                "{} Λc candidates and {} tracks reference unknown collisions and are skipped",
                orphan_lc,
                orphan_tracks
            );
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: i64, collision_id: i64) -> Track {
        Track::new(id, collision_id, [0.1, 0.1, 0.0], 1, 0.0, 0.0, 1, true)
    }

    #[test]
    fn test_indexed_table_lookup() {
        let tracks = vec![track(20, 0), track(10, 0), track(20, 1)];
        let table = IndexedTable::build(&tracks, |t| t.global_index);
        assert_eq!(table.get(10).map(|t| t.global_index), Some(10));
        // duplicate keeps the first row
        assert_eq!(table.get(20).map(|t| t.collision_id), Some(0));
        assert!(table.get(99).is_none());
    }

    #[test]
    fn test_group_by_collision_keeps_order() {
        let batch = EventBatch {
            collisions: vec![Collision { global_index: 5 }, Collision { global_index: 2 }],
            tracks: vec![track(1, 2), track(2, 5), track(3, 2), track(4, 9)],
            ..Default::default()
        };
        let groups = batch.group_by_collision();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].collision_id, 5);
        assert_eq!(groups[0].tracks.iter().map(|t| t.global_index).collect::<Vec<_>>(), vec![2]);
        assert_eq!(groups[1].tracks.iter().map(|t| t.global_index).collect::<Vec<_>>(), vec![1, 3]);
        assert!(groups[1].lc_candidates.is_empty());
    }

    #[test]
    fn test_batch_from_json() {
        let json = r#"{
            "collisions": [{ "global_index": 0 }],
            "tracks": [{
                "global_index": 10, "collision_id": 0, "px": 0.1, "py": 0.0, "pz": 0.0,
                "sign": 1, "eta": 0.0, "dca_xy": 0.0, "dca_z": 0.0,
                "its_cluster_map": 3, "its_refit": true
            }],
            "mc_particles": [{ "pdg_code": 211 }]
        }"#;
        let batch: EventBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.tracks[0].mc_particle_id, None);
        assert_eq!(batch.mc_particles.len(), 1);
        assert!(batch.lc_candidates.is_empty());
    }
}
