use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::physics::kinematics;

/// Number of ITS layers encoded in `Track::its_cluster_map`.
pub const ITS_N_LAYERS: u8 = 7;

/// A reconstructed charged track, joined with its impact parameters.
///
/// Tracks are owned by the event batch and only ever referenced by the
/// candidate builder and the matchers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Stable identifier, unique across the whole batch
    pub global_index: i64,
    pub collision_id: i64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    /// Charge sign, +1 or -1
    pub sign: i8,
    pub eta: f64,
    /// Transverse distance of closest approach to the primary vertex (cm)
    pub dca_xy: f64,
    /// Longitudinal distance of closest approach to the primary vertex (cm)
    pub dca_z: f64,
    /// Bit i set = cluster in ITS layer i
    pub its_cluster_map: u8,
    /// Track passed the ITS refit
    pub its_refit: bool,
    /// Index of the generated particle this track is associated to (simulation only)
    #[serde(default)]
    pub mc_particle_id: Option<usize>,
}

impl Track {
    pub fn new(
        global_index: i64,
        collision_id: i64,
        momentum: [f64; 3],
        sign: i8,
        dca_xy: f64,
        dca_z: f64,
        its_cluster_map: u8,
        its_refit: bool,
    ) -> Self {
        let [px, py, pz] = momentum;
        let eta = kinematics::pseudorapidity(&Vector3::new(px, py, pz));
        Track {
            global_index,
            collision_id,
            px,
            py,
            pz,
            sign,
            eta,
            dca_xy,
            dca_z,
            its_cluster_map,
            its_refit,
            mc_particle_id: None,
        }
    }

    pub fn with_mc_particle(mut self, mc_particle_id: usize) -> Self {
        self.mc_particle_id = Some(mc_particle_id);
        self
    }
}
