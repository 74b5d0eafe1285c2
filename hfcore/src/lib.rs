// physics module
pub mod physics {
    pub mod constants;
    pub mod kinematics;
}

// data module
pub mod data {
    pub mod track;
    pub mod candidate;
    pub mod mc_particle;
}

// algorithm module
pub mod algorithm {
    pub mod reco_decay;
    pub mod origin;
}
