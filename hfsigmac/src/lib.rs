// src/lib.rs
pub mod config;
pub mod error;
pub mod workflow;

pub mod selection {
    pub mod track_selection;
}

pub mod candidate {
    pub mod charge;
    pub mod sigmac;
    pub mod creator;
}

pub mod mc {
    pub mod channel;
    pub mod matching;
}

pub mod data {
    pub mod event;
    pub mod io;
}
