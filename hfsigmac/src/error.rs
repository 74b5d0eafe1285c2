//! Error types for Σc candidate creation.

use thiserror::Error;

/// Misconfiguration, rejected before any event is processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Soft pion max |eta| must be positive and finite, got {0}")]
    InvalidEtaMax(f64),

    #[error("Soft pion max {name} must be non-negative, got {value}")]
    NegativeDca { name: &'static str, value: f64 },

    #[error("Λc mass window {name} must be non-negative, got {value}")]
    NegativeMassWindow { name: &'static str, value: f64 },

    #[error("Soft pion ITS hitmap {0:#010b} sets bits beyond the 7 ITS layers")]
    HitMapOutOfRange(u8),

    #[error("Soft pion requires {hits_min} ITS hits but the hitmap selects only {n_layers} layers")]
    HitsMinUnreachable { hits_min: u8, n_layers: usize },
}

/// Σc candidate built with a net charge other than 0 or ±2.
///
/// Signals broken charge bookkeeping upstream; the pair is dropped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "Sc candidate with charge {charge} built, not possible! Charge Lc: {lc_charge}, charge soft pion: {soft_pi_charge}"
)]
pub struct InvalidChargeError {
    pub charge: i32,
    pub lc_charge: i32,
    pub soft_pi_charge: i32,
}

#[derive(Error, Debug)]
pub enum SigmacError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SigmacResult<T> = Result<T, SigmacError>;
