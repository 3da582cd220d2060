//! Error types for TorusLife.

use thiserror::Error;

/// Failures constructing or addressing a [`Grid`](super::Grid).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid side must be at least 1")]
    ZeroSide,
    #[error("failed to allocate {cells} cells for grid buffer")]
    Allocation { cells: usize },
    #[error("grid of side {side} needs {expected} cells, got {actual}")]
    LengthMismatch {
        side: usize,
        expected: usize,
        actual: usize,
    },
    #[error("cell {index} holds {value}, expected 0 or 1")]
    InvalidCell { index: usize, value: u8 },
    #[error("cell ({row},{col}) is outside a {side}x{side} grid")]
    OutOfBounds { row: usize, col: usize, side: usize },
    #[error("grid side mismatch: expected {expected}, got {actual}")]
    SideMismatch { expected: usize, actual: usize },
}

/// Failures reading engine configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid value")]
    InvalidVar { var: &'static str, value: String },
    #[error("density {0} must be a finite value in 0.0..=1.0")]
    Density(f64),
    #[error("unknown kernel backend: {0} (expected modulo or wrapped)")]
    UnknownKernel(String),
}

/// Top-level engine error.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build TorusLife thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
