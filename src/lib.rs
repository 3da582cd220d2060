//! Dense Conway's Game of Life (B3/S23) on a fixed-size torus.

pub mod toruslife;
pub use toruslife::{Grid, KernelBackend, TorusLife, TorusLifeConfig};
