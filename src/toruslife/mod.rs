//! TorusLife engine internals and public API.

mod buffers;
mod config;
mod engine;
mod error;
mod grid;
mod kernel;
mod seed;

pub use buffers::GenerationPair;
pub use config::{
    ENV_DENSITY, ENV_KERNEL, ENV_MAX_THREADS, ENV_SEED, ENV_THREADS, TorusLifeConfig, parse_seed,
};
pub use engine::TorusLife;
pub use error::{ConfigError, GridError, LifeError};
pub use grid::{ALIVE, DEAD, Grid};
pub use kernel::{
    KernelBackend, RowStats, advance_row, advance_row_modulo, advance_row_wrapped, neighbor_sum,
    next_state, wrap,
};
pub use seed::{Density, entropy_seed, fill_row, fill_row_uniform, randomize};
