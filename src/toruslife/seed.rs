//! Random initial states.
//!
//! Rows are filled in parallel, each from its own `StdRng` keyed by
//! `(seed, row)`. The same seed therefore yields the same grid regardless of
//! how rayon splits the rows across workers.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use super::error::ConfigError;
use super::grid::Grid;

/// Probability that a seeded cell starts alive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density(f64);

impl Density {
    /// One uniform bit per cell.
    pub const HALF: Density = Density(0.5);

    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::Density(value))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// 64-bit draw threshold: a draw `< threshold` is alive.
    pub fn threshold(self) -> u64 {
        if self.0 >= 1.0 {
            u64::MAX
        } else {
            (u64::MAX as f64 * self.0) as u64
        }
    }
}

impl Default for Density {
    fn default() -> Self {
        Density::HALF
    }
}

#[inline]
fn row_rng(seed: u64, row: usize) -> StdRng {
    // splitmix64 step so adjacent rows start from unrelated states.
    let mut z = seed ^ (row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    StdRng::seed_from_u64(z ^ (z >> 31))
}

/// Fill one row. With `threshold == u64::MAX` every cell is alive.
#[inline]
pub fn fill_row<R: RngCore>(cells: &mut [u8], rng: &mut R, threshold: u64) {
    if threshold == u64::MAX {
        cells.fill(1);
        return;
    }
    for cell in cells.iter_mut() {
        *cell = (rng.next_u64() < threshold) as u8;
    }
}

/// Fill one row with uniform bits, one draw per 64 cells.
#[inline]
pub fn fill_row_uniform<R: RngCore>(cells: &mut [u8], rng: &mut R) {
    for chunk in cells.chunks_mut(64) {
        let mut bits = rng.next_u64();
        for cell in chunk {
            *cell = (bits & 1) as u8;
            bits >>= 1;
        }
    }
}

/// Overwrite every cell of `grid` with an independent random state.
///
/// Runs on the ambient rayon pool; call inside `ThreadPool::install` to pick
/// a specific pool.
pub fn randomize(grid: &mut Grid, seed: u64, density: Density) {
    let side = grid.side();
    let uniform = density == Density::HALF;
    let threshold = density.threshold();
    grid.cells_mut()
        .par_chunks_mut(side)
        .enumerate()
        .for_each(|(row, cells)| {
            let mut rng = row_rng(seed, row);
            if uniform {
                fill_row_uniform(cells, &mut rng);
            } else {
                fill_row(cells, &mut rng, threshold);
            }
        });
}

/// A fresh seed from the thread-local generator.
pub fn entropy_seed() -> u64 {
    rand::rng().next_u64()
}
