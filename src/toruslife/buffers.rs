//! Double-buffered generation storage for TorusLife.
//!
//! Two grids with a global phase index: `grids[phase]` is the current
//! generation (read), `grids[1 - phase]` is scratch (write). Promoting scratch
//! flips the phase; no cell data moves.

use super::error::GridError;
use super::grid::Grid;

pub struct GenerationPair {
    grids: [Grid; 2],
    phase: usize,
}

impl GenerationPair {
    /// Allocate both buffers up front, all dead.
    pub fn new(side: usize) -> Result<Self, GridError> {
        let current = Grid::new(side)?;
        let scratch = Grid::new(side)?;
        Ok(Self {
            grids: [current, scratch],
            phase: 0,
        })
    }

    /// Adopt `grid` as the current generation and allocate a matching scratch.
    pub fn from_grid(grid: Grid) -> Result<Self, GridError> {
        let scratch = Grid::new(grid.side())?;
        Ok(Self {
            grids: [grid, scratch],
            phase: 0,
        })
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.grids[0].side()
    }

    /// Index of the buffer holding the latest completed generation.
    #[inline]
    pub fn phase(&self) -> usize {
        self.phase
    }

    #[inline]
    pub fn current(&self) -> &Grid {
        &self.grids[self.phase]
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.grids[self.phase]
    }

    /// Borrow current read-only and scratch writable at the same time.
    #[inline]
    pub fn split(&mut self) -> (&Grid, &mut Grid) {
        let (first, second) = self.grids.split_at_mut(1);
        if self.phase == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }

    /// Promote scratch to current.
    #[inline]
    pub fn flip(&mut self) {
        self.phase = 1 - self.phase;
    }

    /// Drop scratch and hand back the current generation.
    pub fn into_current(self) -> Grid {
        let [a, b] = self.grids;
        if self.phase == 0 { a } else { b }
    }
}
