//! Dense toroidal cell grid.
//!
//! Cells are stored row-major in a flat `Vec<u8>`: cell `(row, col)` lives at
//! `row * side + col`. Each cell is exactly 0 (dead) or 1 (alive).

use super::error::GridError;

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    cells: Vec<u8>,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("side", &self.side)
            .field("population", &self.population())
            .finish()
    }
}

impl Grid {
    /// Allocate an all-dead `side` x `side` grid.
    ///
    /// The buffer is reserved fallibly so an oversized grid reports
    /// [`GridError::Allocation`] instead of aborting inside the allocator.
    pub fn new(side: usize) -> Result<Self, GridError> {
        let len = cell_count(side)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GridError::Allocation { cells: len })?;
        cells.resize(len, DEAD);
        Ok(Self { side, cells })
    }

    /// Wrap an existing row-major buffer, validating its length and values.
    pub fn from_cells(side: usize, cells: Vec<u8>) -> Result<Self, GridError> {
        let expected = cell_count(side)?;
        if cells.len() != expected {
            return Err(GridError::LengthMismatch {
                side,
                expected,
                actual: cells.len(),
            });
        }
        if let Some((index, &value)) = cells.iter().enumerate().find(|&(_, &v)| v > ALIVE) {
            return Err(GridError::InvalidCell { index, value });
        }
        Ok(Self { side, cells })
    }

    /// Build a grid with the given `(row, col)` cells alive.
    pub fn from_live(side: usize, live: &[(usize, usize)]) -> Result<Self, GridError> {
        let mut grid = Self::new(side)?;
        for &(row, col) in live {
            grid.set(row, col, true)?;
        }
        Ok(grid)
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Caller guarantees `row < side`.
    #[inline]
    pub(crate) fn row(&self, row: usize) -> &[u8] {
        let start = row * self.side;
        &self.cells[start..start + self.side]
    }

    #[inline]
    pub(crate) fn index(&self, row: usize, col: usize) -> usize {
        row * self.side + col
    }

    /// Read a cell. Coordinates outside the grid read as dead.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.side || col >= self.side {
            return false;
        }
        self.cells[self.index(row, col)] == ALIVE
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        if row >= self.side || col >= self.side {
            return Err(GridError::OutOfBounds {
                row,
                col,
                side: self.side,
            });
        }
        let idx = self.index(row, col);
        self.cells[idx] = alive as u8;
        Ok(())
    }

    pub fn population(&self) -> u64 {
        self.cells.iter().map(|&c| c as u64).sum()
    }

    pub fn clear(&mut self) {
        self.cells.fill(DEAD);
    }

    /// Overwrite this grid with `other`. Sides must match.
    pub fn copy_from(&mut self, other: &Grid) -> Result<(), GridError> {
        if other.side != self.side {
            return Err(GridError::SideMismatch {
                expected: self.side,
                actual: other.side,
            });
        }
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }

    /// Visit live cells in row-major order.
    pub fn for_each_live<F: FnMut(usize, usize)>(&self, mut f: F) {
        for (row, cells) in self.cells.chunks_exact(self.side).enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == ALIVE {
                    f(row, col);
                }
            }
        }
    }
}

fn cell_count(side: usize) -> Result<usize, GridError> {
    if side == 0 {
        return Err(GridError::ZeroSide);
    }
    side.checked_mul(side)
        .ok_or(GridError::Allocation { cells: usize::MAX })
}
