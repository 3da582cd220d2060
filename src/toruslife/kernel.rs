//! Row kernels for TorusLife.
//!
//! Each call computes one output row of the next generation. The current
//! generation is borrowed read-only as a whole `Grid`; the output is a single
//! row slice of the scratch grid, so a kernel can never observe a cell it has
//! already updated during the same step.

use super::grid::{ALIVE, Grid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KernelBackend {
    /// One modulo per neighbor lookup: `((i + di + N) % N, (j + dj + N) % N)`.
    Modulo,
    /// Wrapped row indices computed once per row; columns only wrap at the
    /// two edge cells.
    #[default]
    Wrapped,
}

impl KernelBackend {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "modulo" => Some(KernelBackend::Modulo),
            "wrapped" => Some(KernelBackend::Wrapped),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KernelBackend::Modulo => "modulo",
            KernelBackend::Wrapped => "wrapped",
        }
    }
}

/// Per-row outcome, merged across workers at the end of a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowStats {
    pub live: u64,
    pub changed: bool,
}

impl RowStats {
    #[inline]
    pub fn merge(self, other: RowStats) -> RowStats {
        RowStats {
            live: self.live + other.live,
            changed: self.changed | other.changed,
        }
    }
}

/// `(i + delta + side) % side` for `delta` in `-1..=1`.
#[inline(always)]
pub fn wrap(i: usize, delta: isize, side: usize) -> usize {
    (i + side).wrapping_add_signed(delta) % side
}

/// B3/S23: alive next iff (alive and 2 neighbors) or exactly 3 neighbors.
#[inline(always)]
pub fn next_state(cell: u8, neighbors: u8) -> u8 {
    ((cell == ALIVE && neighbors == 2) || neighbors == 3) as u8
}

/// Live-neighbor tally of `(row, col)` on the torus. Always in `0..=8`.
#[inline]
pub fn neighbor_sum(current: &Grid, row: usize, col: usize) -> u8 {
    let side = current.side();
    let cells = current.cells();
    let mut live = 0u8;
    for di in -1isize..=1 {
        let r = wrap(row, di, side) * side;
        for dj in -1isize..=1 {
            if di == 0 && dj == 0 {
                continue;
            }
            live += cells[r + wrap(col, dj, side)];
        }
    }
    live
}

/// Compute output row `row` into `out` with the selected backend.
#[inline]
pub fn advance_row(
    backend: KernelBackend,
    current: &Grid,
    row: usize,
    out: &mut [u8],
) -> RowStats {
    debug_assert_eq!(out.len(), current.side());
    match backend {
        KernelBackend::Modulo => advance_row_modulo(current, row, out),
        KernelBackend::Wrapped => advance_row_wrapped(current, row, out),
    }
}

pub fn advance_row_modulo(current: &Grid, row: usize, out: &mut [u8]) -> RowStats {
    let side = current.side();
    let cells = current.cells();
    let mut stats = RowStats::default();
    for (col, slot) in out.iter_mut().enumerate() {
        let cell = cells[row * side + col];
        let next = next_state(cell, neighbor_sum(current, row, col));
        *slot = next;
        stats.live += next as u64;
        stats.changed |= next != cell;
    }
    stats
}

pub fn advance_row_wrapped(current: &Grid, row: usize, out: &mut [u8]) -> RowStats {
    let side = current.side();
    // Sides below 3 have no interior columns.
    if side < 3 {
        return advance_row_modulo(current, row, out);
    }

    let above = current.row(wrap(row, -1, side));
    let this = current.row(row);
    let below = current.row(wrap(row, 1, side));

    let live_around = |col: usize, west: usize, east: usize| -> u8 {
        above[west]
            + above[col]
            + above[east]
            + this[west]
            + this[east]
            + below[west]
            + below[col]
            + below[east]
    };

    let mut stats = RowStats::default();
    for (col, slot) in out.iter_mut().enumerate() {
        let live = match col {
            0 => live_around(0, side - 1, 1),
            c if c == side - 1 => live_around(c, c - 1, 0),
            c => live_around(c, c - 1, c + 1),
        };
        let cell = this[col];
        let next = next_state(cell, live);
        *slot = next;
        stats.live += next as u64;
        stats.changed |= next != cell;
    }
    stats
}
