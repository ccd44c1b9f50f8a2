//! Board: the per-player grid of locked cells.
//!
//! A fixed 20x10 grid stored as a flat row-major array, row 0 at the top.
//! Only cell values ever mutate; the dimensions are set at construction and
//! the whole board is replaced only by a full restart.

use duotris_types::{Cell, PieceKind, BOARD_COLS, BOARD_ROWS};

use crate::rng::SimpleRng;
use crate::shape::Shape;

const COLS: usize = BOARD_COLS as usize;
const ROWS: usize = BOARD_ROWS as usize;
const BOARD_SIZE: usize = COLS * ROWS;

/// The game board - 10 columns x 20 rows of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * COLS + x).
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_COLS as i8 || y < 0 || y >= BOARD_ROWS as i8 {
            return None;
        }
        Some((y as usize) * COLS + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_COLS
    }

    pub fn height(&self) -> u8 {
        BOARD_ROWS
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set the cell at `(x, y)`. Returns false when out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision predicate shared by placement validation and move/rotate
    /// legality: true iff any occupied cell of `shape` would land outside
    /// the left, right, or bottom bound, or on an occupied board cell.
    ///
    /// Rows above the board (`y < 0`) collide with nothing; no engine
    /// operation places a piece there.
    pub fn collides(&self, shape: &Shape, off_x: i8, off_y: i8) -> bool {
        for (r, c) in shape.occupied() {
            let x = off_x + c as i8;
            let y = off_y + r as i8;
            if x < 0 || x >= BOARD_COLS as i8 || y >= BOARD_ROWS as i8 {
                return true;
            }
            if y >= 0 && self.cells[(y as usize) * COLS + (x as usize)].is_some() {
                return true;
            }
        }
        false
    }

    /// Copy every occupied cell of `shape` onto the board, overwriting.
    /// Always follows a successful one-step collision check, so the target
    /// cells are expected to be empty.
    pub fn merge(&mut self, shape: &Shape, off_x: i8, off_y: i8) {
        for (r, c) in shape.occupied() {
            self.set(off_x + c as i8, off_y + r as i8, Some(shape.kind()));
        }
    }

    /// Remove every completed row, returning how many were removed.
    ///
    /// Removing a row shifts everything above it down, so the scan restarts
    /// from the top after each removal; this keeps disjoint completed rows
    /// correct as their indices move.
    pub fn clear_completed_lines(&mut self) -> u32 {
        let mut cleared = 0;
        'scan: loop {
            for y in 0..ROWS {
                if self.row_full(y) {
                    self.remove_row(y);
                    cleared += 1;
                    continue 'scan;
                }
            }
            break;
        }
        cleared
    }

    fn row_full(&self, y: usize) -> bool {
        let start = y * COLS;
        self.cells[start..start + COLS].iter().all(|c| c.is_some())
    }

    /// Drop row `y`: rows above shift down one, a fresh empty row appears
    /// at the top.
    fn remove_row(&mut self, y: usize) {
        for row in (1..=y).rev() {
            let src = (row - 1) * COLS;
            self.cells.copy_within(src..src + COLS, row * COLS);
        }
        for cell in &mut self.cells[..COLS] {
            *cell = None;
        }
    }

    /// Push `count` garbage rows in from the bottom: the top `count` rows
    /// fall off, and each new bottom row is filled with random identities
    /// except one random gap column.
    pub fn inject_garbage(&mut self, count: u32, rng: &mut SimpleRng) {
        for _ in 0..count {
            self.cells.copy_within(COLS.., 0);
            let gap = rng.next_range(BOARD_COLS as u32) as usize;
            let bottom = BOARD_SIZE - COLS;
            for x in 0..COLS {
                self.cells[bottom + x] = if x == gap {
                    None
                } else {
                    let kind = PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize];
                    Some(kind)
                };
            }
        }
    }

    /// Read-only snapshot of the whole grid, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build a board from 2D rows for tests.
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert_eq!(rows.len(), ROWS);
        assert!(rows.iter().all(|row| row.len() == COLS));

        let mut cells = [None; BOARD_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                cells[y * COLS + x] = *cell;
            }
        }
        Self { cells }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
