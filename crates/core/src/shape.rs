//! Shape catalog and rotation.
//!
//! A shape is a small rectangular occupancy matrix whose occupied cells all
//! carry one piece identity. Rotation is pure: it returns a fresh matrix
//! with transposed dimensions and never touches the source, so a rejected
//! rotation simply keeps the pre-rotation shape alive.

use duotris_types::{Cell, PieceKind};

use crate::rng::SimpleRng;

/// Matrix window size; 4x4 covers every catalog shape in every rotation.
const MAX_CELLS: usize = 16;

/// A rotatable piece matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    kind: PieceKind,
    rows: u8,
    cols: u8,
    cells: [Cell; MAX_CELLS],
}

impl Shape {
    /// Spawn form of `kind` from the catalog.
    pub fn of(kind: PieceKind) -> Self {
        let pattern: &[&[u8]] = match kind {
            PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            PieceKind::T => &[&[1, 1, 1], &[0, 1, 0]],
            PieceKind::J => &[&[1, 1, 1], &[1, 0, 0]],
            PieceKind::L => &[&[1, 1, 1], &[0, 0, 1]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::I => &[&[1, 1, 1, 1]],
        };

        let rows = pattern.len() as u8;
        let cols = pattern[0].len() as u8;
        let mut cells = [None; MAX_CELLS];
        for (r, row) in pattern.iter().enumerate() {
            for (c, &occupied) in row.iter().enumerate() {
                if occupied != 0 {
                    cells[r * cols as usize + c] = Some(kind);
                }
            }
        }

        Self {
            kind,
            rows,
            cols,
            cells,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Matrix width (columns).
    pub fn width(&self) -> u8 {
        self.cols
    }

    /// Matrix height (rows).
    pub fn height(&self) -> u8 {
        self.rows
    }

    /// Cell at matrix position, `None` when empty or out of the window.
    pub fn cell(&self, row: u8, col: u8) -> Cell {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    fn set(&mut self, row: u8, col: u8, cell: Cell) {
        self.cells[row as usize * self.cols as usize + col as usize] = cell;
    }

    /// Iterate the occupied cells as `(row, col)` offsets.
    pub fn occupied(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols).filter_map(move |c| self.cell(r, c).map(|_| (r, c)))
        })
    }

    /// Clockwise rotation: an `h x w` matrix becomes `w x h`.
    pub fn rotate_cw(&self) -> Self {
        let mut out = Self {
            kind: self.kind,
            rows: self.cols,
            cols: self.rows,
            cells: [None; MAX_CELLS],
        };
        for r in 0..out.rows {
            for c in 0..out.cols {
                out.set(r, c, self.cell(self.rows - 1 - c, r));
            }
        }
        out
    }

    /// Counter-clockwise rotation, the inverse of [`Shape::rotate_cw`].
    pub fn rotate_ccw(&self) -> Self {
        let mut out = Self {
            kind: self.kind,
            rows: self.cols,
            cols: self.rows,
            cells: [None; MAX_CELLS],
        };
        for r in 0..out.rows {
            for c in 0..out.cols {
                out.set(r, c, self.cell(c, self.cols - 1 - r));
            }
        }
        out
    }
}

/// Uniform independent draw from the catalog. No bag fairness: every draw
/// is a fresh roll over all seven kinds.
pub fn random_shape(rng: &mut SimpleRng) -> Shape {
    let kind = PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize];
    Shape::of(kind)
}
