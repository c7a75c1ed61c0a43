//! Piece module - tetromino shape matrices and naive rotation
//!
//! A shape is a small rectangular matrix where `0` is empty and any other value
//! is the piece's color id. Rotation transposes the matrix and reverses each
//! row, giving one clockwise quarter turn. There are no wall kicks: callers
//! validate the rotated candidate and discard it if it collides.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation};

/// Largest extent of any tetromino matrix
pub const MAX_SHAPE_SIZE: usize = 4;

/// Number of blocks in every tetromino
pub const BLOCKS_PER_PIECE: usize = 4;

/// Absolute `(x, y)` grid coordinate of a block
pub type CellPos = (i16, i16);

/// The occupied cells of a piece, fixed capacity
pub type PieceCells = ArrayVec<CellPos, BLOCKS_PER_PIECE>;

/// Rectangular shape matrix of a tetromino in one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    /// Row-major; only the `height x width` top-left corner is meaningful.
    matrix: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Spawn-orientation shape for a piece kind.
    pub fn of(kind: PieceKind) -> Self {
        let c = kind.color_id();
        match kind {
            PieceKind::I => Self::from_rows(&[&[c, c, c, c]]),
            PieceKind::O => Self::from_rows(&[&[c, c], &[c, c]]),
            PieceKind::T => Self::from_rows(&[&[0, c, 0], &[c, c, c]]),
            PieceKind::S => Self::from_rows(&[&[0, c, c], &[c, c, 0]]),
            PieceKind::Z => Self::from_rows(&[&[c, c, 0], &[0, c, c]]),
            PieceKind::J => Self::from_rows(&[&[c, 0, 0], &[c, c, c]]),
            PieceKind::L => Self::from_rows(&[&[0, 0, c], &[c, c, c]]),
        }
    }

    fn from_rows(rows: &[&[u8]]) -> Self {
        let mut matrix = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            matrix[y][..row.len()].copy_from_slice(row);
        }
        Self {
            width: rows[0].len() as u8,
            height: rows.len() as u8,
            matrix,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Rotate 90° clockwise: transpose, then reverse each row.
    pub fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut matrix = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        // The rotated matrix is h wide and w tall.
        for (r, out_row) in matrix.iter_mut().enumerate().take(w) {
            for (c, out) in out_row.iter_mut().enumerate().take(h) {
                *out = self.matrix[h - 1 - c][r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            matrix,
        }
    }

    /// Offsets of the non-empty cells, row by row.
    pub fn blocks(&self) -> PieceCells {
        let mut out = PieceCells::new();
        for row in 0..self.height as usize {
            for col in 0..self.width as usize {
                if self.matrix[row][col] != 0 {
                    out.push((col as i16, row as i16));
                }
            }
        }
        out
    }

    /// Copy of the matrix as nested rows (for snapshots).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|row| self.matrix[row][..self.width as usize].to_vec())
            .collect()
    }
}

/// A piece placed on (or above) the grid.
///
/// Pieces are plain values: moving or rotating produces a new candidate and
/// the caller decides whether to keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub shape: Shape,
    pub x: i16,
    pub y: i16,
}

impl Piece {
    /// Create a piece in spawn orientation, horizontally centered on row 0.
    pub fn spawn(kind: PieceKind, grid_width: u8) -> Self {
        let shape = Shape::of(kind);
        let (x, y) = spawn_origin(&shape, grid_width);
        Self {
            kind,
            rotation: Rotation::North,
            shape,
            x,
            y,
        }
    }

    pub fn color_id(&self) -> u8 {
        self.kind.color_id()
    }

    /// Absolute grid coordinates covered by this piece.
    pub fn cells(&self) -> PieceCells {
        self.shape
            .blocks()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    pub fn translated(&self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Candidate rotated one quarter turn clockwise around its origin.
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }
}

/// Spawn origin: `x = floor((grid_width - shape_width) / 2)`, `y = 0`.
pub fn spawn_origin(shape: &Shape, grid_width: u8) -> (i16, i16) {
    let x = (grid_width as i16 - shape.width() as i16).div_euclid(2);
    (x, 0)
}
