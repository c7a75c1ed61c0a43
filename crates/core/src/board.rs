//! Board module - manages the grid of locked cells
//!
//! The board is a `cols x rows` grid where each cell is empty or holds the
//! color of the piece that was locked there. Storage is a flat row-major
//! vector sized once at construction; dimensions never change afterwards.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::piece::Piece;
use crate::types::{Cell, PieceKind};

/// The grid of locked cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: u8,
    rows: u8,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    /// Build a board from text rows, top to bottom.
    ///
    /// `.` (or a space) is empty; a piece letter (`I`, `O`, `T`, ...) is a
    /// locked cell of that color; any other character is locked as `I`.
    /// Short rows are padded with empty cells, and missing rows are added
    /// empty at the top so the given rows sit at the bottom. Extra rows are
    /// cut from the top.
    pub fn from_ascii(cols: u8, rows: u8, lines: &[&str]) -> Self {
        let mut board = Self::new(cols, rows);
        let lines = &lines[lines.len().saturating_sub(rows as usize)..];
        let offset = rows as usize - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let y = (offset + i) as i16;
            for (x, ch) in line.chars().take(cols as usize).enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::I)),
                };
                board.set(x as i16, y, cell);
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.cols as usize + x as usize)
    }

    /// Get width of the board
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Get height of the board
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    ///
    /// Gameplay only writes cells through [`Board::lock_piece`]; this is for
    /// building fixtures and replays.
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i16, y: i16) -> bool {
        x < 0 || x >= self.cols as i16 || y < 0 || y >= self.rows as i16
    }

    /// Borrow one row of cells
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.cols as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Remaining rows keep their relative order and settle at the bottom; the
    /// same number of empty rows are inserted at the top. Uses a two-pointer
    /// pass from the bottom up without allocating.
    pub fn clear_lines(&mut self) -> u8 {
        let width = self.cols as usize;
        let mut cleared = 0u8;
        let mut write_y = self.rows as usize;

        for read_y in (0..self.rows as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Write the piece's cells into the grid at its color.
    ///
    /// Cells above the top edge are dropped. Returns false if any cell could
    /// not be written.
    pub fn lock_piece(&mut self, piece: &Piece) -> bool {
        let kind = piece.kind;
        piece
            .cells()
            .into_iter()
            .fold(true, |all, (x, y)| self.set(x, y, Some(kind)) && all)
    }

    /// Number of filled cells on the board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Grid as rows of color ids (`0` = empty)
    pub fn to_color_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|cell| cell.map_or(0, |kind| kind.color_id()))
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_COLS, crate::types::DEFAULT_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_from_ascii_aligns_to_bottom() {
        let board = Board::from_ascii(4, 6, &["T..I", "OOOO"]);
        assert_eq!(board.get(0, 4), Some(Some(PieceKind::T)));
        assert_eq!(board.get(3, 4), Some(Some(PieceKind::I)));
        assert!(board.is_row_full(5));
        assert_eq!(board.filled_count(), 6);
    }

    #[test]
    fn test_from_ascii_drops_extra_top_rows() {
        let board = Board::from_ascii(4, 4, &["ZZZZ", "T...", "....", "....", "..OO"]);
        assert_eq!(board.get(0, 0), Some(Some(PieceKind::T)));
        assert_eq!(board.get(3, 3), Some(Some(PieceKind::O)));
        assert_eq!(board.filled_count(), 3);
    }

    #[test]
    fn test_clear_lines_compacts_in_order() {
        let mut board = Board::from_ascii(4, 5, &["T...", "IIII", ".S..", "OOOO"]);
        assert_eq!(board.clear_lines(), 2);

        let expected = Board::from_ascii(4, 5, &["T...", ".S.."]);
        assert_eq!(board, expected);
    }

    #[test]
    fn test_clear_lines_none_full() {
        let mut board = Board::from_ascii(4, 4, &["III."]);
        let before = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_lock_piece_drops_cells_above_top() {
        let mut board = Board::new(10, 20);
        let piece = Piece::spawn(PieceKind::O, 10).translated(0, -1);
        assert!(!board.lock_piece(&piece));
        assert_eq!(board.filled_count(), 2);
        assert!(board.is_occupied(4, 0));
        assert!(board.is_occupied(5, 0));
    }
}
