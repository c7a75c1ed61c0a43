//! Collision checking - the single source of truth for piece legality.

use crate::board::Board;
use crate::piece::Piece;

/// Whether `piece` may occupy its position on `board`.
///
/// Every cell must satisfy `0 <= x < cols` and `y < rows`. Cells at `y >= 0`
/// must also be empty; cells above the top edge skip the occupancy check so
/// pieces can poke out of the visible grid. Total for any coordinates.
pub fn is_valid(board: &Board, piece: &Piece) -> bool {
    piece.cells().iter().all(|&(x, y)| cell_is_free(board, x, y))
}

/// Legality of a single cell under the same rules as [`is_valid`].
pub fn cell_is_free(board: &Board, x: i16, y: i16) -> bool {
    if x < 0 || x >= board.cols() as i16 || y >= board.rows() as i16 {
        return false;
    }
    y < 0 || !board.is_occupied(x, y)
}
