//! Ghost projection - where the active piece would land.

use crate::board::Board;
use crate::collision::is_valid;
use crate::piece::Piece;

/// Lowest legal position reachable by moving `piece` straight down.
///
/// Works on copies only. The result never sits above `piece`; if `piece`
/// itself is illegal it is returned unchanged.
pub fn project(board: &Board, piece: &Piece) -> Piece {
    let mut landed = *piece;
    loop {
        let candidate = landed.translated(0, 1);
        if !is_valid(board, &candidate) {
            return landed;
        }
        landed = candidate;
    }
}

/// Rows between `piece` and its landing position.
pub fn drop_distance(board: &Board, piece: &Piece) -> u16 {
    (project(board, piece).y - piece.y) as u16
}
