//! Board tests - grid storage, locking and line clearing

use blockfall::core::collision::is_valid;
use blockfall::core::{Board, Piece};
use blockfall::types::{PieceKind, DEFAULT_COLS, DEFAULT_ROWS};

fn row_string(board: &Board, y: usize) -> String {
    board
        .row(y)
        .iter()
        .map(|cell| cell.map_or(".".to_string(), |kind| kind.as_str().to_uppercase()))
        .collect()
}

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.cols(), DEFAULT_COLS);
    assert_eq!(board.rows(), DEFAULT_ROWS);

    for y in 0..DEFAULT_ROWS as i16 {
        for x in 0..DEFAULT_COLS as i16 {
            assert_eq!(board.get(x, y), Some(None), "cell ({x}, {y}) should be empty");
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_custom_dimensions() {
    let board = Board::new(6, 12);
    assert_eq!(board.cells().len(), 72);
    assert_eq!(board.get(5, 11), Some(None));
    assert_eq!(board.get(6, 0), None);
    assert_eq!(board.get(0, 12), None);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::default();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 20), None);
    assert!(board.is_out_of_bounds(-1, 5));
    assert!(!board.is_occupied(-1, 5));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::default();
    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
    assert!(!board.set(10, 0, Some(PieceKind::T)));
}

#[test]
fn test_from_ascii_aligns_to_bottom() {
    let board = Board::from_ascii(4, 6, &["T...", "IIOO"]);
    assert_eq!(row_string(&board, 4), "T...");
    assert_eq!(row_string(&board, 5), "IIOO");
    assert_eq!(board.filled_count(), 5);
    assert!(board.is_row_full(5));
    assert!(!board.is_row_full(4));
}

#[test]
fn test_clear_single_line_shifts_rows_down() {
    let mut board = Board::from_ascii(
        4,
        5,
        &[
            ".T..", //
            "IIII", //
            "O..O",
        ],
    );
    assert_eq!(board.clear_lines(), 1);
    assert_eq!(row_string(&board, 0), "....");
    assert_eq!(row_string(&board, 3), ".T..");
    assert_eq!(row_string(&board, 4), "O..O");
    assert_eq!(board.filled_count(), 3);
}

#[test]
fn test_clear_non_adjacent_lines_preserves_order() {
    let mut board = Board::from_ascii(
        3,
        6,
        &[
            "S..", //
            "LLL", //
            ".Z.", //
            "JJJ", //
            "..T",
        ],
    );
    assert_eq!(board.clear_lines(), 2);
    assert_eq!(board.rows(), 6);
    assert_eq!(row_string(&board, 0), "...");
    assert_eq!(row_string(&board, 1), "...");
    assert_eq!(row_string(&board, 2), "...");
    assert_eq!(row_string(&board, 3), "S..");
    assert_eq!(row_string(&board, 4), ".Z.");
    assert_eq!(row_string(&board, 5), "..T");
}

#[test]
fn test_clear_four_lines() {
    let mut board = Board::from_ascii(4, 8, &["IIII", "IIII", "IIII", "IIII"]);
    assert_eq!(board.clear_lines(), 4);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_clear_with_no_full_rows_is_noop() {
    let mut board = Board::from_ascii(4, 4, &["T.T.", ".OO."]);
    let before = board.clone();
    assert_eq!(board.clear_lines(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_lock_piece_writes_its_kind() {
    let mut board = Board::default();
    let piece = Piece::spawn(PieceKind::S, 10).translated(0, 18);
    assert!(board.lock_piece(&piece));
    for (x, y) in piece.cells() {
        assert_eq!(board.get(x, y), Some(Some(PieceKind::S)));
    }
    assert_eq!(board.filled_count(), 4);
    assert!(!is_valid(&board, &piece));
}

#[test]
fn test_lock_piece_drops_cells_above_top() {
    let mut board = Board::default();
    let piece = Piece::spawn(PieceKind::T, 10).translated(0, -1);
    assert!(!board.lock_piece(&piece));
    // Only the bottom row of the T is inside the grid.
    assert_eq!(board.filled_count(), 3);
    assert_eq!(row_string(&board, 0), "...TTT....");
}

#[test]
fn test_color_rows_match_cells() {
    let board = Board::from_ascii(3, 2, &["I.Z"]);
    let rows = board.to_color_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec![0, 0, 0]);
    assert_eq!(
        rows[1],
        vec![PieceKind::I.color_id(), 0, PieceKind::Z.color_id()]
    );
}

#[test]
fn test_board_clear_empties_everything() {
    let mut board = Board::from_ascii(4, 4, &["IIII", "T..T"]);
    board.clear();
    assert_eq!(board.filled_count(), 0);
    assert_eq!(board.cols(), 4);
    assert_eq!(board.rows(), 4);
}
