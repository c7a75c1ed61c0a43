use serde::Serialize;

use crate::piece::CellPos;
use crate::types::PieceKind;

/// What happened during one call to [`Session::tick`](crate::Session::tick).
///
/// Locks caused by intents since the previous tick are folded in: `locked`
/// is set if any piece locked and `lines_cleared` is their total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickResult {
    pub locked: bool,
    pub lines_cleared: u8,
    pub game_over: bool,
}

/// Outcome of a single lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockReport {
    pub lines_cleared: u8,
    pub points: u32,
    pub game_over: bool,
}

/// Read-only view of a session for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub cols: u8,
    pub rows: u8,
    /// Rows of color ids, top to bottom; `0` is empty.
    pub grid: Vec<Vec<u8>>,
    pub active_kind: Option<PieceKind>,
    pub active_cells: Vec<CellPos>,
    pub ghost_cells: Vec<CellPos>,
    pub next_kind: PieceKind,
    pub next_shape: Vec<Vec<u8>>,
    pub held_kind: Option<PieceKind>,
    pub held_shape: Option<Vec<Vec<u8>>>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl Snapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Locked color id at `(x, y)`, `0` if empty or out of range.
    pub fn locked_at(&self, x: usize, y: usize) -> u8 {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_active_cell(&self, x: i16, y: i16) -> bool {
        self.active_cells.contains(&(x, y))
    }

    pub fn is_ghost_cell(&self, x: i16, y: i16) -> bool {
        self.ghost_cells.contains(&(x, y))
    }
}
