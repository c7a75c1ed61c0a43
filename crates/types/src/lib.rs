//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the engine, the terminal
//! front-end and the headless runner alike.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Sessions may pick other
//! dimensions at construction time (see `blockfall_core::SessionConfig`), but
//! the grid never changes size afterwards.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep used by the terminal runner |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `SOFT_DROP_MS` | 50 | Gravity interval while soft drop is held |
//! | `SOFT_DROP_GRACE_MS` | 150 | Soft drop timeout for terminals without key release |
//!
//! Gravity at level `n` is `BASE_DROP_MS / n`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, PieceKind, Rotation, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//! assert_eq!((DEFAULT_COLS, DEFAULT_ROWS), (10, 20));
//! ```

use serde::Serialize;

/// Default board width in cells (10 columns)
pub const DEFAULT_COLS: u8 = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_ROWS: u8 = 20;

/// Smallest accepted board dimension (fits a vertical or horizontal I piece)
pub const MIN_DIMENSION: u8 = 4;

/// Largest accepted board dimension
pub const MAX_DIMENSION: u8 = 64;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval while a soft drop is held
pub const SOFT_DROP_MS: u32 = 50;

/// Soft drop timeout used by front-ends that never see key releases
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// Lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table.
///
/// Base points for clearing N lines, multiplied by the current level:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each kind doubles as a color identifier in the grid:
/// - **I**: 1, horizontal bar
/// - **O**: 2, 2x2 square
/// - **T**: 3, T-shaped
/// - **S**: 4, S-shaped
/// - **Z**: 5, Z-shaped (mirror of S)
/// - **J**: 6, J-shaped
/// - **L**: 7, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in color-id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Nonzero color id written into shape matrices and grid snapshots.
    pub fn color_id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::color_id`]; `0` and unknown ids map to `None`.
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }
}

/// Orientation of a piece relative to its spawn shape.
///
/// The cycle goes: North → East → South → West → North, one clockwise
/// quarter turn per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }
}

/// Player intents accepted by a session.
///
/// These are produced by keyboard mapping in the terminal runner and by
/// scripts in the headless runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Start (`true`) or stop (`false`) accelerated gravity
    SoftDrop(bool),
    /// Drop the piece to its lowest legal row and lock it
    HardDrop,
    /// Swap the active piece into the hold slot (once per spawn)
    Hold,
    /// Toggle pause state
    Pause,
    /// Reset the session
    Restart,
}

impl Intent {
    /// Parse an intent from its camelCase name.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("softDropOn"), Some(Intent::SoftDrop(true)));
    /// assert_eq!(Intent::from_str("rotateCcw"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "rotatecw" => Some(Intent::RotateCw),
            "softdropon" => Some(Intent::SoftDrop(true)),
            "softdropoff" => Some(Intent::SoftDrop(false)),
            "harddrop" => Some(Intent::HardDrop),
            "hold" => Some(Intent::Hold),
            "pause" => Some(Intent::Pause),
            "restart" => Some(Intent::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::RotateCw => "rotateCw",
            Intent::SoftDrop(true) => "softDropOn",
            Intent::SoftDrop(false) => "softDropOff",
            Intent::HardDrop => "hardDrop",
            Intent::Hold => "hold",
            Intent::Pause => "pause",
            Intent::Restart => "restart",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked with the given piece color
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ids_roundtrip_and_are_nonzero() {
        for kind in PieceKind::ALL {
            assert_ne!(kind.color_id(), 0);
            assert_eq!(PieceKind::from_color_id(kind.color_id()), Some(kind));
        }
        assert_eq!(PieceKind::from_color_id(0), None);
        assert_eq!(PieceKind::from_color_id(8), None);
    }

    #[test]
    fn intent_names_parse_back() {
        let intents = [
            Intent::MoveLeft,
            Intent::MoveRight,
            Intent::RotateCw,
            Intent::SoftDrop(true),
            Intent::SoftDrop(false),
            Intent::HardDrop,
            Intent::Hold,
            Intent::Pause,
            Intent::Restart,
        ];
        for intent in intents {
            assert_eq!(Intent::from_str(intent.as_str()), Some(intent));
        }
        assert_eq!(Intent::from_str("jump"), None);
    }

    #[test]
    fn scoring_table_defaults() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert_eq!(BASE_DROP_MS, 1000);
        assert_eq!(SOFT_DROP_MS, 50);
        assert_eq!(LINES_PER_LEVEL, 10);
    }
}
