//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the falling-block engine: the grid, pieces, collision
//! rules, line clearing, the next/hold queue, ghost projection, scoring and
//! gravity. It does no I/O; front-ends feed it intents and elapsed time and
//! read back [`Snapshot`]s.
//!
//! # Module Structure
//!
//! - [`board`]: grid of locked cells and line clearing
//! - [`piece`]: shape matrices, naive clockwise rotation, spawn placement
//! - [`collision`]: the legality check every move goes through
//! - [`ghost`]: landing projection of the active piece
//! - [`rng`]: injectable piece sources (uniform, 7-bag, fixed sequence)
//! - [`queue`]: next preview and the once-per-spawn hold slot
//! - [`scoring`]: points, levels and gravity speed
//! - [`scheduler`]: gravity timer and deferred intents
//! - [`game_state`]: the [`Session`] and its lock/clear lifecycle
//! - [`snapshot`]: read-only views and tick results
//! - [`config`]: [`SessionConfig`] and its validation
//!
//! # Game Rules
//!
//! - **Rotation**: clockwise quarter turns by matrix rotation, no wall kicks
//! - **Hold**: one hold per spawn, re-armed on every lock
//! - **Scoring**: 100/300/500/800 points for 1-4 lines, times the level
//! - **Levels**: one level per 10 lines, starting at level 1
//! - **Gravity**: `1000ms / level`, 50ms while soft dropping
//! - **Game over**: the next piece cannot be placed at its spawn position
//!
//! # Example
//!
//! ```
//! use blockfall_core::{new_session, Intent};
//!
//! let mut session = new_session(10, 20).unwrap();
//! session.apply_intent(Intent::MoveRight);
//! session.apply_intent(Intent::HardDrop);
//!
//! let result = session.tick(16);
//! assert!(result.locked);
//! assert!(!result.game_over);
//! assert_eq!(session.snapshot().grid.len(), 20);
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod game_state;
pub mod ghost;
pub mod piece;
pub mod queue;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::is_valid;
pub use config::{ConfigError, InputMode, Randomizer, SessionConfig};
pub use game_state::{Phase, Session};
pub use piece::{Piece, Shape};
pub use queue::PieceQueue;
pub use rng::{BagSource, PieceSource, SequenceSource, SimpleRng, UniformSource};
pub use snapshot::{LockReport, Snapshot, TickResult};
pub use types::{Cell, Intent, PieceKind, Rotation};

/// Start a session on a `cols x rows` board with default settings.
pub fn new_session(cols: u8, rows: u8) -> Result<Session, ConfigError> {
    Ok(Session::from_config(SessionConfig::new(cols, rows)?))
}
