//! Terminal "game renderer" module.
//!
//! A small text layer for terminal play: [`GameView`] lays a core snapshot out
//! as glyph rows and [`TerminalRenderer`] flushes them through crossterm.
//! Keeping the layout pure keeps it testable without a terminal.

pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use game_view::{frame_to_string, Frame, GameView, Glyph};
pub use renderer::{encode_full_into, piece_color, TerminalRenderer};
