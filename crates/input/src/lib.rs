//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s. Terminals that
//! never report key releases get a [`SoftDropLatch`] that ends a soft drop a
//! short while after the last Down press.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit, SoftDropLatch};
