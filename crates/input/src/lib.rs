//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::GameAction`] and recognizes the quit chords.

pub mod map;

pub use tui_blockfall_types as types;

pub use map::{handle_key_event, map_key, should_quit, KeyCommand};
