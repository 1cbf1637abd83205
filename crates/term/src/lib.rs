//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. The engine draws
//! through [`TermCanvas`], which implements the core `Surface` trait on top of a
//! character framebuffer; [`GameView`] adds the chrome, and
//! [`TerminalRenderer`] flushes the result with crossterm.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Allow precise control over aspect ratio (2 chars wide per cell)
//! - Only rewrite what changed between frames

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use canvas::{Palette, TermCanvas};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
