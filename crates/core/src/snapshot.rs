//! Snapshot module - a copy of the HUD state for renderers
//!
//! Views draw the side panel and overlays from a [`GameSnapshot`] rather than
//! borrowing the live engine, so the engine stays free to draw into its own
//! surface during the same frame.

use crate::engine::Phase;
use crate::types::{ShapeKind, NEXT_QUEUE_LEN};

/// Read-only view of everything the HUD shows besides the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub score: u32,
    pub drop_interval_ms: u32,
    pub next_queue: [ShapeKind; NEXT_QUEUE_LEN],
    pub hold: Option<ShapeKind>,
    pub can_hold: bool,
    pub width: u16,
    pub height: u16,
    pub tile_size: u32,
}

impl GameSnapshot {
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Surface size in pixels needed to draw the grid
    pub fn surface_size(&self) -> (u32, u32) {
        (
            u32::from(self.width).saturating_mul(self.tile_size),
            u32::from(self.height).saturating_mul(self.tile_size),
        )
    }
}
