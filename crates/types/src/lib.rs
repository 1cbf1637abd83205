//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, input mapping).
//!
//! # Grid Defaults
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Tile size**: 30 surface pixels per cell
//!
//! Pieces spawn at row 0, horizontally centered for their current width.
//!
//! # Timing and Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Gravity interval at session start |
//! | `DROP_SPEEDUP_PER_LINE_MS` | 20 | Interval reduction per cleared line |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Interval floor |
//! | `SCORE_PER_LINE` | 100 | Points per cleared line |
//! | `NEXT_QUEUE_LEN` | 3 | Preview queue length |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{GameAction, ShapeKind, DEFAULT_HEIGHT, DEFAULT_WIDTH};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//! assert_eq!(ShapeKind::from_tag(kind.tag()), Some(ShapeKind::T));
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(DEFAULT_WIDTH, 10);
//! assert_eq!(DEFAULT_HEIGHT, 20);
//! ```

use std::fmt;

/// Default grid width in cells (10 columns)
pub const DEFAULT_WIDTH: u16 = 10;

/// Default grid height in cells (20 rows)
pub const DEFAULT_HEIGHT: u16 = 20;

/// Default surface pixels per grid cell
pub const DEFAULT_TILE_SIZE: u32 = 30;

/// Gravity interval at the start of a session (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up applied per cleared line
pub const DROP_SPEEDUP_PER_LINE_MS: u32 = 20;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Points awarded for every cleared line
pub const SCORE_PER_LINE: u32 = 100;

/// Number of upcoming shapes kept in the preview queue
pub const NEXT_QUEUE_LEN: usize = 3;

/// Horizontal offsets tried, in order, when a rotation collides
pub const WALL_KICK_OFFSETS: [i32; 4] = [-1, 1, -2, 2];

/// Host frame budget in milliseconds (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// A cell on the grid
///
/// - `0`: empty
/// - `1..=7`: occupied, holding the [`ShapeKind::tag`] of the piece that locked there
pub type Cell = u8;

/// Value of an empty grid cell
pub const EMPTY_CELL: Cell = 0;


/// The seven shape kinds, in catalog order
///
/// - **I**: horizontal bar
/// - **J**: hook opening right
/// - **L**: hook opening left (mirror of J)
/// - **O**: 2x2 square
/// - **S**: S-shaped
/// - **T**: T-shaped
/// - **Z**: Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All kinds in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Position in the catalog (0..7)
    pub fn index(&self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::J => 1,
            ShapeKind::L => 2,
            ShapeKind::O => 3,
            ShapeKind::S => 4,
            ShapeKind::T => 5,
            ShapeKind::Z => 6,
        }
    }

    /// Nonzero grid tag written when a piece of this kind locks
    pub fn tag(&self) -> Cell {
        self.index() as Cell + 1
    }

    /// Inverse of [`ShapeKind::tag`]
    pub fn from_tag(tag: Cell) -> Option<Self> {
        match tag {
            1..=7 => Some(Self::ALL[tag as usize - 1]),
            _ => None,
        }
    }

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Uppercase single-letter name, used by the HUD
    pub fn letter(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::T => "T",
            ShapeKind::Z => "Z",
        }
    }
}

/// Player actions that can be applied to the engine
///
/// Each action maps to a single engine command. The host translates key
/// events into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down, locking if it cannot descend
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise (with horizontal wall kicks)
    Rotate,
    /// Hold current piece (once per piece)
    Hold,
    /// Start a fresh session
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::Restart => "restart",
        }
    }
}

/// Construction and configuration failures.
///
/// Gameplay never produces errors; collisions are resolved by reverting or
/// locking. Only precondition violations at construction time end up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Grid width or height was zero
    InvalidDimensions { width: u16, height: u16 },
    /// Tile size was zero, or so large the grid overflows `u32` pixels
    InvalidTileSize(u32),
    /// An environment value could not be parsed
    InvalidConfig { key: &'static str, value: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidDimensions { width, height } => write!(
                f,
                "invalid grid dimensions {}x{} (both must be > 0)",
                width, height
            ),
            EngineError::InvalidTileSize(size) => {
                write!(
                    f,
                    "invalid tile size {} (must be > 0 and keep the grid within u32 pixels)",
                    size
                )
            }
            EngineError::InvalidConfig { key, value } => {
                write!(f, "invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for EngineError {}
