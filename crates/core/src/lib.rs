//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has no
//! dependencies on terminals, input devices or clocks: time arrives as a
//! timestamp argument and pixels leave through the [`Surface`] trait, so the
//! engine runs the same under the terminal host, in tests and in benches.
//!
//! # Module Structure
//!
//! - [`engine`]: [`GameEngine`], the session state machine and every command
//! - [`grid`]: fixed-size playfield with collision, locking and row clearing
//! - [`shapes`]: the seven shape templates and owned rotation matrices
//! - [`piece`]: the active falling piece
//! - [`rng`]: uniform random shape source and the three-slot preview queue
//! - [`scoring`]: points per line and gravity speed-up
//! - [`surface`]: the drawing and score-reporting capabilities
//! - [`snapshot`]: read-only HUD view of a session
//! - [`config`]: construction parameters, readable from the environment
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::{EngineConfig, GameEngine, RecordingSurface};
//! use tui_blockfall_types::GameAction;
//!
//! let mut scores = Vec::new();
//! let mut game = GameEngine::new(
//!     EngineConfig::seeded(12345),
//!     RecordingSurface::new(),
//!     |score: u32| scores.push(score),
//! )
//! .unwrap();
//! game.start();
//!
//! game.apply(GameAction::MoveRight);
//! game.apply(GameAction::Rotate);
//! game.apply(GameAction::HardDrop);
//!
//! // One frame per display refresh; returns false once the game is over
//! assert!(game.frame(0.0));
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! - **Gravity**: 1000ms per row at start, 20ms faster per cleared line, never
//!   below 100ms
//! - **Frames**: the host calls [`GameEngine::frame`] with a monotonically
//!   increasing millisecond timestamp; the engine accumulates the deltas

pub mod config;
pub mod engine;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;
pub mod surface;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use engine::{GameEngine, GameOver, Phase};
pub use grid::Grid;
pub use piece::Piece;
pub use rng::{NextQueue, ShapeRng};
pub use scoring::{line_clear_score, next_drop_interval_ms};
pub use shapes::{Matrix, SHAPE_TEMPLATES};
pub use snapshot::GameSnapshot;
pub use surface::{DrawOp, Fill, NullObserver, NullSurface, RecordingSurface, ScoreObserver, Surface};
