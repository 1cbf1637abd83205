//! Engine module - the complete game state machine
//!
//! Ties together the grid, the falling piece, the preview queue, the hold slot,
//! scoring and gravity timing. The engine is driven from outside: a host calls
//! [`GameEngine::frame`] once per display refresh and forwards player commands
//! in between. It paints into a [`Surface`] and reports score changes to a
//! [`ScoreObserver`]; it never schedules anything itself.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --start--> Running --spawn collides--> GameOver
//!                    ^                            |
//!                    +----------start-------------+
//! ```
//!
//! While running, a piece cycles Falling -> Locking -> Spawning -> Falling.

use log::{debug, info};

use crate::config::EngineConfig;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::{NextQueue, ShapeRng};
use crate::scoring::{line_clear_score, next_drop_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::surface::{Fill, ScoreObserver, Surface};
use crate::types::{
    EngineError, GameAction, ShapeKind, BASE_DROP_MS, EMPTY_CELL, NEXT_QUEUE_LEN,
    WALL_KICK_OFFSETS,
};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Constructed, not started yet
    #[default]
    Idle,
    Running,
    GameOver,
}

/// Game-over notification carrying the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameOver {
    pub score: u32,
}

/// The game engine
pub struct GameEngine<S: Surface, O: ScoreObserver> {
    config: EngineConfig,
    grid: Grid,
    current: Option<Piece>,
    next: NextQueue,
    hold: Option<ShapeKind>,
    can_hold: bool,
    score: u32,
    drop_interval_ms: u32,
    drop_timer_ms: f64,
    /// Timestamp of the previous frame; `None` until the first frame of a session
    last_frame_ms: Option<f64>,
    phase: Phase,
    /// Pending game-over notification (consumed by the host).
    game_over: Option<GameOver>,
    surface: S,
    observer: O,
}

impl<S: Surface, O: ScoreObserver> GameEngine<S, O> {
    /// Create an idle engine.
    ///
    /// Fails when the grid would have no cells or the tile size is zero.
    pub fn new(config: EngineConfig, surface: S, observer: O) -> Result<Self, EngineError> {
        config.validate()?;
        let next = NextQueue::new(ShapeRng::new(config.seed));
        Ok(Self {
            grid: Grid::new(usize::from(config.width), usize::from(config.height)),
            current: None,
            next,
            hold: None,
            can_hold: true,
            score: 0,
            drop_interval_ms: BASE_DROP_MS,
            drop_timer_ms: 0.0,
            last_frame_ms: None,
            phase: Phase::Idle,
            game_over: None,
            surface,
            observer,
            config,
        })
    }

    /// Begin a fresh session, discarding any previous one
    pub fn start(&mut self) {
        self.grid.reset();
        self.current = None;
        self.hold = None;
        self.can_hold = true;
        self.score = 0;
        self.drop_interval_ms = BASE_DROP_MS;
        self.drop_timer_ms = 0.0;
        self.last_frame_ms = None;
        self.game_over = None;
        self.phase = Phase::Running;
        self.observer.report(self.score);
        info!(
            "session started on a {}x{} grid",
            self.grid.width(),
            self.grid.height()
        );
        self.spawn();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next_queue(&self) -> &[ShapeKind] {
        self.next.as_slice()
    }

    pub fn hold_piece(&self) -> Option<ShapeKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut next_queue = [ShapeKind::I; NEXT_QUEUE_LEN];
        next_queue.copy_from_slice(self.next.as_slice());
        GameSnapshot {
            phase: self.phase,
            score: self.score,
            drop_interval_ms: self.drop_interval_ms,
            next_queue,
            hold: self.hold,
            can_hold: self.can_hold,
            width: self.config.width,
            height: self.config.height,
            tile_size: self.config.tile_size,
        }
    }

    /// Take and clear the pending game-over notification.
    pub fn take_game_over(&mut self) -> Option<GameOver> {
        self.game_over.take()
    }

    /// Make the front of the preview queue the current piece.
    ///
    /// If it collides at its spawn position the session ends; the piece stays
    /// current so the final board can still be drawn.
    pub fn spawn(&mut self) {
        let kind = self.next.pop();
        self.place_new(Piece::spawn(kind, self.grid.width()));
        self.can_hold = true;
    }

    fn place_new(&mut self, piece: Piece) {
        let blocked = self.collide(&piece);
        debug!("spawn {:?} at ({}, {})", piece.kind, piece.x, piece.y);
        self.current = Some(piece);
        if blocked {
            self.end_session();
        }
    }

    fn end_session(&mut self) {
        self.phase = Phase::GameOver;
        self.game_over = Some(GameOver { score: self.score });
        info!("game over, score {}", self.score);
    }

    /// Whether `piece` overlaps a wall, the floor or a locked cell
    pub fn collide(&self, piece: &Piece) -> bool {
        self.grid.collides(&piece.matrix, piece.x, piece.y)
    }

    /// Gravity: move down one row, locking when the piece cannot descend
    pub fn step(&mut self) {
        if !self.is_running() {
            return;
        }
        let Some(piece) = self.current.as_mut() else {
            return;
        };
        piece.y += 1;
        if self.grid.collides(&piece.matrix, piece.x, piece.y) {
            piece.y -= 1;
            self.settle();
        }
    }

    /// Player-invoked one-row drop; identical to [`GameEngine::step`]
    pub fn soft_drop(&mut self) {
        self.step();
    }

    /// Drop to the lowest free position and lock immediately
    pub fn hard_drop(&mut self) {
        if !self.is_running() {
            return;
        }
        let Some(piece) = self.current.as_mut() else {
            return;
        };
        while !self.grid.collides(&piece.matrix, piece.x, piece.y) {
            piece.y += 1;
        }
        piece.y -= 1;
        self.settle();
    }

    /// Lock, clear rows and bring in the next piece
    fn settle(&mut self) {
        self.lock();
        self.clear_lines();
        self.spawn();
    }

    /// Shift the piece horizontally by `dir` columns; reverted on collision
    pub fn move_piece(&mut self, dir: i32) {
        if !self.is_running() {
            return;
        }
        let Some(piece) = self.current.as_mut() else {
            return;
        };
        piece.x += dir;
        if self.grid.collides(&piece.matrix, piece.x, piece.y) {
            piece.x -= dir;
        }
    }

    /// Rotate clockwise, trying horizontal kicks when the turn collides.
    ///
    /// Kicks are offsets from the original column, tried in the order of
    /// [`WALL_KICK_OFFSETS`]. If none fits, matrix and column are restored.
    pub fn rotate(&mut self) {
        if !self.is_running() {
            return;
        }
        let Some(piece) = self.current.as_mut() else {
            return;
        };
        let original = piece.matrix.clone();
        let x = piece.x;
        piece.rotate_cw();
        if !self.grid.collides(&piece.matrix, x, piece.y) {
            return;
        }
        for offset in WALL_KICK_OFFSETS {
            if !self.grid.collides(&piece.matrix, x + offset, piece.y) {
                piece.x = x + offset;
                return;
            }
        }
        piece.matrix = original;
    }

    /// Write the current piece into the grid and clear it.
    ///
    /// Cells above the top edge are dropped.
    pub fn lock(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        let written = self
            .grid
            .lock(&piece.matrix, piece.x, piece.y, piece.kind.tag());
        debug!(
            "lock {:?} at ({}, {}), {} cells on the grid",
            piece.kind, piece.x, piece.y, written
        );
    }

    /// Remove complete rows, then update score and gravity.
    ///
    /// Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let lines = self.grid.clear_full_rows();
        if lines > 0 {
            self.score = self.score.saturating_add(line_clear_score(lines));
            self.drop_interval_ms = next_drop_interval_ms(self.drop_interval_ms, lines);
            debug!(
                "cleared {} line(s): score {}, interval {}ms",
                lines, self.score, self.drop_interval_ms
            );
            self.observer.report(self.score);
        }
        lines
    }

    /// Put the current piece aside, once per piece.
    ///
    /// With an empty slot the next queued piece spawns. Otherwise the held
    /// kind comes back in its template orientation at the spawn position.
    pub fn hold(&mut self) {
        if !self.is_running() || !self.can_hold {
            return;
        }
        let Some(piece) = self.current.take() else {
            return;
        };
        match self.hold.replace(piece.kind) {
            Some(held) => {
                debug!("hold swap {:?} <-> {:?}", piece.kind, held);
                self.place_new(Piece::spawn(held, self.grid.width()));
            }
            None => {
                debug!("hold {:?}", piece.kind);
                self.spawn();
            }
        }
        self.can_hold = false;
    }

    /// Advance the clock to `timestamp_ms` and redraw.
    ///
    /// The first frame of a session only records the clock. When the
    /// accumulated time exceeds the drop interval the timer resets and the
    /// piece steps down once. Returns whether the session is still running;
    /// a stopped engine neither ticks nor draws.
    pub fn frame(&mut self, timestamp_ms: f64) -> bool {
        if !self.is_running() {
            return false;
        }
        let elapsed = match self.last_frame_ms {
            Some(previous) => (timestamp_ms - previous).max(0.0),
            None => 0.0,
        };
        self.last_frame_ms = Some(timestamp_ms);
        self.drop_timer_ms += elapsed;
        if self.drop_timer_ms > f64::from(self.drop_interval_ms) {
            self.drop_timer_ms = 0.0;
            self.step();
        }
        self.draw();
        self.is_running()
    }

    /// Paint the grid and the visible part of the current piece
    pub fn draw(&mut self) {
        let tile = self.config.tile_size;
        let size = tile - 1;
        let width = self.grid.width() as u32;
        let height = self.grid.height() as u32;

        self.surface.clear(width * tile, height * tile);
        for (y, row) in self.grid.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let fill = if cell == EMPTY_CELL {
                    Fill::Empty
                } else {
                    Fill::Locked
                };
                self.surface
                    .fill_rect(x as u32 * tile, y as u32 * tile, size, size, fill);
            }
        }

        if let Some(piece) = &self.current {
            // x is always in range for a non-colliding piece; rows above the field are skipped
            for (gx, gy) in piece.cells().filter(|&(gx, gy)| gx >= 0 && gy >= 0) {
                self.surface.fill_rect(
                    gx as u32 * tile,
                    gy as u32 * tile,
                    size,
                    size,
                    Fill::Active,
                );
            }
        }
    }

    /// Dispatch a player action
    pub fn apply(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Hold => self.hold(),
            GameAction::Restart => self.start(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Matrix;
    use crate::surface::{DrawOp, RecordingSurface};

    #[derive(Debug, Default)]
    struct Scores(Vec<u32>);

    impl ScoreObserver for Scores {
        fn report(&mut self, score: u32) {
            self.0.push(score);
        }
    }

    type TestEngine = GameEngine<RecordingSurface, Scores>;

    fn engine(width: u16, height: u16) -> TestEngine {
        let config = EngineConfig {
            width,
            height,
            tile_size: 30,
            seed: Some(7),
        };
        GameEngine::new(config, RecordingSurface::new(), Scores::default()).unwrap()
    }

    fn running(width: u16, height: u16) -> TestEngine {
        let mut e = engine(width, height);
        e.start();
        e
    }

    fn put(e: &mut TestEngine, kind: ShapeKind, x: i32, y: i32) {
        e.current = Some(Piece {
            kind,
            matrix: Matrix::for_kind(kind),
            x,
            y,
        });
    }

    fn fill(e: &mut TestEngine, cells: &[(i32, i32)]) {
        for &(x, y) in cells {
            assert!(e.grid.set(x, y, ShapeKind::O.tag()));
        }
    }

    fn pos(e: &TestEngine) -> (i32, i32) {
        let p = e.current().unwrap();
        (p.x, p.y)
    }

    #[test]
    fn test_new_rejects_empty_grid_and_zero_tile() {
        let bad = |width, height, tile_size| {
            let config = EngineConfig {
                width,
                height,
                tile_size,
                seed: Some(1),
            };
            GameEngine::new(config, RecordingSurface::new(), Scores::default()).err()
        };
        assert_eq!(
            bad(0, 20, 30),
            Some(EngineError::InvalidDimensions {
                width: 0,
                height: 20
            })
        );
        assert_eq!(
            bad(10, 0, 30),
            Some(EngineError::InvalidDimensions {
                width: 10,
                height: 0
            })
        );
        assert_eq!(bad(10, 20, 0), Some(EngineError::InvalidTileSize(0)));
        assert_eq!(bad(1, 1, 1), None);
    }

    #[test]
    fn test_huge_tile_is_rejected_and_largest_tile_draws() {
        let config = |tile_size| EngineConfig {
            width: 10,
            height: 20,
            tile_size,
            seed: Some(1),
        };
        let err = GameEngine::new(config(500_000_000), RecordingSurface::new(), Scores::default())
            .err();
        assert_eq!(err, Some(EngineError::InvalidTileSize(500_000_000)));

        let tile = 214_748_364;
        let mut e =
            GameEngine::new(config(tile), RecordingSurface::new(), Scores::default()).unwrap();
        e.start();
        e.draw();
        assert_eq!(
            e.surface().ops[0],
            DrawOp::Clear {
                width: 10 * tile,
                height: 20 * tile
            }
        );
        let last_row = e.surface().rects(Fill::Empty).map(|(_, y, _, _)| y).max();
        assert_eq!(last_row, Some(19 * tile));
    }

    #[test]
    fn test_new_engine_is_idle() {
        let mut e = engine(10, 20);
        assert_eq!(e.phase(), Phase::Idle);
        assert!(e.current().is_none());
        assert_eq!(e.next_queue().len(), NEXT_QUEUE_LEN);
        assert_eq!(e.score(), 0);
        assert_eq!(e.drop_interval_ms(), 1000);
        assert!(e.observer().0.is_empty());

        // Commands do nothing before start
        e.step();
        e.hard_drop();
        e.hold();
        e.rotate();
        e.move_piece(1);
        assert!(e.current().is_none());
        assert_eq!(e.hold_piece(), None);
        assert!(!e.frame(100.0));
        assert!(e.surface().ops.is_empty());
    }

    #[test]
    fn test_start_spawns_from_queue_front() {
        let mut e = engine(10, 20);
        let before = e.next_queue().to_vec();
        e.start();

        assert_eq!(e.phase(), Phase::Running);
        assert!(e.is_running());
        assert_eq!(e.observer().0, vec![0]);
        let piece = e.current().unwrap();
        assert_eq!(piece.kind, before[0]);
        assert_eq!(piece.y, 0);
        assert_eq!(
            piece.x,
            (10 - piece.matrix.width() as i32).div_euclid(2)
        );
        assert_eq!(&e.next_queue()[..2], &before[1..]);
        assert_eq!(e.next_queue().len(), NEXT_QUEUE_LEN);
        assert!(e.can_hold());
    }

    #[test]
    fn test_start_resets_previous_session() {
        let mut e = running(10, 20);
        e.hold();
        fill(&mut e, &[(0, 19), (1, 19)]);
        e.score = 700;
        e.drop_interval_ms = 500;
        e.game_over = Some(GameOver { score: 700 });

        e.start();

        assert_eq!(e.score(), 0);
        assert_eq!(e.drop_interval_ms(), 1000);
        assert_eq!(e.hold_piece(), None);
        assert!(e.can_hold());
        assert!(e.grid().cells().iter().all(|&c| c == EMPTY_CELL));
        assert_eq!(e.take_game_over(), None);
        assert_eq!(e.observer().0, vec![0, 0]);
    }

    #[test]
    fn test_collide_bounds_and_cells() {
        let mut e = running(10, 20);
        let o = |x, y| Piece {
            kind: ShapeKind::O,
            matrix: Matrix::for_kind(ShapeKind::O),
            x,
            y,
        };
        assert!(!e.collide(&o(0, 0)));
        assert!(!e.collide(&o(8, 18)));
        assert!(e.collide(&o(-1, 0)));
        assert!(e.collide(&o(9, 0)));
        assert!(e.collide(&o(0, 19)));
        // rows above the field are permitted
        assert!(!e.collide(&o(4, -2)));
        assert!(!e.collide(&o(4, -1)));

        fill(&mut e, &[(5, 10)]);
        assert!(e.collide(&o(4, 9)));
        assert!(e.collide(&o(5, 10)));
        assert!(!e.collide(&o(6, 10)));
        assert!(!e.collide(&o(4, 11)));
    }

    #[test]
    fn test_step_descends_then_locks() {
        let mut e = running(10, 20);
        put(&mut e, ShapeKind::O, 4, 17);

        e.step();
        assert_eq!(pos(&e), (4, 18));

        e.step();
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(e.grid().get(x, y), Some(ShapeKind::O.tag()));
        }
        assert_eq!(e.current().unwrap().y, 0);
        assert!(e.can_hold());
    }

    #[test]
    fn test_soft_drop_matches_step() {
        let mut a = running(10, 20);
        let mut b = running(10, 20);
        put(&mut a, ShapeKind::T, 2, 17);
        put(&mut b, ShapeKind::T, 2, 17);
        for _ in 0..3 {
            a.step();
            b.soft_drop();
        }
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.current(), b.current());
    }

    #[test]
    fn test_hard_drop_lands_and_locks() {
        let mut e = running(10, 20);
        fill(&mut e, &[(1, 15)]);
        put(&mut e, ShapeKind::I, 0, 0);

        e.hard_drop();

        for x in 0..4 {
            assert_eq!(e.grid().get(x, 14), Some(ShapeKind::I.tag()));
        }
        assert_eq!(e.grid().get(0, 19), Some(EMPTY_CELL));
        assert_eq!(e.current().unwrap().y, 0);
    }

    #[test]
    fn test_move_reverts_at_walls_and_never_locks() {
        let mut e = running(10, 20);
        put(&mut e, ShapeKind::O, 0, 19 - 1);

        e.move_piece(-1);
        assert_eq!(pos(&e), (0, 18));

        e.move_piece(1);
        assert_eq!(pos(&e), (1, 18));

        put(&mut e, ShapeKind::O, 8, 5);
        e.move_piece(1);
        assert_eq!(pos(&e), (8, 5));
        assert!(e.grid().cells().iter().all(|&c| c == EMPTY_CELL));
    }

    #[test]
    fn test_move_blocked_by_locked_cell() {
        let mut e = running(10, 20);
        fill(&mut e, &[(3, 6)]);
        put(&mut e, ShapeKind::O, 4, 5);
        e.move_piece(-1);
        assert_eq!(pos(&e), (4, 5));
    }

    #[test]
    fn test_four_rotations_restore_piece() {
        let mut e = running(10, 20);
        for kind in ShapeKind::ALL {
            put(&mut e, kind, 4, 8);
            let start = e.current().cloned().unwrap();
            let mut dims = Vec::new();
            for _ in 0..4 {
                e.rotate();
                let p = e.current().unwrap();
                dims.push((p.matrix.height(), p.matrix.width()));
            }
            assert_eq!(e.current(), Some(&start), "{:?}", kind);
            let (h, w) = (start.matrix.height(), start.matrix.width());
            assert_eq!(dims, vec![(w, h), (h, w), (w, h), (h, w)]);
        }
    }

    fn kick_case(obstacles: &[(i32, i32)]) -> TestEngine {
        let mut e = running(10, 20);
        fill(&mut e, obstacles);
        put(&mut e, ShapeKind::I, 3, 0);
        e.rotate();
        e
    }

    #[test]
    fn test_rotation_kicks_in_order() {
        // Vertical I at column 3 would cover (3, 0..4); (3, 2) blocks it.
        let e = kick_case(&[(3, 2)]);
        assert_eq!(pos(&e), (2, 0));
        assert_eq!(e.current().unwrap().matrix.width(), 1);

        // -1 blocked, +1 wins
        let e = kick_case(&[(3, 2), (2, 2)]);
        assert_eq!(pos(&e), (4, 0));

        // -1 and +1 blocked, -2 wins
        let e = kick_case(&[(2, 2), (3, 2), (4, 2)]);
        assert_eq!(pos(&e), (1, 0));

        // only +2 left
        let e = kick_case(&[(1, 2), (2, 2), (3, 2), (4, 2)]);
        assert_eq!(pos(&e), (5, 0));
    }

    #[test]
    fn test_rotation_without_fit_restores_matrix_and_column() {
        let e = kick_case(&[(1, 2), (2, 2), (3, 2), (4, 2), (5, 2)]);
        let piece = e.current().unwrap();
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(piece.matrix, Matrix::for_kind(ShapeKind::I));
    }

    #[test]
    fn test_rotation_kicks_off_the_right_wall() {
        let mut e = running(10, 20);
        put(&mut e, ShapeKind::T, 8, 5);
        e.current.as_mut().unwrap().rotate_cw();
        e.rotate();
        // 3 columns wide again; 8..=10 is out, -1 fits
        assert_eq!(pos(&e), (7, 5));
        assert_eq!(e.current().unwrap().matrix.width(), 3);

        // A vertical I hugging the right wall has nowhere to turn
        put(&mut e, ShapeKind::I, 9, 5);
        e.current.as_mut().unwrap().rotate_cw();
        let before = e.current().cloned();
        e.rotate();
        assert_eq!(e.current().cloned(), before);
    }

    #[test]
    fn test_rotation_kicks_off_the_left_wall() {
        // J pointing down-left, flush at column 0: cells (0,5) (1,5) (0,6) (0,7)
        let setup = |obstacles: &[(i32, i32)]| {
            let mut e = running(10, 20);
            fill(&mut e, obstacles);
            put(&mut e, ShapeKind::J, 0, 5);
            e.current.as_mut().unwrap().rotate_cw();
            assert!(!e.collide(e.current().unwrap()));
            e.rotate();
            e
        };
        let turned = Matrix::for_kind(ShapeKind::J).rotated_cw().rotated_cw();

        // Turned in place the hook lands on (2, 6); -1 leaves the grid, +1 fits
        let e = setup(&[(2, 6)]);
        assert_eq!(pos(&e), (1, 5));
        assert_eq!(e.current().unwrap().matrix, turned);

        // +1 blocked too, -2 leaves the grid, +2 fits
        let e = setup(&[(2, 6), (3, 6)]);
        assert_eq!(pos(&e), (2, 5));
        assert_eq!(e.current().unwrap().matrix, turned);
    }

    #[test]
    fn test_lock_drops_cells_above_top() {
        let mut e = running(10, 20);
        put(&mut e, ShapeKind::I, 0, -2);
        e.current.as_mut().unwrap().rotate_cw();

        e.lock();

        assert!(e.current().is_none());
        assert_eq!(e.grid().get(0, 0), Some(ShapeKind::I.tag()));
        assert_eq!(e.grid().get(0, 1), Some(ShapeKind::I.tag()));
        assert_eq!(e.grid().get(0, 2), Some(EMPTY_CELL));
    }

    #[test]
    fn test_bottom_row_clear_scenario() {
        let mut e = running(10, 20);

        put(&mut e, ShapeKind::I, 0, 0);
        e.hard_drop();
        put(&mut e, ShapeKind::I, 4, 0);
        e.hard_drop();
        assert_eq!(e.score(), 0);

        // O fills columns 8-9 of rows 18 and 19
        put(&mut e, ShapeKind::O, 8, 0);
        e.hard_drop();

        assert_eq!(e.score(), 100);
        assert_eq!(e.drop_interval_ms(), 980);
        assert_eq!(e.observer().0, vec![0, 100]);
        assert_eq!(e.grid().height(), 20);
        assert_eq!(e.grid().width(), 10);
        // The O's upper half dropped into row 19
        let bottom: Vec<_> = e.grid().row(19).to_vec();
        assert_eq!(bottom, vec![0, 0, 0, 0, 0, 0, 0, 0, 4, 4]);
        assert!(e.grid().row(18).iter().all(|&c| c == EMPTY_CELL));
    }

    #[test]
    fn test_clear_non_contiguous_rows_updates_score_once() {
        let mut e = running(4, 6);
        e.current = None;
        e.grid = Grid::from_rows(&["....", "....", "####", "#...", "####", ".##."]);

        let lines = e.clear_lines();

        assert_eq!(lines, 2);
        assert_eq!(e.score(), 200);
        assert_eq!(e.drop_interval_ms(), 960);
        assert_eq!(e.observer().0, vec![0, 200]);
        assert_eq!(e.grid(), &Grid::from_rows(&["....", "....", "....", "....", "#...", ".##."]));
    }

    #[test]
    fn test_clear_lines_without_full_rows() {
        let mut e = running(10, 20);
        fill(&mut e, &[(0, 19)]);
        assert_eq!(e.clear_lines(), 0);
        assert_eq!(e.score(), 0);
        assert_eq!(e.observer().0, vec![0]);
    }

    #[test]
    fn test_drop_interval_floor() {
        let mut e = running(4, 4);
        e.drop_interval_ms = 110;
        fill(&mut e, &[(0, 3), (1, 3), (2, 3), (3, 3)]);
        e.clear_lines();
        assert_eq!(e.drop_interval_ms(), 100);
    }

    #[test]
    fn test_spawn_collision_ends_session() {
        let mut e = running(10, 20);
        e.score = 300;
        e.current = None;
        // columns 3..=6 of the top two rows cover every spawn footprint
        for x in 3..=6 {
            fill(&mut e, &[(x, 0), (x, 1)]);
        }

        e.spawn();

        assert_eq!(e.phase(), Phase::GameOver);
        assert!(!e.is_running());
        assert!(e.current().is_some());
        assert_eq!(e.take_game_over(), Some(GameOver { score: 300 }));
        assert_eq!(e.take_game_over(), None);

        // Stopped: no ticking, no drawing, no commands
        let ops = e.surface().ops.len();
        assert!(!e.frame(5000.0));
        assert_eq!(e.surface().ops.len(), ops);
        let before = e.current().cloned();
        e.step();
        e.move_piece(-1);
        e.hold();
        assert_eq!(e.current().cloned(), before);
    }

    #[test]
    fn test_hold_once_per_piece() {
        let mut e = running(10, 20);
        let first = e.current().unwrap().kind;
        let upcoming = e.next_queue()[0];

        e.hold();
        assert_eq!(e.hold_piece(), Some(first));
        assert_eq!(e.current().unwrap().kind, upcoming);
        assert!(!e.can_hold());

        let current = e.current().cloned();
        let queue = e.next_queue().to_vec();
        e.hold();
        assert_eq!(e.hold_piece(), Some(first));
        assert_eq!(e.current().cloned(), current);
        assert_eq!(e.next_queue(), &queue[..]);
    }

    #[test]
    fn test_hold_swap_uses_template_orientation() {
        let mut e = running(10, 20);
        put(&mut e, ShapeKind::L, 1, 6);
        e.hold();
        assert_eq!(e.hold_piece(), Some(ShapeKind::L));

        // next piece locks; hold becomes available again
        e.hard_drop();
        assert!(e.can_hold());

        put(&mut e, ShapeKind::T, 2, 4);
        e.rotate();
        e.hold();

        let piece = e.current().unwrap();
        assert_eq!(piece.kind, ShapeKind::L);
        assert_eq!(piece.matrix, Matrix::for_kind(ShapeKind::L));
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(e.hold_piece(), Some(ShapeKind::T));
        assert!(!e.can_hold());
    }

    #[test]
    fn test_hold_swap_collision_ends_session() {
        let mut e = running(10, 20);
        e.hold = Some(ShapeKind::I);
        fill(&mut e, &[(3, 0), (4, 0), (5, 0), (6, 0)]);
        put(&mut e, ShapeKind::O, 0, 10);

        e.hold();

        assert_eq!(e.phase(), Phase::GameOver);
        assert_eq!(e.current().unwrap().kind, ShapeKind::I);
        assert_eq!(e.hold_piece(), Some(ShapeKind::O));
        assert_eq!(e.take_game_over(), Some(GameOver { score: 0 }));
    }

    #[test]
    fn test_frame_accumulates_and_steps() {
        let mut e = running(10, 20);
        put(&mut e, ShapeKind::O, 4, 0);

        // first frame only records the clock
        assert!(e.frame(5000.0));
        assert_eq!(pos(&e), (4, 0));

        // exactly the interval is not enough
        assert!(e.frame(6000.0));
        assert_eq!(pos(&e), (4, 0));

        assert!(e.frame(6016.0));
        assert_eq!(pos(&e), (4, 1));

        // timer was reset
        assert!(e.frame(6032.0));
        assert_eq!(pos(&e), (4, 1));
    }

    #[test]
    fn test_frame_ignores_clock_going_backwards() {
        let mut e = running(10, 20);
        put(&mut e, ShapeKind::O, 4, 0);
        e.frame(5000.0);
        e.frame(1000.0);
        e.frame(1900.0);
        assert_eq!(pos(&e), (4, 0));
    }

    #[test]
    fn test_frame_draws() {
        let mut e = running(10, 20);
        e.frame(0.0);
        assert_eq!(
            e.surface().ops[0],
            DrawOp::Clear {
                width: 300,
                height: 600
            }
        );
    }

    #[test]
    fn test_draw_geometry() {
        let mut e = running(10, 20);
        put(&mut e, ShapeKind::O, 4, 0);
        fill(&mut e, &[(0, 19)]);
        e.surface_mut().ops.clear();

        e.draw();

        let s = e.surface();
        assert_eq!(s.ops.len(), 1 + 200 + 4);
        assert_eq!(s.rects(Fill::Empty).count(), 199);
        assert_eq!(s.rects(Fill::Locked).collect::<Vec<_>>(), vec![(0, 570, 29, 29)]);
        assert_eq!(
            s.rects(Fill::Active).collect::<Vec<_>>(),
            vec![(120, 0, 29, 29), (150, 0, 29, 29), (120, 30, 29, 29), (150, 30, 29, 29)]
        );
    }

    #[test]
    fn test_draw_skips_rows_above_field() {
        let mut e = running(10, 20);
        put(&mut e, ShapeKind::I, 0, -2);
        e.current.as_mut().unwrap().rotate_cw();
        e.surface_mut().ops.clear();

        e.draw();

        assert_eq!(
            e.surface().rects(Fill::Active).collect::<Vec<_>>(),
            vec![(0, 0, 29, 29), (0, 30, 29, 29)]
        );
    }

    #[test]
    fn test_draw_does_not_mutate_state() {
        let mut e = running(10, 20);
        let snap = e.snapshot();
        let piece = e.current().cloned();
        let grid = e.grid().clone();
        e.draw();
        assert_eq!(e.snapshot(), snap);
        assert_eq!(e.current().cloned(), piece);
        assert_eq!(e.grid(), &grid);
    }

    #[test]
    fn test_apply_dispatch() {
        let mut e = running(10, 20);
        put(&mut e, ShapeKind::O, 4, 5);

        e.apply(GameAction::MoveLeft);
        assert_eq!(pos(&e), (3, 5));
        e.apply(GameAction::MoveRight);
        e.apply(GameAction::MoveRight);
        assert_eq!(pos(&e), (5, 5));
        e.apply(GameAction::SoftDrop);
        assert_eq!(pos(&e), (5, 6));
        e.apply(GameAction::HardDrop);
        assert_eq!(e.grid().get(5, 19), Some(ShapeKind::O.tag()));
        e.apply(GameAction::Hold);
        assert!(!e.can_hold());

        e.end_session();
        e.apply(GameAction::Restart);
        assert!(e.is_running());
        assert_eq!(e.hold_piece(), None);
    }

    #[test]
    fn test_seeded_engines_agree() {
        let mut a = running(10, 20);
        let mut b = running(10, 20);
        for _ in 0..10 {
            assert_eq!(a.current().map(|p| p.kind), b.current().map(|p| p.kind));
            assert_eq!(a.next_queue(), b.next_queue());
            a.hard_drop();
            b.hard_drop();
        }
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut e = running(10, 20);
        e.hold();
        let snap = e.snapshot();
        assert_eq!(snap.phase, Phase::Running);
        assert!(snap.is_running());
        assert_eq!(snap.hold, e.hold_piece());
        assert!(!snap.can_hold);
        assert_eq!(&snap.next_queue[..], e.next_queue());
        assert_eq!((snap.width, snap.height, snap.tile_size), (10, 20, 30));
        assert_eq!(snap.surface_size(), (300, 600));
    }
}
