//! Surface module - the engine's outbound capabilities
//!
//! The engine never knows what it draws on or who listens to the score. A host
//! hands it a [`Surface`] for painting and a [`ScoreObserver`] for score
//! updates; both are write-only from the engine's side.

/// What a painted rectangle represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fill {
    /// Empty grid cell
    Empty,
    /// Locked grid cell
    Locked,
    /// Cell of the falling piece
    Active,
}

/// A 2D drawing target measured in surface pixels
pub trait Surface {
    /// Clear a `width x height` region starting at the origin
    fn clear(&mut self, width: u32, height: u32);

    /// Paint an axis-aligned rectangle
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, fill: Fill);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear(&mut self, width: u32, height: u32) {
        (**self).clear(width, height)
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, fill: Fill) {
        (**self).fill_rect(x, y, width, height, fill)
    }
}

/// Receives the score every time it changes (and `0` on start)
pub trait ScoreObserver {
    fn report(&mut self, score: u32);
}

impl<F: FnMut(u32)> ScoreObserver for F {
    fn report(&mut self, score: u32) {
        self(score)
    }
}

/// A surface that discards everything (headless play, benches)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self, _width: u32, _height: u32) {}

    fn fill_rect(&mut self, _x: u32, _y: u32, _width: u32, _height: u32, _fill: Fill) {}
}

/// An observer that ignores score updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ScoreObserver for NullObserver {
    fn report(&mut self, _score: u32) {}
}

/// One recorded surface call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    Clear { width: u32, height: u32 },
    Rect { x: u32, y: u32, width: u32, height: u32, fill: Fill },
}

/// A surface that records every call, for tests and debugging
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangles of a given fill, in paint order
    pub fn rects(&self, fill: Fill) -> impl Iterator<Item = (u32, u32, u32, u32)> + '_ {
        self.ops.iter().filter_map(move |op| match *op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill: f,
            } if f == fill => Some((x, y, width, height)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: u32, height: u32) {
        self.ops.push(DrawOp::Clear { width, height });
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, fill: Fill) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
        });
    }
}
