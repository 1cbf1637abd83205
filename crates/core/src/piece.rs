//! Piece module - the active falling shape instance

use crate::shapes::Matrix;
use crate::types::ShapeKind;

/// Active falling piece
///
/// Owns its rotation matrix; `(x, y)` is the grid position of the matrix's
/// top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub matrix: Matrix,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a piece in template orientation, centered on a grid of
    /// `grid_width` columns at row 0.
    ///
    /// The column is `floor((grid_width - shape_width) / 2)` and may be negative
    /// on grids narrower than the shape.
    pub fn spawn(kind: ShapeKind, grid_width: usize) -> Self {
        let matrix = Matrix::for_kind(kind);
        let x = (grid_width as i32 - matrix.width() as i32).div_euclid(2);
        Self {
            kind,
            matrix,
            x,
            y: 0,
        }
    }

    /// Rotate the owned matrix 90° clockwise in place
    pub fn rotate_cw(&mut self) {
        self.matrix = self.matrix.rotated_cw();
    }

    /// Absolute grid coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
