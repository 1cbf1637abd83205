//! Shapes module - the static shape catalog and owned rotation matrices
//!
//! Templates are immutable, shared data. A falling piece never aliases a
//! template: it owns a [`Matrix`] copied from one and rotates that copy.

use crate::types::ShapeKind;

/// Row-major template rows; nonzero means filled.
pub type ShapeTemplate = &'static [&'static [u8]];

/// The seven shape templates, indexed by [`ShapeKind::index`].
pub const SHAPE_TEMPLATES: [ShapeTemplate; 7] = [
    // I
    &[&[1, 1, 1, 1]],
    // J
    &[&[1, 0, 0], &[1, 1, 1]],
    // L
    &[&[0, 0, 1], &[1, 1, 1]],
    // O
    &[&[1, 1], &[1, 1]],
    // S
    &[&[0, 1, 1], &[1, 1, 0]],
    // T
    &[&[0, 1, 0], &[1, 1, 1]],
    // Z
    &[&[1, 1, 0], &[0, 1, 1]],
];

/// Get the template for a shape kind
pub fn template(kind: ShapeKind) -> ShapeTemplate {
    SHAPE_TEMPLATES[kind.index()]
}

/// An owned boolean matrix (`height` rows by `width` columns).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    width: usize,
    height: usize,
    /// Row-major cells (y * width + x)
    cells: Vec<bool>,
}

impl Matrix {
    /// Copy a template into a fresh matrix in spawn orientation
    pub fn from_template(template: ShapeTemplate) -> Self {
        let height = template.len();
        let width = template.first().map_or(0, |row| row.len());
        let cells = template
            .iter()
            .flat_map(|row| row.iter().map(|&v| v != 0))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Spawn-orientation matrix for a kind
    pub fn for_kind(kind: ShapeKind) -> Self {
        Self::from_template(template(kind))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether cell (x, y) is filled; out-of-range reads as empty
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Iterate the (x, y) offsets of every filled cell, row by row
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &filled)| filled)
            .map(move |(i, _)| ((i % width) as i32, (i / width) as i32))
    }

    /// Rotate 90° clockwise.
    ///
    /// An `H×W` matrix becomes `W×H` with `new[x][H-1-y] = old[y][x]`.
    pub fn rotated_cw(&self) -> Self {
        let (old_w, old_h) = (self.width, self.height);
        let mut cells = vec![false; old_w * old_h];
        for y in 0..old_h {
            for x in 0..old_w {
                // new row = x, new column = old_h - 1 - y, new width = old_h
                cells[x * old_h + (old_h - 1 - y)] = self.cells[y * old_w + x];
            }
        }
        Self {
            width: old_h,
            height: old_w,
            cells,
        }
    }
}
