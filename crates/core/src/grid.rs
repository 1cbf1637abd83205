//! Grid module - the fixed-size playfield
//!
//! The grid is a `width x height` matrix of cells, each either empty or holding
//! the tag of the shape that locked there. Storage is a flat row-major `Vec`
//! allocated once; dimensions never change after construction.
//!
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Signed coordinates are accepted everywhere so callers can probe cells above
//! the visible field (y < 0) without casting.

use crate::shapes::Matrix;
use crate::types::{Cell, EMPTY_CELL};

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid. Callers validate that both dimensions are nonzero.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY_CELL; width * height],
        }
    }

    /// Build a grid from text rows: `#` is occupied (tag 1), anything else empty.
    ///
    /// All rows must have the same length. Used for fixtures.
    ///
    /// ```
    /// use tui_blockfall_core::Grid;
    ///
    /// let grid = Grid::from_rows(&["..", "#."]);
    /// assert_eq!((grid.width(), grid.height()), (2, 2));
    /// assert!(grid.is_occupied(0, 1));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            debug_assert_eq!(row.chars().count(), width, "ragged fixture row {}", y);
            for (x, ch) in row.chars().enumerate().take(width) {
                if ch == '#' {
                    grid.cells[y * width + x] = 1;
                }
            }
        }
        grid
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY_CELL)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY_CELL)
    }

    /// Cells of row `y`. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width.max(1))
    }

    /// Whether `matrix` placed with its top-left corner at (x, y) collides.
    ///
    /// A filled cell collides when its column is outside `[0, width)`, its row
    /// is `>= height`, or it lands on an occupied cell. Rows above the field
    /// (y < 0) are allowed and never checked against the grid.
    pub fn collides(&self, matrix: &Matrix, x: i32, y: i32) -> bool {
        matrix.filled_cells().any(|(dx, dy)| {
            let gx = x + dx;
            let gy = y + dy;
            if gx < 0 || gx as usize >= self.width || gy >= self.height as i32 {
                return true;
            }
            gy >= 0 && self.is_occupied(gx, gy)
        })
    }

    /// Write `tag` for every filled cell of `matrix` at (x, y) that lies inside
    /// the field. Cells above the top edge are dropped. Returns the number of
    /// cells written.
    pub fn lock(&mut self, matrix: &Matrix, x: i32, y: i32, tag: Cell) -> usize {
        let mut written = 0;
        for (dx, dy) in matrix.filled_cells() {
            if self.set(x + dx, y + dy, tag) {
                written += 1;
            }
        }
        written
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows above shift down and empty rows fill the top, so the grid keeps
    /// exactly `height` rows. Uses a two-pointer compaction in place.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut cleared = 0;
        let mut write_y = self.height;

        // Scan from bottom to top
        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(EMPTY_CELL);
        cleared
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    /// Get a reference to the flat cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
