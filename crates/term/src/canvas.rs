//! TermCanvas: a [`Surface`] backed by a character framebuffer.
//!
//! The engine paints in surface pixels (`tile_size` per grid cell). The canvas
//! scales every rectangle onto terminal cells, `cell_w x cell_h` characters per
//! tile, offset by an origin the view sets each frame.

use crate::core::{Fill, Surface};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Styles for the three fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: CellStyle,
    pub empty: (char, CellStyle),
    pub locked: (char, CellStyle),
    pub active: (char, CellStyle),
}

impl Default for Palette {
    fn default() -> Self {
        let board_bg = Rgb::new(17, 17, 17);
        Self {
            background: CellStyle::new(Rgb::new(80, 80, 90), board_bg),
            empty: ('·', CellStyle::new(Rgb::new(70, 70, 80), board_bg).dim()),
            locked: ('█', CellStyle::new(Rgb::new(51, 153, 255), board_bg)),
            active: ('█', CellStyle::new(Rgb::new(255, 153, 0), board_bg).bold()),
        }
    }
}

pub struct TermCanvas {
    fb: FrameBuffer,
    tile: u32,
    cell_w: u16,
    cell_h: u16,
    origin_x: u16,
    origin_y: u16,
    palette: Palette,
}

impl TermCanvas {
    /// 2x1 compensates for the usual terminal glyph aspect ratio.
    pub fn new(tile_size: u32) -> Self {
        Self::with_cell_size(tile_size, 2, 1)
    }

    /// `tile_size` must be nonzero; the engine rejects zero before drawing.
    pub fn with_cell_size(tile_size: u32, cell_w: u16, cell_h: u16) -> Self {
        Self {
            fb: FrameBuffer::new(0, 0),
            tile: tile_size.max(1),
            cell_w,
            cell_h,
            origin_x: 0,
            origin_y: 0,
            palette: Palette::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    pub fn cell_h(&self) -> u16 {
        self.cell_h
    }

    pub fn fb(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn fb_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    /// Terminal cell where surface pixel (0, 0) lands
    pub fn set_origin(&mut self, x: u16, y: u16) {
        self.origin_x = x;
        self.origin_y = y;
    }

    pub fn origin(&self) -> (u16, u16) {
        (self.origin_x, self.origin_y)
    }

    /// Terminal columns and rows covered by a grid of `width x height` cells
    pub fn board_size(&self, width: u16, height: u16) -> (u16, u16) {
        (
            width.saturating_mul(self.cell_w),
            height.saturating_mul(self.cell_h),
        )
    }

    /// Half-open cell span `[start, end)` covering pixels `[px, px + len)`
    fn span(&self, px: u32, len: u32, cells_per_tile: u16, origin: u16) -> (u16, u16) {
        let per = u64::from(cells_per_tile);
        let tile = u64::from(self.tile);
        let start = u64::from(px) * per / tile;
        let end = (u64::from(px) + u64::from(len)) * per;
        let end = (end + tile - 1) / tile;
        let clamp = |v: u64| u16::try_from(v).unwrap_or(u16::MAX).saturating_add(origin);
        (clamp(start), clamp(end))
    }

    fn paint(&mut self, x: u32, y: u32, width: u32, height: u32, ch: char, style: CellStyle) {
        let (x0, x1) = self.span(x, width, self.cell_w, self.origin_x);
        let (y0, y1) = self.span(y, height, self.cell_h, self.origin_y);
        self.fb.fill_rect(x0, y0, x1 - x0, y1 - y0, ch, style);
    }
}

impl Surface for TermCanvas {
    fn clear(&mut self, width: u32, height: u32) {
        let style = self.palette.background;
        self.paint(0, 0, width, height, ' ', style);
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, fill: Fill) {
        let (ch, style) = match fill {
            Fill::Empty => self.palette.empty,
            Fill::Locked => self.palette.locked,
            Fill::Active => self.palette.active,
        };
        self.paint(x, y, width, height, ch, style);
    }
}
