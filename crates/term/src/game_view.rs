//! GameView: the chrome around the playfield.
//!
//! The engine paints the grid itself through [`TermCanvas`]. The view owns
//! everything else on screen: the border, the side panel and overlays. A frame
//! is built in three steps:
//!
//! 1. [`GameView::begin_frame`] clears the framebuffer, draws the border and
//!    points the canvas origin inside it
//! 2. the engine draws (`frame` or `draw`)
//! 3. [`GameView::finish_frame`] fills the side panel from the post-frame
//!    snapshot and puts overlays on top
//!
//! This module is pure (no I/O).

use crate::canvas::TermCanvas;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the bordered board sits in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

impl BoardLayout {
    /// First terminal cell inside the border
    pub fn inner_origin(&self) -> (u16, u16) {
        (self.frame_x + 1, self.frame_y + 1)
    }
}

const KEY_HELP: [&str; 6] = [
    "←→ move",
    "↑  rotate",
    "↓  soft drop",
    "spc hard drop",
    "c  hold",
    "r  restart  q quit",
];

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Place the board for this snapshot in the viewport.
    pub fn layout(&self, snap: &GameSnapshot, canvas: &TermCanvas, viewport: Viewport) -> BoardLayout {
        let (board_w, board_h) = canvas.board_size(snap.width, snap.height);
        let frame_w = board_w.saturating_add(2);
        let frame_h = board_h.saturating_add(2);
        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
        }
    }

    /// Clear the canvas framebuffer, draw the border and set the canvas origin
    /// for the engine's draw.
    pub fn begin_frame(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        canvas: &mut TermCanvas,
    ) -> BoardLayout {
        let layout = self.layout(snap, canvas, viewport);
        let fb = canvas.fb_mut();
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        draw_border(fb, layout, border);

        let (ox, oy) = layout.inner_origin();
        canvas.set_origin(ox, oy);
        layout
    }

    /// Draw the side panel and overlays above the engine's output.
    pub fn finish_frame(&self, snap: &GameSnapshot, layout: BoardLayout, canvas: &mut TermCanvas) {
        let fb = canvas.fb_mut();
        let viewport = Viewport::new(fb.width(), fb.height());
        self.draw_side_panel(fb, snap, viewport, layout);
        if !snap.is_game_over() {
            return;
        }
        let mid_y = layout.frame_y.saturating_add(layout.frame_h / 2);

        let mut line = String::with_capacity(24);
        line.push_str("GAME OVER  score ");
        line.push_str(&snap.score.to_string());
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        put_centered(fb, layout, mid_y, &line, style);

        let hint = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        put_centered(fb, layout, mid_y.saturating_add(1), "r restart  q quit", hint);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: BoardLayout,
    ) {
        let panel_x = layout
            .frame_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "DROP ms", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.drop_interval_ms, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        let hold = snap.hold.map(|k| k.letter()).unwrap_or("-");
        fb.put_str(panel_x, y, hold, if snap.can_hold { value } else { dim });
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for kind in snap.next_queue {
            fb.put_str(panel_x, y, kind.letter(), value);
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        for line in KEY_HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, layout: BoardLayout, style: CellStyle) {
    let BoardLayout {
        frame_x: x,
        frame_y: y,
        frame_w: w,
        frame_h: h,
    } = layout;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn put_centered(fb: &mut FrameBuffer, layout: BoardLayout, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    let x = if text_w >= layout.frame_w {
        layout.frame_x.saturating_sub((text_w - layout.frame_w) / 2)
    } else {
        layout.frame_x + (layout.frame_w - text_w) / 2
    };
    fb.put_str(x, y, text, style);
}
