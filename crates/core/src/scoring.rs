//! Scoring module - line clear points and gravity speed-up
//!
//! Rules:
//! - Every cleared line is worth [`SCORE_PER_LINE`] points, with no multi-line
//!   bonus.
//! - Every cleared line shortens the drop interval by
//!   [`DROP_SPEEDUP_PER_LINE_MS`], never going below [`DROP_INTERVAL_MIN_MS`].

use crate::types::{DROP_INTERVAL_MIN_MS, DROP_SPEEDUP_PER_LINE_MS, SCORE_PER_LINE};

/// Points for clearing `lines` rows in one event
pub fn line_clear_score(lines: usize) -> u32 {
    (lines as u32).saturating_mul(SCORE_PER_LINE)
}

/// Drop interval after clearing `lines` rows at interval `current_ms`
pub fn next_drop_interval_ms(current_ms: u32, lines: usize) -> u32 {
    let speedup = (lines as u32).saturating_mul(DROP_SPEEDUP_PER_LINE_MS);
    current_ms.saturating_sub(speedup).max(DROP_INTERVAL_MIN_MS)
}
