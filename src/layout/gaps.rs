//! Cumulative extra spacing at half-hour and hour column boundaries.

use super::{GAP_WIDTH_NARROW, GAP_WIDTH_WIDE};

/// Spacing multiplier for the current hover value: 1.0 idle, `ratio` at
/// full expansion.
pub fn expansion_factor(hover: f32, ratio: f32) -> f32 {
    1.0 + (ratio - 1.0) * hover
}

/// Total pixel offset contributed by the first `gap_count` boundaries of a
/// row, scaled by the expansion factor.
///
/// The grid is hour-anchored, so boundary positions are fixed regardless of
/// the configured start time: boundary k sits at k*30 minutes into the row,
/// wide at full hours, narrow at half hours.
pub fn cumulative_gap_offset(gap_count: i32, expansion: f32) -> f32 {
    let mut total = 0.0;
    for k in 1..=gap_count.max(0) {
        let base = if (k * 30) % 60 == 0 { GAP_WIDTH_WIDE } else { GAP_WIDTH_NARROW };
        total += base * expansion;
    }
    total
}
