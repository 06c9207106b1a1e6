//! Forward mapping: grid cells and segments to pixel coordinates.

use eframe::egui::Pos2;

use super::gaps::cumulative_gap_offset;
use super::{BASE_MARGIN, Layout, dims};
use crate::entities::Segment;

/// One row-clipped piece of a segment, in pixels.
///
/// `clip_start`/`clip_end` keep the minute range of the piece so the
/// renderer can split it at the current time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentLine {
    pub row: i32,
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub clip_start: i32,
    pub clip_end: i32,
}

impl Layout {
    /// Center of the dot at (row, col).
    pub fn dot_center(&self, row: i32, col: i32) -> Pos2 {
        let radius = self.metrics.dot_radius;
        let spacing = self.spacing();
        let (top_margin, _) = dims::vertical_margins(self.anim);

        let mut y = self.content.top() + top_margin;
        for i in 0..row.max(0) {
            y += self.row_heights.get(i as usize).copied().unwrap_or(radius * 2.0);
            y += spacing;
        }
        y += radius;

        let gap_offset =
            cumulative_gap_offset(self.grid.gaps_before(col), self.expansion());
        let x = self.content.left()
            + BASE_MARGIN
            + self.sidebar_width()
            + col as f32 * self.col_unit()
            + radius
            + gap_offset;

        Pos2::new(x, y)
    }

    /// Pixel endpoints of a segment, one entry per row it crosses, with the
    /// layer offset resolved into the line's y position.
    pub fn segment_lines(&self, segment: &Segment) -> Vec<SegmentLine> {
        let radius = self.metrics.dot_radius;
        let spacing = self.spacing();
        let rd = self.grid.row_duration;
        let y_offset = radius
            + self.metrics.seg_base_offset
            + segment.layer as f32 * self.metrics.seg_layer_step;

        let mut lines = Vec::new();
        let first_row = segment.start.div_euclid(rd);
        let last_row = segment.end.div_euclid(rd);
        for row in first_row..=last_row {
            let (row_start, row_end) = self.grid.row_span(row);
            let clip_start = segment.start.max(row_start);
            let clip_end = segment.end.min(row_end);
            if clip_start >= clip_end {
                continue;
            }

            let start_col = (clip_start - row_start) / self.grid.interval;
            let first_dot = self.dot_center(row, start_col);
            let x1 = first_dot.x - radius - spacing / 2.0;

            let x2 = if clip_end == row_end {
                // Runs to the row's edge: extend past the last column.
                self.dot_center(row, self.grid.cols - 1).x + radius + spacing / 2.0
            } else {
                let end_col = (clip_end - row_start) / self.grid.interval;
                self.dot_center(row, end_col).x - radius - spacing / 2.0
            };

            lines.push(SegmentLine {
                row,
                x1,
                x2,
                y: first_dot.y + y_offset,
                clip_start,
                clip_end,
            });
        }
        lines
    }
}
