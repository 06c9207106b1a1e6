//! Inverse mapping: pointer position to dot index, segment, date or arrow.

use chrono::NaiveDate;
use eframe::egui::{Pos2, Rect};
use uuid::Uuid;

use super::gaps::cumulative_gap_offset;
use super::{BASE_MARGIN, CALENDAR_HEIGHT, FOOTER_GAP, Layout, dims};

/// Which jump-to-today arrow was hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowSide {
    Left,
    Right,
}

/// Resolved hit answer. Mutually exclusive; segments and dots take priority
/// over calendar elements when rectangles overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hit {
    None,
    Dot(i32),
    Segment(Uuid),
    Date(NaiveDate),
    Arrow(ArrowSide),
}

impl Layout {
    /// Resolve a pointer position against everything at once, in fixed
    /// precedence order.
    pub fn hit_test(&self, pos: Pos2, view_date: NaiveDate, today: NaiveDate) -> Hit {
        if let Some(id) = self.segment_at(pos) {
            return Hit::Segment(id);
        }
        if let Some(index) = self.dot_at(pos) {
            return Hit::Dot(index);
        }
        if let Some(side) = self.arrow_at(pos, view_date, today) {
            return Hit::Arrow(side);
        }
        if let Some(date) = self.date_at(pos, view_date) {
            return Hit::Date(date);
        }
        Hit::None
    }

    /// Dot index under the pointer, if any.
    ///
    /// Narrows column and row by axis-aligned scans, then confirms against
    /// the dot center with a Manhattan distance check. The mixed metric is
    /// deliberate (a cheap confirmation after narrowing); changing it to
    /// Euclidean would change which borderline pixels hit.
    pub fn dot_at(&self, pos: Pos2) -> Option<i32> {
        if !self.content.contains(pos) {
            return None;
        }
        let (top_margin, _) = dims::vertical_margins(self.anim);
        if pos.y < self.content.top() + top_margin {
            return None;
        }

        let radius = self.metrics.dot_radius;
        let accept = radius * self.metrics.dot_hit_factor;
        let spacing = self.spacing();

        let rel_x = pos.x - (self.content.left() + BASE_MARGIN + self.sidebar_width());
        let mut column = None;
        for col in 0..self.grid.cols {
            let gap = cumulative_gap_offset(self.grid.gaps_before(col), self.expansion());
            let center_x = col as f32 * self.col_unit() + gap + radius;
            if (rel_x - center_x).abs() < accept {
                column = Some(col);
                break;
            }
        }
        let column = column?;

        let mut row = None;
        let mut y = self.content.top() + top_margin;
        for r in 0..self.grid.rows {
            let block = self.row_heights.get(r as usize).copied().unwrap_or(radius * 2.0) + spacing;
            if pos.y >= y && pos.y < y + block {
                row = Some(r);
                break;
            }
            y += block;
        }
        let row = row?;

        let center = self.dot_center(row, column);
        let manhattan = (pos.x - center.x).abs() + (pos.y - center.y).abs();
        if manhattan >= accept {
            return None;
        }

        let index = self.grid.index_of(row, column);
        self.grid.index_valid(index).then_some(index)
    }

    /// Segment under the pointer, if any. First match in list order wins,
    /// the preview included.
    ///
    /// The hit band is `segment_hit_band` pixels either side of the line
    /// regardless of `seg_layer_step`: widening the stacking must not widen
    /// the hit area.
    pub fn segment_at(&self, pos: Pos2) -> Option<Uuid> {
        if !self.content.contains(pos) {
            return None;
        }
        let band = self.metrics.segment_hit_band;
        for segment in &self.segments {
            for line in self.segment_lines(segment) {
                let rect = Rect::from_min_max(
                    Pos2::new(line.x1, line.y - band),
                    Pos2::new(line.x2, line.y + band),
                );
                if rect.contains(pos) {
                    return Some(segment.id);
                }
            }
        }
        None
    }

    /// Calendar date under the pointer, if the strip is visible.
    pub fn date_at(&self, pos: Pos2, view_date: NaiveDate) -> Option<NaiveDate> {
        if !self.content.contains(pos) || self.anim.hover <= 0.01 {
            return None;
        }
        let bottom_limit =
            self.content.bottom() - CALENDAR_HEIGHT - BASE_MARGIN - FOOTER_GAP;
        if pos.y <= bottom_limit {
            return None;
        }

        let strip = self.calendar_strip();
        let slot = ((pos.x - strip.first_center_x) / strip.step_x).round() as i32;
        (0..strip.visible_count)
            .contains(&slot)
            .then(|| strip.slot_date(view_date, slot))
    }

    /// Arrow affordance under the pointer. First matching rect wins.
    pub fn arrow_at(
        &self,
        pos: Pos2,
        view_date: NaiveDate,
        today: NaiveDate,
    ) -> Option<ArrowSide> {
        self.arrow_rects(view_date, today)
            .into_iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(side, _)| side)
    }
}
