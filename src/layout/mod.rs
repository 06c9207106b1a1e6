//! Layout engine: coupled forward/inverse geometry for the dot grid.
//!
//! # Architecture
//!
//! The engine is a pipeline of pure functions over plain data:
//!
//! ```text
//! GridConfig + DayRecord -> Grid -> assign_layers -> row_heights
//!                                -> content_size -> Layout (per-tick context)
//! Layout -> dot_center / segment_lines   (forward, used by the renderer)
//! Layout -> hit_test                     (inverse, used by input handling)
//! ```
//!
//! `Layout::compute` snapshots everything geometry depends on (config,
//! layered segments, animation scalars, content rect) into one immutable
//! context object. It is rebuilt whenever any input changes; there is no
//! hidden cache that can go stale, and nothing in this module paints pixels.
//!
//! # Totality
//!
//! No input combination may panic. Degenerate configuration falls back to
//! documented defaults inside `Grid::from_config`; hit tests on out-of-range
//! coordinates answer "no hit".

pub mod anim;
pub mod calendar;
pub mod coords;
pub mod dims;
pub mod gaps;
pub mod grid;
pub mod hittest;
pub mod layers;
pub mod rows;

pub use anim::AnimScalars;
pub use calendar::CalendarStrip;
pub use coords::SegmentLine;
pub use grid::Grid;
pub use hittest::{ArrowSide, Hit};

use eframe::egui::{Rect, Vec2};

use crate::config::{GridConfig, Metrics};
use crate::entities::{DayRecord, Segment};

/// Outer margin around the grid content.
pub const BASE_MARGIN: f32 = 16.0;
/// Width of the hour sidebar at full reveal.
pub const SIDEBAR_WIDTH: f32 = 40.0;
/// Height of the calendar strip at the bottom.
pub const CALENDAR_HEIGHT: f32 = 30.0;
/// Extra spacing at a half-hour column boundary.
pub const GAP_WIDTH_NARROW: f32 = 14.0;
/// Extra spacing at a full-hour column boundary (fits the hour numeral).
pub const GAP_WIDTH_WIDE: f32 = 36.0;
/// Height of the revealed header area.
pub const HEADER_FULL_HEIGHT: f32 = 42.0;
/// Gap between the last dot row and the calendar strip.
pub const FOOTER_GAP: f32 = 25.0;
/// Minimum horizontal step between calendar day slots.
pub const MIN_CAL_STEP: f32 = 24.0;
/// Width floor while header controls are visible; fits the fixed-size
/// window-control affordances (16 + (6*2+8)*2 + 6*2 + 16).
pub const MIN_HEADER_WIDTH: f32 = 84.0;
/// Horizontal band reserved for a calendar arrow on each side.
pub const CAL_ARROW_AREA: f32 = 30.0;
/// Arrow center inset from the content edge.
pub const CAL_ARROW_INSET: f32 = 15.0;
/// Side length of the square arrow hit rectangle.
pub const CAL_ARROW_HIT: f32 = 24.0;
/// Room for the visual thickness of the lowest segment line in a row.
pub const SEGMENT_LINE_ALLOWANCE: f32 = 4.0;

/// Immutable per-tick geometry context.
///
/// Everything the renderer and the hit tester need for one frame, computed
/// up front from the current configuration, day data and animation scalars.
#[derive(Clone, Debug)]
pub struct Layout {
    pub grid: Grid,
    pub metrics: Metrics,
    pub anim: AnimScalars,
    /// Day segments plus the optional preview, layers assigned.
    pub segments: Vec<Segment>,
    /// Index of the preview inside `segments`, if one is active.
    pub preview_index: Option<usize>,
    pub row_heights: Vec<f32>,
    /// Content bounding box at the current scalars.
    pub content: Rect,
    /// Content size with both scalars at 1.0; keeps the calendar slot count
    /// stable while the box animates.
    pub max_size: Vec2,
}

impl Layout {
    /// Run the full pipeline for one tick.
    ///
    /// `area` is the region the content is centered in (normally the whole
    /// window rect). The preview segment, when present, participates in
    /// layering and geometry exactly like a stored segment.
    pub fn compute(
        config: &GridConfig,
        metrics: &Metrics,
        day: &DayRecord,
        preview: Option<&Segment>,
        anim: AnimScalars,
        area: Rect,
    ) -> Self {
        let grid = Grid::from_config(config);

        let mut segments = day.segments.clone();
        let preview_index = preview.map(|p| {
            segments.push(p.clone());
            segments.len() - 1
        });
        layers::assign_layers(&mut segments);

        let row_heights = rows::row_heights(&grid, &segments, metrics);
        let size = dims::content_size(&grid, &row_heights, metrics, anim);
        let max_size = dims::content_size(&grid, &row_heights, metrics, AnimScalars::FULL);
        let content = Rect::from_min_size(area.min + (area.size() - size) * 0.5, size);

        Self {
            grid,
            metrics: *metrics,
            anim,
            segments,
            preview_index,
            row_heights,
            content,
            max_size,
        }
    }

    pub fn is_preview(&self, index: usize) -> bool {
        self.preview_index == Some(index)
    }

    /// Current spacing expansion factor (1.0 idle .. hover ratio).
    pub fn expansion(&self) -> f32 {
        gaps::expansion_factor(self.anim.hover, self.metrics.hover_expansion_ratio)
    }

    /// Dot spacing at the current hover expansion.
    pub fn spacing(&self) -> f32 {
        self.metrics.dot_spacing * self.expansion()
    }

    /// Sidebar width at the current header reveal.
    pub fn sidebar_width(&self) -> f32 {
        SIDEBAR_WIDTH * self.anim.header
    }

    /// Horizontal stride from one column to the next, gaps excluded.
    pub fn col_unit(&self) -> f32 {
        self.metrics.dot_radius * 2.0 + self.spacing()
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use eframe::egui::{Pos2, Rect};

    use super::*;

    /// Layout over an area that matches the content size exactly, so the
    /// content rect starts at the origin.
    pub fn layout_at_origin(
        config: &GridConfig,
        metrics: &Metrics,
        day: &DayRecord,
        anim: AnimScalars,
    ) -> Layout {
        let grid = Grid::from_config(config);
        let mut segments = day.segments.clone();
        layers::assign_layers(&mut segments);
        let heights = rows::row_heights(&grid, &segments, metrics);
        let size = dims::content_size(&grid, &heights, metrics, anim);
        let area = Rect::from_min_size(Pos2::ZERO, size);
        Layout::compute(config, metrics, day, None, anim, area)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Pos2, Rect};

    use super::*;

    #[test]
    fn test_preview_participates_in_layering() {
        let mut day = DayRecord::default();
        day.add_segment(Segment::new(0, 60, [255, 255, 255]));
        let preview = Segment::new(30, 90, [255, 255, 255]);

        let layout = Layout::compute(
            &GridConfig::default(),
            &Metrics::default(),
            &day,
            Some(&preview),
            AnimScalars::default(),
            Rect::from_min_size(Pos2::ZERO, Vec2::splat(600.0)),
        );

        assert_eq!(layout.segments.len(), 2);
        let pi = layout.preview_index.expect("preview present");
        assert!(layout.is_preview(pi));
        assert_eq!(layout.segments[pi].layer, 1, "preview overlaps, stacks above");
    }

    #[test]
    fn test_content_is_centered_in_area() {
        let day = DayRecord::default();
        let area = Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::splat(1000.0));
        let layout = Layout::compute(
            &GridConfig::default(),
            &Metrics::default(),
            &day,
            None,
            AnimScalars::default(),
            area,
        );
        let slack_left = layout.content.min.x - area.min.x;
        let slack_right = area.max.x - layout.content.max.x;
        assert!((slack_left - slack_right).abs() < 0.5);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut day = DayRecord::default();
        day.add_segment(Segment::new(0, 90, [1, 2, 3]));
        day.add_segment(Segment::new(30, 60, [4, 5, 6]));

        let area = Rect::from_min_size(Pos2::ZERO, Vec2::splat(800.0));
        let a = Layout::compute(
            &GridConfig::default(),
            &Metrics::default(),
            &day,
            None,
            AnimScalars::default(),
            area,
        );
        let b = Layout::compute(
            &GridConfig::default(),
            &Metrics::default(),
            &day,
            None,
            AnimScalars::default(),
            area,
        );
        assert_eq!(a.segments, b.segments);
        assert_eq!(a.row_heights, b.row_heights);
        assert_eq!(a.content, b.content);
    }
}
