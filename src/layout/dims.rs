//! Content dimensions as a continuous function of animation state.

use eframe::egui::Vec2;

use super::gaps::{cumulative_gap_offset, expansion_factor};
use super::{
    AnimScalars, BASE_MARGIN, CALENDAR_HEIGHT, FOOTER_GAP, Grid, HEADER_FULL_HEIGHT,
    MIN_HEADER_WIDTH, SIDEBAR_WIDTH,
};
use crate::config::Metrics;

/// Top and bottom margins for the current scalars. The header reveal grows
/// the top, the hover expansion reserves calendar space at the bottom.
pub fn vertical_margins(anim: AnimScalars) -> (f32, f32) {
    let top = BASE_MARGIN + HEADER_FULL_HEIGHT * anim.header;
    let bottom = BASE_MARGIN + (CALENDAR_HEIGHT + FOOTER_GAP) * anim.hover;
    (top, bottom)
}

/// Total content size for the current configuration, row heights and
/// animation scalars. Pure: recomputed whenever any input changes.
pub fn content_size(
    grid: &Grid,
    row_heights: &[f32],
    metrics: &Metrics,
    anim: AnimScalars,
) -> Vec2 {
    let expansion = expansion_factor(anim.hover, metrics.hover_expansion_ratio);
    let spacing = metrics.dot_spacing * expansion;
    let sidebar = SIDEBAR_WIDTH * anim.header;
    let (top, bottom) = vertical_margins(anim);

    let col_unit = metrics.dot_radius * 2.0 + spacing;
    let gaps = cumulative_gap_offset(grid.gap_count(), expansion);

    let mut width = BASE_MARGIN * 2.0 + sidebar + grid.cols as f32 * col_unit - spacing + gaps;
    if anim.header > 0.1 {
        width = width.max(MIN_HEADER_WIDTH);
    }

    let mut height = top + bottom;
    for (row, h) in row_heights.iter().enumerate() {
        height += h;
        if row + 1 < row_heights.len() {
            height += spacing;
        }
    }

    Vec2::new(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::entities::Segment;
    use crate::layout::{layers::assign_layers, rows::row_heights};

    fn fixture() -> (Grid, Vec<f32>, Metrics) {
        let grid = Grid::from_config(&GridConfig::default());
        let metrics = Metrics::default();
        let mut segs = vec![Segment::new(0, 90, [255, 255, 255])];
        assign_layers(&mut segs);
        let heights = row_heights(&grid, &segs, &metrics);
        (grid, heights, metrics)
    }

    #[test]
    fn test_size_strictly_grows_with_hover() {
        let (grid, heights, metrics) = fixture();
        let mut previous = content_size(&grid, &heights, &metrics, AnimScalars::default());
        for step in 1..=4 {
            let anim = AnimScalars { hover: step as f32 / 4.0, header: 0.0 };
            let size = content_size(&grid, &heights, &metrics, anim);
            assert!(size.x > previous.x, "width at hover {step}/4");
            assert!(size.y > previous.y, "height at hover {step}/4");
            previous = size;
        }
    }

    #[test]
    fn test_size_strictly_grows_with_header() {
        let (grid, heights, metrics) = fixture();
        let mut previous = content_size(&grid, &heights, &metrics, AnimScalars::default());
        for step in 1..=4 {
            let anim = AnimScalars { hover: 0.0, header: step as f32 / 4.0 };
            let size = content_size(&grid, &heights, &metrics, anim);
            assert!(size.x > previous.x, "width at header {step}/4");
            assert!(size.y > previous.y, "height at header {step}/4");
            previous = size;
        }
    }

    #[test]
    fn test_idle_width_matches_hand_computation() {
        let grid = Grid::from_config(&GridConfig::default());
        let metrics = Metrics::default();
        let heights = row_heights(&grid, &[], &metrics);
        let size = content_size(&grid, &heights, &metrics, AnimScalars::default());
        // 2*16 margins + 6 cols * (12 + 8) - 8 trailing spacing + 1 narrow gap.
        let expected_w = 32.0 + 6.0 * 20.0 - 8.0 + 14.0;
        assert!((size.x - expected_w).abs() < 1e-4, "{} vs {expected_w}", size.x);
        // 2*16 margins + 10 rows of 12px + 9 spacings of 8px.
        let expected_h = 32.0 + 10.0 * 12.0 + 9.0 * 8.0;
        assert!((size.y - expected_h).abs() < 1e-4, "{} vs {expected_h}", size.y);
    }

    #[test]
    fn test_header_floor_applies_to_tiny_grids() {
        // One column, 30-minute window: far narrower than the header floor.
        let config = GridConfig { interval: 30, row_duration: 30, ..GridConfig::default() };
        let grid = Grid::from_config(&config);
        let metrics = Metrics::default();
        let heights = row_heights(&grid, &[], &metrics);

        let idle = content_size(&grid, &heights, &metrics, AnimScalars::default());
        assert!(idle.x < MIN_HEADER_WIDTH);

        let revealed = content_size(
            &grid,
            &heights,
            &metrics,
            AnimScalars { hover: 0.0, header: 1.0 },
        );
        assert_eq!(revealed.x, MIN_HEADER_WIDTH);
    }

    #[test]
    fn test_empty_grid_does_not_panic() {
        let config = GridConfig { interval: 60, row_duration: 30, ..GridConfig::default() };
        let grid = Grid::from_config(&config);
        let metrics = Metrics::default();
        let heights = row_heights(&grid, &[], &metrics);
        let size = content_size(&grid, &heights, &metrics, AnimScalars::FULL);
        assert!(size.x.is_finite() && size.y.is_finite());
    }
}
