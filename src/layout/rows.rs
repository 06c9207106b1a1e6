//! Per-row pixel heights derived from layer occupancy.

use super::{Grid, SEGMENT_LINE_ALLOWANCE};
use crate::config::Metrics;
use crate::entities::Segment;

/// Height of every row for the given layered segments.
///
/// A row with no intersecting segment is exactly one dot tall. Otherwise it
/// grows by the base offset, one layer step per stacked layer below the
/// first, the bottom margin, and the allowance for the lowest line's
/// thickness.
pub fn row_heights(grid: &Grid, segments: &[Segment], metrics: &Metrics) -> Vec<f32> {
    let dot_height = metrics.dot_radius * 2.0;
    (0..grid.rows)
        .map(|row| {
            let (row_start, row_end) = grid.row_span(row);
            let max_layer = segments
                .iter()
                .filter(|s| !(s.end <= row_start || s.start >= row_end))
                .map(|s| s.layer)
                .max();
            match max_layer {
                None => dot_height,
                Some(layer) => {
                    dot_height
                        + metrics.seg_base_offset
                        + layer as f32 * metrics.seg_layer_step
                        + metrics.seg_bottom_margin
                        + SEGMENT_LINE_ALLOWANCE
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::config::GridConfig;
    use crate::layout::layers::assign_layers;

    fn grid() -> Grid {
        Grid::from_config(&GridConfig::default())
    }

    fn seg(start: i32, end: i32) -> Segment {
        Segment::new(start, end, [255, 255, 255])
    }

    #[test]
    fn test_empty_rows_are_one_dot_tall() {
        let metrics = Metrics::default();
        let heights = row_heights(&grid(), &[], &metrics);
        assert_eq!(heights.len(), 10);
        assert!(heights.iter().all(|&h| h == metrics.dot_radius * 2.0));
    }

    #[test]
    fn test_height_is_monotonic_in_max_layer() {
        let metrics = Metrics::default();
        let g = grid();
        let mut previous = 0.0;
        for depth in 1..=4 {
            // `depth` mutually overlapping segments in row 0.
            let mut segs: Vec<Segment> = (0..depth).map(|i| seg(i, 60 - i)).collect();
            assign_layers(&mut segs);
            let h = row_heights(&g, &segs, &metrics)[0];
            assert!(h > previous, "depth {depth}: {h} must exceed {previous}");
            previous = h;
        }
    }

    #[test]
    fn test_multi_row_segment_raises_every_spanned_row() {
        let metrics = Metrics::default();
        let mut segs = vec![seg(30, 150)];
        assign_layers(&mut segs);
        let heights = row_heights(&grid(), &segs, &metrics);
        let expected = metrics.dot_radius * 2.0
            + metrics.seg_base_offset
            + metrics.seg_bottom_margin
            + SEGMENT_LINE_ALLOWANCE;
        assert_eq!(heights[0], expected);
        assert_eq!(heights[1], expected);
        assert_eq!(heights[2], expected, "row 2 touched by [120, 150)");
        assert_eq!(heights[3], metrics.dot_radius * 2.0);
    }

    #[test]
    fn test_segment_touching_row_boundary_does_not_leak() {
        let metrics = Metrics::default();
        let mut segs = vec![seg(0, 60)];
        assign_layers(&mut segs);
        let heights = row_heights(&grid(), &segs, &metrics);
        assert_eq!(heights[1], metrics.dot_radius * 2.0, "[0, 60) stays out of row 1");
    }

    #[test]
    fn test_create_then_delete_restores_heights() {
        let metrics = Metrics::default();
        let g = grid();

        let mut base = vec![seg(0, 30)];
        assign_layers(&mut base);
        let before = row_heights(&g, &base, &metrics);

        // Add a two-row segment, then remove it again.
        let mut with_span = base.clone();
        with_span.push(seg(90, 130));
        assign_layers(&mut with_span);
        let during = row_heights(&g, &with_span, &metrics);
        assert_ne!(before, during);

        with_span.pop();
        assign_layers(&mut with_span);
        let after = row_heights(&g, &with_span, &metrics);
        assert_eq!(before, after);
    }

    #[test]
    fn test_heights_follow_grid_not_clock_offset() {
        // A 09:15 start changes the valid range, not the row count.
        let config = GridConfig {
            start_time: NaiveTime::from_hms_opt(9, 15, 0).expect("valid time"),
            ..GridConfig::default()
        };
        let g = Grid::from_config(&config);
        let heights = row_heights(&g, &[], &Metrics::default());
        assert_eq!(heights.len(), 10);
    }
}
