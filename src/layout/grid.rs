//! Grid model: time window -> row/column counts and index bounds.

use chrono::Timelike;

use crate::config::GridConfig;

/// Derived grid shape for one configuration.
///
/// The grid is anchored to the top of the start hour: column 0 of row 0 is
/// minute 0 of that hour even when the window starts at, say, 09:15. Indices
/// below `start_offset` exist on the grid for alignment but are absent for
/// rendering and hit-testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    /// First valid index: minutes from the start hour to the start time.
    pub start_offset: i32,
    /// One past the last valid index: minutes from the start hour to the
    /// end time.
    pub total_minutes: i32,
    /// Minutes per row, defaulted if the config carried a zero.
    pub row_duration: i32,
    /// Minutes per dot, defaulted if the config carried a zero.
    pub interval: i32,
    /// Wall-clock hour the grid is anchored to (for time labels).
    pub start_hour: i32,
}

impl Grid {
    pub fn from_config(config: &GridConfig) -> Self {
        // Degenerate values fall back rather than fail; the engine is total.
        let row_duration = if config.row_duration == 0 { 60 } else { config.row_duration };
        let interval = if config.interval == 0 { 10 } else { config.interval };

        let base = config.start_time.hour() as i32 * 60;
        let mut end = config.end_time.hour() as i32 * 60 + config.end_time.minute() as i32;
        if end < base {
            // Window wraps past midnight.
            end += 24 * 60;
        }
        let total_minutes = end - base;

        Self {
            rows: (total_minutes + row_duration - 1) / row_duration,
            cols: row_duration / interval,
            start_offset: config.start_time.minute() as i32,
            total_minutes,
            row_duration,
            interval,
            start_hour: config.start_time.hour() as i32,
        }
    }

    /// Wall-clock minute (from midnight) a grid index maps to.
    pub fn clock_minute(&self, index: i32) -> i32 {
        (self.start_hour * 60 + index) % (24 * 60)
    }

    /// Whether a dot index is inside the active window.
    pub fn index_valid(&self, index: i32) -> bool {
        index >= self.start_offset && index < self.total_minutes
    }

    /// Minute offset of a grid cell.
    pub fn index_of(&self, row: i32, col: i32) -> i32 {
        row * self.row_duration + col * self.interval
    }

    /// Minute range `[start, end)` covered by a row.
    pub fn row_span(&self, row: i32) -> (i32, i32) {
        (row * self.row_duration, (row + 1) * self.row_duration)
    }

    /// Columns between consecutive half-hour boundaries.
    pub fn cols_per_half_hour(&self) -> i32 {
        (30 / self.interval).max(1)
    }

    /// Number of half-hour gaps to the left of a column.
    pub fn gaps_before(&self, col: i32) -> i32 {
        col / self.cols_per_half_hour()
    }

    /// Total gap count inside one row.
    pub fn gap_count(&self) -> i32 {
        if self.cols == 0 {
            0
        } else {
            (self.cols - 1) / self.cols_per_half_hour()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn config(start: (u32, u32), end: (u32, u32), interval: i32, row_duration: i32) -> GridConfig {
        GridConfig {
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).expect("valid time"),
            interval,
            row_duration,
        }
    }

    #[test]
    fn test_nine_to_seven_reference_shape() {
        let grid = Grid::from_config(&config((9, 0), (19, 0), 10, 60));
        assert_eq!(grid.rows, 10);
        assert_eq!(grid.cols, 6);
        assert_eq!(grid.total_minutes, 600);
        assert!(grid.index_valid(0), "index 0 is 09:00");
        assert!(grid.index_valid(590), "index 590 is 18:50");
        assert!(!grid.index_valid(600));
        assert!(!grid.index_valid(-1));
    }

    #[test]
    fn test_window_is_anchored_to_start_hour() {
        // 09:15 start: column 0 still means 09:00, indices before :15 are absent.
        let grid = Grid::from_config(&config((9, 15), (19, 0), 10, 60));
        assert_eq!(grid.start_offset, 15);
        assert_eq!(grid.total_minutes, 600);
        assert!(!grid.index_valid(0));
        assert!(!grid.index_valid(10));
        assert!(grid.index_valid(20));
    }

    #[test]
    fn test_partial_last_row_rounds_up() {
        let grid = Grid::from_config(&config((9, 0), (18, 30), 10, 60));
        assert_eq!(grid.total_minutes, 570);
        assert_eq!(grid.rows, 10);
    }

    #[test]
    fn test_overnight_window_wraps() {
        let grid = Grid::from_config(&config((22, 0), (6, 0), 30, 120));
        assert_eq!(grid.total_minutes, 8 * 60);
        assert_eq!(grid.rows, 4);
        assert_eq!(grid.cols, 4);
    }

    #[test]
    fn test_zero_config_falls_back_to_defaults() {
        let grid = Grid::from_config(&config((9, 0), (19, 0), 0, 0));
        assert_eq!(grid.interval, 10);
        assert_eq!(grid.row_duration, 60);
        assert_eq!(grid.rows, 10);
        assert_eq!(grid.cols, 6);
    }

    #[test]
    fn test_clock_minute_wraps_at_midnight() {
        let grid = Grid::from_config(&config((22, 0), (6, 0), 30, 120));
        assert_eq!(grid.start_hour, 22);
        assert_eq!(grid.clock_minute(0), 22 * 60);
        assert_eq!(grid.clock_minute(120), 0);
        assert_eq!(grid.clock_minute(150), 30);
    }

    #[test]
    fn test_gap_positions_are_hour_anchored() {
        let grid = Grid::from_config(&config((9, 0), (19, 0), 10, 60));
        assert_eq!(grid.cols_per_half_hour(), 3);
        assert_eq!(grid.gaps_before(0), 0);
        assert_eq!(grid.gaps_before(2), 0);
        assert_eq!(grid.gaps_before(3), 1);
        assert_eq!(grid.gaps_before(5), 1);
        assert_eq!(grid.gap_count(), 1);

        let wide = Grid::from_config(&config((9, 0), (19, 0), 30, 180));
        assert_eq!(wide.cols_per_half_hour(), 1);
        assert_eq!(wide.gap_count(), 5);
    }
}
