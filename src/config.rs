//! Grid and appearance configuration.
//!
//! Two halves:
//! - `GridConfig` - the time window (start/end, minutes per dot, minutes per
//!   row). Everything the grid geometry derives from.
//! - `Metrics` - pixel-level appearance knobs (dot radius, spacing, segment
//!   stacking offsets) plus the named hit-test tolerances.
//!
//! `ConfigRecord` is the persisted shape exchanged with external storage.
//! Values coming from disk are clamped on ingest (`interval >= 1`,
//! `row_duration >= 10`); the layout engine additionally applies its own
//! defaults if a zero slips through (see `layout::grid`).

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Row duration presets offered by the UI, in minutes.
pub const ROW_DURATIONS: &[i32] = &[30, 60, 120, 180];

/// Dot interval presets offered by the UI, in minutes.
pub const INTERVALS: &[i32] = &[5, 10, 15, 30];

/// Time window configuration: which hours are shown and at what resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Start of the tracked window. The grid itself is anchored to the top
    /// of this hour, so 09:15 still puts column 0 at 09:00.
    pub start_time: NaiveTime,
    /// End of the tracked window. An end at or before the start hour wraps
    /// past midnight.
    pub end_time: NaiveTime,
    /// Minutes per dot.
    pub interval: i32,
    /// Minutes per row.
    pub row_duration: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or_default(),
            interval: 10,
            row_duration: 60,
        }
    }
}

impl GridConfig {
    /// Intervals valid for the given row duration (must divide it).
    pub fn interval_options(row_duration: i32) -> Vec<i32> {
        let opts: Vec<i32> = INTERVALS
            .iter()
            .copied()
            .filter(|&x| x <= row_duration && row_duration % x == 0)
            .collect();
        if opts.is_empty() { vec![10] } else { opts }
    }

    pub fn start_hour(&self) -> i32 {
        self.start_time.hour() as i32
    }
}

/// Appearance and layout metrics, all independently adjustable.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub dot_radius: f32,
    pub dot_spacing: f32,
    /// Distance from the dot row to the first segment layer.
    pub seg_base_offset: f32,
    /// Vertical distance between stacked segment layers.
    pub seg_layer_step: f32,
    /// Extra space below the deepest layer before the next row.
    pub seg_bottom_margin: f32,
    /// Spacing multiplier reached at full hover expansion.
    pub hover_expansion_ratio: f32,
    /// Note dot size as a fraction of the dot radius (renderer only).
    pub note_dot_scale: f32,
    /// Dot hit acceptance radius, as a multiple of `dot_radius`.
    /// Deliberate UX slack, independent of the spacing metrics.
    pub dot_hit_factor: f32,
    /// Half-height of the segment hit band in pixels. Fixed on purpose:
    /// it does not grow with `seg_layer_step`.
    pub segment_hit_band: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            dot_radius: 6.0,
            dot_spacing: 8.0,
            seg_base_offset: 6.0,
            seg_layer_step: 12.0,
            seg_bottom_margin: 8.0,
            hover_expansion_ratio: 1.3,
            note_dot_scale: 0.4,
            dot_hit_factor: 2.5,
            segment_hit_band: 4.0,
        }
    }
}

/// Persisted configuration record, as exchanged with external storage.
///
/// Times are "HH:MM" strings, sizes are integer pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub start_time: String,
    pub end_time: String,
    pub interval: i32,
    pub row_duration: i32,
    pub dot_radius: i32,
    pub dot_spacing: i32,
    pub seg_base_offset: i32,
    pub seg_layer_step: i32,
    pub seg_bottom_margin: i32,
}

impl ConfigRecord {
    /// Convert a persisted record into engine configuration, clamping
    /// out-of-range values. Unparseable times fall back to the defaults.
    pub fn into_parts(self) -> (GridConfig, Metrics) {
        let defaults = GridConfig::default();
        let grid = GridConfig {
            start_time: parse_hhmm(&self.start_time).unwrap_or(defaults.start_time),
            end_time: parse_hhmm(&self.end_time).unwrap_or(defaults.end_time),
            interval: self.interval.max(1),
            row_duration: self.row_duration.max(10),
        };
        let metrics = Metrics {
            dot_radius: self.dot_radius.max(1) as f32,
            dot_spacing: self.dot_spacing.max(0) as f32,
            seg_base_offset: self.seg_base_offset as f32,
            seg_layer_step: self.seg_layer_step.max(0) as f32,
            seg_bottom_margin: self.seg_bottom_margin as f32,
            ..Metrics::default()
        };
        (grid, metrics)
    }

    pub fn from_parts(grid: &GridConfig, metrics: &Metrics) -> Self {
        Self {
            start_time: grid.start_time.format("%H:%M").to_string(),
            end_time: grid.end_time.format("%H:%M").to_string(),
            interval: grid.interval,
            row_duration: grid.row_duration,
            dot_radius: metrics.dot_radius as i32,
            dot_spacing: metrics.dot_spacing as i32,
            seg_base_offset: metrics.seg_base_offset as i32,
            seg_layer_step: metrics.seg_layer_step as i32,
            seg_bottom_margin: metrics.seg_bottom_margin as i32,
        }
    }
}

fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}
