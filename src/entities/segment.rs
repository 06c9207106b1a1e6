//! Segment and Note entities.
//!
//! # Coordinate system
//!
//! Both entities live in *grid minutes*: integer minute offsets from the top
//! of the window's start hour (column 0 of row 0). A segment covers the
//! half-open range `[start, end)`; a note is keyed by the dot index it sits
//! on (a multiple of the configured interval).
//!
//! # Layer is derived
//!
//! `Segment::layer` is assigned by `layout::layers::assign_layers` and is
//! recomputed from scratch on every layering run. A persisted value is
//! accepted on input but never trusted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-drawn colored range spanning one or more dots.
///
/// The same `[start, end)` range can exist multiple times; `id` identifies
/// one placement for selection and deletion (generated on creation, kept
/// across persistence round-trips).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Unique ID for this placement. Records coming from external storage
    /// may omit it; a fresh one is generated on deserialization.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Inclusive start, minutes from the window's start hour.
    pub start: i32,
    /// Exclusive end, minutes from the window's start hour. `start < end`.
    pub end: i32,
    /// Display color as RGB.
    pub color: [u8; 3],
    /// Visual stacking slot, derived by the layerer.
    #[serde(default)]
    pub layer: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Segment {
    pub fn new(start: i32, end: i32, color: [u8; 3]) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color,
            layer: 0,
            text: None,
        }
    }

    pub fn duration(&self) -> i32 {
        self.end - self.start
    }

    /// Half-open interval overlap check.
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A marker attached to a single dot. Does not affect layering or row
/// heights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub color: [u8; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
