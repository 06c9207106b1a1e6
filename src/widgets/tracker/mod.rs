//! Tracker widget: renders the dot grid and routes pointer interaction.
//!
//! The widget never computes geometry itself; it consumes a prebuilt
//! `Layout` for all positions and hit answers and reports user intent back
//! as `TrackerAction` values. All data mutation happens in the app layer.

mod tracker_ui;

pub use tracker_ui::show;

use chrono::NaiveDate;
use eframe::egui::Rect;
use uuid::Uuid;

use crate::entities::Segment;
use crate::layout::ArrowSide;

/// Color a preview segment is born with.
pub const DEFAULT_SEGMENT_COLOR: [u8; 3] = [255, 255, 255];
/// Color a freshly toggled note gets.
pub const DEFAULT_NOTE_COLOR: [u8; 3] = [255, 80, 80];

/// Transient widget state carried across frames.
#[derive(Clone, Debug)]
pub struct TrackerState {
    pub hovered_dot: Option<i32>,
    pub hovered_segment: Option<Uuid>,
    pub hovered_date: Option<NaiveDate>,
    pub hovered_arrow: Option<ArrowSide>,
    /// Anchor dot index of an in-progress creation drag.
    pub drag_anchor: Option<i32>,
    /// Ephemeral segment shown during the drag; discarded unless committed.
    pub preview: Option<Segment>,
    /// Content rect of the previous frame, used to derive the next frame's
    /// animation targets before the new layout exists.
    pub last_content: Rect,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            hovered_dot: None,
            hovered_segment: None,
            hovered_date: None,
            hovered_arrow: None,
            drag_anchor: None,
            preview: None,
            last_content: Rect::NOTHING,
        }
    }
}

impl TrackerState {
    /// Forget the in-progress drag without committing it.
    pub fn cancel_drag(&mut self) {
        self.drag_anchor = None;
        self.preview = None;
    }
}

/// User intent reported by the widget, applied by the app layer.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackerAction {
    None,
    /// Confirmed creation drag.
    CommitSegment(Segment),
    DeleteSegment(Uuid),
    /// Add a note on a bare dot, remove the existing one otherwise.
    ToggleNote(i32),
    SelectDate(NaiveDate),
    /// Step the viewed date by whole days (mouse wheel).
    ScrollDays(i64),
    JumpToToday,
}
