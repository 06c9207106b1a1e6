//! Calendar strip layout: day slots and jump-to-today arrows.

use chrono::{Duration, NaiveDate};
use eframe::egui::{Pos2, Rect, Vec2};

use super::hittest::ArrowSide;
use super::{
    BASE_MARGIN, CAL_ARROW_AREA, CAL_ARROW_HIT, CAL_ARROW_INSET, CALENDAR_HEIGHT, Layout,
    MIN_CAL_STEP,
};

/// Geometry of the date strip at the bottom of the content box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalendarStrip {
    /// Number of day slots. Odd, between 3 and 15, and derived from the
    /// maximum content width so it never jumps mid-animation.
    pub visible_count: i32,
    /// Horizontal step between slot centers at the current width.
    pub step_x: f32,
    /// Center x of slot 0.
    pub first_center_x: f32,
    /// Center y of the strip.
    pub center_y: f32,
}

impl CalendarStrip {
    /// Slots to the left of the middle (viewed-date) slot.
    pub fn center_offset(&self) -> i32 {
        (self.visible_count - 1) / 2
    }

    /// Date shown in a slot, given the viewed date in the middle.
    pub fn slot_date(&self, view_date: NaiveDate, slot: i32) -> NaiveDate {
        view_date + Duration::days((slot - self.center_offset()) as i64)
    }

    /// Center of a slot.
    pub fn slot_center(&self, slot: i32) -> Pos2 {
        Pos2::new(self.first_center_x + slot as f32 * self.step_x, self.center_y)
    }

    /// First and last visible dates.
    pub fn visible_range(&self, view_date: NaiveDate) -> (NaiveDate, NaiveDate) {
        (
            self.slot_date(view_date, 0),
            self.slot_date(view_date, self.visible_count - 1),
        )
    }
}

impl Layout {
    /// Strip geometry for the current tick.
    ///
    /// The slot count comes from the fully-expanded width while the step
    /// derives from the current width, so the strip stretches during the
    /// hover animation without the day count flickering.
    pub fn calendar_strip(&self) -> CalendarStrip {
        let max_available = (self.max_size.x - CAL_ARROW_AREA * 2.0).max(50.0);
        let safe_step = (max_available / 15.0).max(MIN_CAL_STEP);
        let mut visible_count = (max_available / safe_step) as i32;
        if visible_count > 15 {
            visible_count = 15;
        }
        if visible_count % 2 == 0 {
            visible_count -= 1;
        }
        if visible_count < 3 {
            visible_count = 3;
        }

        let width = self.content.width();
        let available = (width - CAL_ARROW_AREA * 2.0).max(50.0);
        let step_x = available / visible_count as f32;
        let strip_width = visible_count as f32 * step_x;
        let first_center_x = self.content.left() + (width - strip_width) / 2.0 + step_x / 2.0;

        CalendarStrip {
            visible_count,
            step_x,
            first_center_x,
            center_y: self.content.bottom() - BASE_MARGIN - CALENDAR_HEIGHT / 2.0,
        }
    }

    /// Arrow affordances pointing back to today, shown only when today is
    /// outside the visible strip.
    pub fn arrow_rects(
        &self,
        view_date: NaiveDate,
        today: NaiveDate,
    ) -> Vec<(ArrowSide, Rect)> {
        let strip = self.calendar_strip();
        let (first, last) = strip.visible_range(view_date);
        let mut rects = Vec::new();
        if today < first {
            let center = Pos2::new(self.content.left() + CAL_ARROW_INSET, strip.center_y);
            rects.push((ArrowSide::Left, Rect::from_center_size(center, Vec2::splat(CAL_ARROW_HIT))));
        }
        if today > last {
            let center = Pos2::new(self.content.right() - CAL_ARROW_INSET, strip.center_y);
            rects.push((ArrowSide::Right, Rect::from_center_size(center, Vec2::splat(CAL_ARROW_HIT))));
        }
        rects
    }
}
