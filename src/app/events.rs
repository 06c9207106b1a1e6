//! Action dispatch: tracker intent to data-store edits.

use chrono::{Duration, NaiveDate};
use log::{debug, info};

use super::TimedotApp;
use crate::entities::Note;
use crate::widgets::tracker::{DEFAULT_NOTE_COLOR, TrackerAction};

impl TimedotApp {
    /// Apply one widget action to the store and view state.
    pub fn apply_action(&mut self, action: TrackerAction, today: NaiveDate) {
        match action {
            TrackerAction::None => {}
            TrackerAction::CommitSegment(segment) => {
                if segment.start < segment.end {
                    info!(
                        "Segment created: [{}, {}) on {}",
                        segment.start, segment.end, self.view_date
                    );
                    self.store.day_mut(self.view_date).add_segment(segment);
                }
            }
            TrackerAction::DeleteSegment(id) => {
                if let Some(seg) = self.store.day_mut(self.view_date).remove_segment(id) {
                    info!("Segment deleted: [{}, {})", seg.start, seg.end);
                }
            }
            TrackerAction::ToggleNote(index) => {
                let day = self.store.day_mut(self.view_date);
                if day.remove_note(index).is_some() {
                    info!("Note removed at index {index}");
                } else {
                    day.set_note(index, Note { color: DEFAULT_NOTE_COLOR, text: None });
                    info!("Note added at index {index}");
                }
            }
            TrackerAction::SelectDate(date) => {
                debug!("View date {} -> {date}", self.view_date);
                self.view_date = date;
            }
            TrackerAction::ScrollDays(days) => {
                self.view_date += Duration::days(days);
            }
            TrackerAction::JumpToToday => {
                self.view_date = today;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Segment;

    fn app() -> TimedotApp {
        let mut app = TimedotApp::default();
        app.view_date = NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date");
        app
    }

    #[test]
    fn test_commit_and_delete_round_trip() {
        let mut app = app();
        let seg = Segment::new(60, 120, [255, 255, 255]);
        let id = seg.id;
        let today = app.view_date;

        app.apply_action(TrackerAction::CommitSegment(seg), today);
        assert_eq!(app.store.day_mut(app.view_date).segments.len(), 1);

        app.apply_action(TrackerAction::DeleteSegment(id), today);
        assert!(app.store.day_mut(app.view_date).segments.is_empty());
    }

    #[test]
    fn test_degenerate_commit_is_ignored() {
        let mut app = app();
        let today = app.view_date;
        let seg = Segment { end: 60, ..Segment::new(60, 120, [255, 255, 255]) };
        app.apply_action(TrackerAction::CommitSegment(seg), today);
        assert!(app.store.day_mut(app.view_date).segments.is_empty());
    }

    #[test]
    fn test_note_toggles_on_and_off() {
        let mut app = app();
        let today = app.view_date;
        app.apply_action(TrackerAction::ToggleNote(30), today);
        assert!(app.store.day_mut(app.view_date).notes.contains_key(&30));
        app.apply_action(TrackerAction::ToggleNote(30), today);
        assert!(!app.store.day_mut(app.view_date).notes.contains_key(&30));
    }

    #[test]
    fn test_date_navigation() {
        let mut app = app();
        let start = app.view_date;
        let today = NaiveDate::from_ymd_opt(2024, 6, 20).expect("valid date");

        app.apply_action(TrackerAction::ScrollDays(-2), today);
        assert_eq!(app.view_date, start - Duration::days(2));

        app.apply_action(TrackerAction::JumpToToday, today);
        assert_eq!(app.view_date, today);

        app.apply_action(TrackerAction::SelectDate(start), today);
        assert_eq!(app.view_date, start);
    }
}
