//! Per-day records and the date-keyed store.
//!
//! All mutation goes through the named edit operations below; nothing else
//! writes segments or notes. The layout engine reads exactly one `DayRecord`
//! at a time and days are fully independent of each other.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Note, Segment};

/// Segments and notes for a single calendar date.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Notes keyed by dot index (serialized with stringified keys).
    #[serde(default)]
    pub notes: BTreeMap<i32, Note>,
}

impl DayRecord {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.notes.is_empty()
    }

    /// Append a confirmed segment. Insertion order is preserved; it is the
    /// tie-break for layer assignment.
    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn remove_segment(&mut self, id: Uuid) -> Option<Segment> {
        let pos = self.segments.iter().position(|s| s.id == id)?;
        Some(self.segments.remove(pos))
    }

    pub fn segment(&self, id: Uuid) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn segment_mut(&mut self, id: Uuid) -> Option<&mut Segment> {
        self.segments.iter_mut().find(|s| s.id == id)
    }

    pub fn set_note(&mut self, index: i32, note: Note) {
        self.notes.insert(index, note);
    }

    pub fn remove_note(&mut self, index: i32) -> Option<Note> {
        self.notes.remove(&index)
    }
}

/// All recorded days, keyed by date.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DataStore {
    days: BTreeMap<NaiveDate, DayRecord>,
}

impl DataStore {
    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&date)
    }

    /// Record for `date`, created empty on first access.
    pub fn day_mut(&mut self, date: NaiveDate) -> &mut DayRecord {
        self.days.entry(date).or_default()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).expect("valid date")
    }

    #[test]
    fn test_segment_add_remove_round_trip() {
        let mut day = DayRecord::default();
        let seg = Segment::new(60, 120, [255, 80, 80]);
        let id = seg.id;
        day.add_segment(seg);
        assert_eq!(day.segments.len(), 1);

        let removed = day.remove_segment(id).expect("segment exists");
        assert_eq!(removed.id, id);
        assert!(day.is_empty());
        assert!(day.remove_segment(id).is_none());
    }

    #[test]
    fn test_note_edit_operations() {
        let mut day = DayRecord::default();
        day.set_note(30, Note { color: [0, 255, 0], text: Some("standup".into()) });
        assert!(day.notes.contains_key(&30));

        day.set_note(30, Note { color: [255, 0, 0], text: None });
        assert_eq!(day.notes[&30].color, [255, 0, 0]);

        assert!(day.remove_note(30).is_some());
        assert!(day.remove_note(30).is_none());
    }

    #[test]
    fn test_days_are_independent() {
        let mut store = DataStore::default();
        store.day_mut(date(1)).add_segment(Segment::new(0, 30, [1, 2, 3]));
        assert_eq!(store.day_mut(date(2)).segments.len(), 0);
        assert_eq!(store.day(date(1)).expect("day exists").segments.len(), 1);
    }

    #[test]
    fn test_notes_serialize_with_string_keys() {
        let mut day = DayRecord::default();
        day.set_note(90, Note { color: [1, 2, 3], text: None });
        let json = serde_json::to_string(&day).expect("serialize");
        assert!(json.contains("\"90\""), "map keys must be strings in JSON: {json}");
        let back: DayRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(day, back);
    }
}
