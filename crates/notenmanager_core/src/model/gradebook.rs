//! Subject and note records.
//!
//! # Responsibility
//! - Define the per-subject note list that conversion and statistics run on.
//! - Provide constructors that allocate stable IDs.
//!
//! # Invariants
//! - `Subject::id` and `Note::id` are stable and never reused.
//! - `Note::display_label` is skipped by serde; it is recomputed from
//!   `grade` whenever the active system is US letter.
//! - Note order inside a subject carries no meaning; charts sort by date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a subject.
pub type SubjectId = Uuid;

/// Stable identifier of a note (one graded assessment).
pub type NoteId = Uuid;

/// One graded assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Free-form assessment label ("Test", "Homework", ...). Serialized as
    /// `type`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Numeric grade on the currently active scale.
    pub grade: f64,
    pub date: NaiveDate,
    /// Letter rendering for US letter mode. Derived, never persisted.
    #[serde(skip)]
    pub display_label: Option<String>,
}

impl Note {
    /// Creates a note with a generated stable ID.
    pub fn new(kind: impl Into<String>, grade: f64, date: NaiveDate) -> Self {
        Self::with_id(Uuid::new_v4(), kind, grade, date)
    }

    /// Creates a note with a caller-provided ID (import paths).
    pub fn with_id(id: NoteId, kind: impl Into<String>, grade: f64, date: NaiveDate) -> Self {
        Self {
            id,
            kind: kind.into(),
            grade,
            date,
            display_label: None,
        }
    }
}

/// A school subject with its graded notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub lessons_per_week: u32,
    /// Opaque color key the UI maps to a palette entry.
    pub color_tag: String,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Subject {
    /// Creates an empty subject with a generated stable ID.
    pub fn new(name: impl Into<String>, lessons_per_week: u32, color_tag: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            lessons_per_week,
            color_tag: color_tag.into(),
            notes: Vec::new(),
        }
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn note_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.id == id)
    }

    /// Removes a note by ID and returns it.
    pub fn remove_note(&mut self, id: NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|note| note.id == id)?;
        Some(self.notes.remove(index))
    }
}

/// Total number of notes across subjects.
pub fn note_count(subjects: &[Subject]) -> usize {
    subjects.iter().map(|subject| subject.notes.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::{note_count, Note, Subject};
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).expect("valid test date")
    }

    #[test]
    fn remove_note_returns_removed_record() {
        let mut subject = Subject::new("Mathematik", 3, "math");
        let note = Note::new("Test", 4.5, date(15));
        let id = note.id;
        subject.notes.push(note);

        let removed = subject.remove_note(id).expect("note should be removed");
        assert_eq!(removed.id, id);
        assert!(subject.notes.is_empty());
        assert!(subject.remove_note(id).is_none());
    }

    #[test]
    fn note_count_sums_all_subjects() {
        let mut math = Subject::new("Mathematik", 3, "math");
        math.notes.push(Note::new("Test", 4.0, date(1)));
        math.notes.push(Note::new("Test", 5.0, date(2)));
        let mut bio = Subject::new("Biologie", 4, "bio");
        bio.notes.push(Note::new("Test", 3.5, date(3)));

        assert_eq!(note_count(&[math, bio]), 3);
    }
}
