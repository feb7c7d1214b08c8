//! Derived view and secondary summaries.
//!
//! # Responsibility
//! - Assemble everything the host renders after a mutation into one
//!   `DerivedView` value.
//! - Provide the recent-notes feed and the grade distribution.

use crate::model::gradebook::{Note, Subject, SubjectId};
use crate::model::scale::GradingScale;
use crate::model::settings::AppSettings;
use crate::stats::averages::{
    overall_average, refresh_target_flag, running_average_series, subject_average,
    RunningAveragePoint,
};

/// Default length of the recent-notes feed.
pub const DEFAULT_RECENT_NOTES: usize = 5;

/// Default number of bands in the grade distribution.
pub const DEFAULT_DISTRIBUTION_BANDS: usize = 5;

/// Average of one subject as shown in lists.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectAverage {
    pub subject_id: SubjectId,
    pub average: f64,
    pub note_count: usize,
}

/// Every derived figure for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    pub overall_average: f64,
    /// Same order as the input subjects.
    pub subject_averages: Vec<SubjectAverage>,
    /// Running average of the selected subject; empty without selection.
    pub running_average: Vec<RunningAveragePoint>,
    pub target_reached: bool,
}

/// Recomputes the derived view from stored grades and settings.
///
/// `previous_target_reached` is kept when the target text is unparsable.
pub fn derive_view(
    subjects: &[Subject],
    settings: &AppSettings,
    selected_subject: Option<SubjectId>,
    previous_target_reached: bool,
) -> DerivedView {
    let overall = overall_average(subjects);
    let subject_averages = subjects
        .iter()
        .map(|subject| SubjectAverage {
            subject_id: subject.id,
            average: subject_average(&subject.notes),
            note_count: subject.notes.len(),
        })
        .collect();
    let running_average = selected_subject
        .and_then(|id| subjects.iter().find(|subject| subject.id == id))
        .map(|subject| running_average_series(&subject.notes))
        .unwrap_or_default();
    let target_reached = refresh_target_flag(
        previous_target_reached,
        overall,
        settings.target_average.as_str(),
        settings.effective_target_comparison(),
    );

    DerivedView {
        overall_average: overall,
        subject_averages,
        running_average,
        target_reached,
    }
}

/// Note plus the subject it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentNote {
    pub subject_id: SubjectId,
    pub note: Note,
}

/// Newest `count` notes across all subjects, newest first.
pub fn recent_notes(subjects: &[Subject], count: usize) -> Vec<RecentNote> {
    let mut all: Vec<RecentNote> = subjects
        .iter()
        .flat_map(|subject| {
            subject.notes.iter().map(move |note| RecentNote {
                subject_id: subject.id,
                note: note.clone(),
            })
        })
        .collect();
    all.sort_by(|a, b| b.note.date.cmp(&a.note.date));
    all.truncate(count);
    all
}

/// Count of grades inside one band of the active scale.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeBand {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Splits the scale into `bands` equal-width bands and counts grades.
///
/// Bands are half-open `[lower, upper)` except the last, which includes
/// the upper bound. Grades outside the scale are not counted.
pub fn grade_distribution(subjects: &[Subject], scale: &GradingScale, bands: usize) -> Vec<GradeBand> {
    if bands == 0 || scale.is_degenerate() {
        return Vec::new();
    }

    let (low, high) = scale.bounds();
    let mut distribution: Vec<GradeBand> = (0..bands)
        .map(|index| GradeBand {
            lower: band_edge(low, high, index, bands),
            upper: band_edge(low, high, index + 1, bands),
            count: 0,
        })
        .collect();

    for note in subjects.iter().flat_map(|subject| subject.notes.iter()) {
        if !scale.contains(note.grade) {
            continue;
        }
        let index = distribution
            .iter()
            .position(|band| note.grade < band.upper)
            .unwrap_or(bands - 1);
        distribution[index].count += 1;
    }

    distribution
}

// Edges equal the grades users type: 2.4 on a 0..4 scale, not 2.4000000000000004.
fn band_edge(low: f64, high: f64, index: usize, bands: usize) -> f64 {
    if index == bands {
        return high;
    }
    low + (high - low) * index as f64 / bands as f64
}

#[cfg(test)]
mod tests {
    use super::{derive_view, grade_distribution, recent_notes};
    use crate::model::gradebook::{Note, Subject};
    use crate::model::scale::GradingScale;
    use crate::model::settings::AppSettings;
    use chrono::NaiveDate;

    fn note(grade: f64, month: u32, day: u32) -> Note {
        Note::new(
            "Test",
            grade,
            NaiveDate::from_ymd_opt(2024, month, day).expect("valid test date"),
        )
    }

    fn sample() -> Vec<Subject> {
        let mut math = Subject::new("Mathematik", 3, "math");
        math.notes = vec![note(2.3, 1, 15), note(2.8, 1, 22), note(3.5, 2, 5)];
        let mut bio = Subject::new("Biologie", 4, "bio");
        bio.notes = vec![note(3.1, 1, 20)];
        let mut info = Subject::new("Informatik", 2, "info");
        info.notes = vec![note(6.0, 1, 25)];
        vec![math, bio, info]
    }

    #[test]
    fn distribution_uses_equal_bands_with_closed_last_band() {
        let bands = grade_distribution(&sample(), &GradingScale::swiss(), 5);
        let counts: Vec<usize> = bands.iter().map(|band| band.count).collect();
        assert_eq!(counts, vec![0, 2, 2, 0, 1]);
        assert_eq!(bands[0].lower, 1.0);
        assert_eq!(bands[4].upper, 6.0);
    }

    #[test]
    fn distribution_edges_match_displayed_grades() {
        let mut subject = Subject::new("Englisch", 3, "eng");
        subject.notes = vec![note(2.4, 1, 1), note(0.8, 1, 2), note(3.2, 1, 3)];

        let bands = grade_distribution(&[subject], &GradingScale::us_letter(), 5);
        let lowers: Vec<f64> = bands.iter().map(|band| band.lower).collect();
        assert_eq!(lowers, vec![0.0, 0.8, 1.6, 2.4, 3.2]);
        let counts: Vec<usize> = bands.iter().map(|band| band.count).collect();
        assert_eq!(counts, vec![0, 1, 0, 1, 1]);
    }

    #[test]
    fn distribution_with_zero_bands_is_empty() {
        assert!(grade_distribution(&sample(), &GradingScale::swiss(), 0).is_empty());
    }

    #[test]
    fn recent_notes_are_newest_first_and_truncated() {
        let recent = recent_notes(&sample(), 3);
        let grades: Vec<f64> = recent.iter().map(|item| item.note.grade).collect();
        assert_eq!(grades, vec![3.5, 6.0, 2.8]);
    }

    #[test]
    fn derive_view_includes_running_average_only_for_selection() {
        let subjects = sample();
        let settings = AppSettings::default();

        let unselected = derive_view(&subjects, &settings, None, false);
        assert!(unselected.running_average.is_empty());
        assert_eq!(unselected.subject_averages.len(), 3);
        assert_eq!(unselected.overall_average, 3.5);
        assert!(unselected.target_reached);

        let selected = derive_view(&subjects, &settings, Some(subjects[0].id), false);
        assert_eq!(selected.running_average.len(), 3);
        assert_eq!(selected.running_average[2].running_average, 2.87);
    }

    #[test]
    fn derive_view_keeps_previous_flag_for_partial_target_text() {
        let subjects = sample();
        let settings = AppSettings {
            target_average: "-".to_string(),
            ..AppSettings::default()
        };
        assert!(derive_view(&subjects, &settings, None, true).target_reached);
        assert!(!derive_view(&subjects, &settings, None, false).target_reached);
    }
}
