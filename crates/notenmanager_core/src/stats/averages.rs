//! Averages, running averages and target checks.
//!
//! # Invariants
//! - Subject and overall averages use one-decimal rounding.
//! - Running averages use two-decimal rounding.
//! - Running averages follow date order; equal dates keep input order.

use crate::model::gradebook::{Note, Subject};
use crate::model::scale::{round_hundredth, round_tenth, GradingScale};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One chart point of the running average series.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningAveragePoint {
    /// 0-based position in date order.
    pub index: usize,
    pub note: Note,
    pub running_average: f64,
}

/// Mean grade of one subject, `0` when there are no notes.
pub fn subject_average(notes: &[Note]) -> f64 {
    mean(notes.iter().map(|note| note.grade))
}

/// Mean over every note of every subject, `0` when there are no notes.
///
/// Subjects are not weighted; each note counts once.
pub fn overall_average(subjects: &[Subject]) -> f64 {
    mean(
        subjects
            .iter()
            .flat_map(|subject| subject.notes.iter())
            .map(|note| note.grade),
    )
}

fn mean(grades: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = grades.fold((0.0, 0_usize), |(sum, count), grade| {
        (sum + grade, count + 1)
    });
    if count == 0 {
        return 0.0;
    }
    round_tenth(sum / count as f64)
}

/// Cumulative average after each note, in date order.
pub fn running_average_series(notes: &[Note]) -> Vec<RunningAveragePoint> {
    let mut ordered: Vec<&Note> = notes.iter().collect();
    ordered.sort_by_key(|note| note.date);

    let mut sum = 0.0;
    ordered
        .into_iter()
        .enumerate()
        .map(|(index, note)| {
            sum += note.grade;
            RunningAveragePoint {
                index,
                note: note.clone(),
                running_average: round_hundredth(sum / (index + 1) as f64),
            }
        })
        .collect()
}

/// Direction in which an average must compare to the target to count as
/// reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetComparison {
    /// `average <= target`; for scales where smaller grades are better.
    AtMost,
    /// `average >= target`; for scales where larger grades are better.
    AtLeast,
}

impl TargetComparison {
    /// Direction implied by the scale orientation.
    pub fn for_scale(scale: &GradingScale) -> Self {
        if scale.is_ascending {
            Self::AtMost
        } else {
            Self::AtLeast
        }
    }

    pub fn is_met(self, average: f64, target: f64) -> bool {
        match self {
            Self::AtMost => average <= target,
            Self::AtLeast => average >= target,
        }
    }
}

/// Target average text is not a finite number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetParseError {
    pub input: String,
}

impl Display for TargetParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "target average `{}` is not a number", self.input)
    }
}

impl Error for TargetParseError {}

/// Parses free-form target text. Accepts `,` as decimal separator.
pub fn parse_target(text: &str) -> Result<f64, TargetParseError> {
    let normalized = text.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| TargetParseError {
            input: text.to_string(),
        })
}

/// Checks the overall average against a typed target on `scale`.
///
/// # Errors
/// - Returns `TargetParseError` for unparsable text. Callers keep their
///   previous flag in that case.
pub fn is_target_reached(
    overall_average: f64,
    target_text: &str,
    scale: &GradingScale,
) -> Result<bool, TargetParseError> {
    is_target_reached_with(
        overall_average,
        target_text,
        TargetComparison::for_scale(scale),
    )
}

/// Same as `is_target_reached`, with an explicit comparison direction.
pub fn is_target_reached_with(
    overall_average: f64,
    target_text: &str,
    comparison: TargetComparison,
) -> Result<bool, TargetParseError> {
    let target = parse_target(target_text)?;
    Ok(comparison.is_met(overall_average, target))
}

/// Returns the new flag value, or `previous` when the text is unparsable.
pub fn refresh_target_flag(
    previous: bool,
    overall_average: f64,
    target_text: &str,
    comparison: TargetComparison,
) -> bool {
    is_target_reached_with(overall_average, target_text, comparison).unwrap_or(previous)
}
