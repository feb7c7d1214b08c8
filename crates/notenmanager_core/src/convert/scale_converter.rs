//! Standing-preserving grade conversion.
//!
//! # Responsibility
//! - Map one grade from a source scale to a target scale through a
//!   dimensionless standing in `[0, 1]` (1 = best, 0 = worst).
//! - Apply the mapping to whole note lists and subject collections.
//!
//! # Invariants
//! - Zero-range scales are rejected with `ConversionError::DegenerateScale`.
//! - Results are rounded to one decimal, then clamped into the target
//!   bounds.
//! - Converting between equal scales returns grades unchanged.
//! - Batch paths validate both scales before mutating any grade.

use crate::convert::letter::refresh_display_labels;
use crate::model::gradebook::{Note, Subject};
use crate::model::scale::{round_tenth, GradingScale};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which side of a conversion failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleSide {
    Source,
    Target,
}

impl ScaleSide {
    fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

/// Conversion failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Scale has `min_grade == max_grade`; standing is undefined.
    DegenerateScale { side: ScaleSide, bound: f64 },
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateScale { side, bound } => write!(
                f,
                "{} scale has zero range (min = max = {bound}); conversion is undefined",
                side.as_str()
            ),
        }
    }
}

impl Error for ConversionError {}

/// Counts of records touched by a committed batch conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub subjects: usize,
    pub notes: usize,
}

fn ensure_convertible(from: &GradingScale, to: &GradingScale) -> Result<(), ConversionError> {
    if from.is_degenerate() {
        return Err(ConversionError::DegenerateScale {
            side: ScaleSide::Source,
            bound: from.min_grade,
        });
    }
    if to.is_degenerate() {
        return Err(ConversionError::DegenerateScale {
            side: ScaleSide::Target,
            bound: to.min_grade,
        });
    }
    Ok(())
}

/// Normalizes `value` to its standing on `scale`: 1.0 best, 0.0 worst.
///
/// Out-of-range input is clamped into `[0, 1]`. NaN maps to the worst
/// standing.
///
/// # Errors
/// - Returns `DegenerateScale` for zero-range scales.
pub fn standing(value: f64, scale: &GradingScale) -> Result<f64, ConversionError> {
    if scale.is_degenerate() {
        return Err(ConversionError::DegenerateScale {
            side: ScaleSide::Source,
            bound: scale.min_grade,
        });
    }
    Ok(normalize(value, scale))
}

fn normalize(value: f64, scale: &GradingScale) -> f64 {
    let width = scale.max_grade - scale.min_grade;
    let raw = if scale.is_ascending {
        (scale.max_grade - value) / width
    } else {
        (value - scale.min_grade) / width
    };
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}

fn denormalize(standing: f64, scale: &GradingScale) -> f64 {
    let width = scale.max_grade - scale.min_grade;
    let raw = if scale.is_ascending {
        scale.min_grade + (1.0 - standing) * width
    } else {
        scale.min_grade + standing * width
    };
    scale.clamp(round_tenth(raw))
}

/// Converts one grade from `from` to `to`, preserving its standing.
///
/// # Errors
/// - Returns `DegenerateScale` when either scale has zero range.
pub fn convert(value: f64, from: &GradingScale, to: &GradingScale) -> Result<f64, ConversionError> {
    ensure_convertible(from, to)?;
    if from.same_scale(to) {
        return Ok(value);
    }
    Ok(denormalize(normalize(value, from), to))
}

/// Converts every note grade in place.
///
/// Returns the number of converted notes; `0` when the scales are equal.
/// No grade is touched when validation fails.
///
/// # Errors
/// - Returns `DegenerateScale` when either scale has zero range.
pub fn convert_all(
    notes: &mut [Note],
    from: &GradingScale,
    to: &GradingScale,
) -> Result<usize, ConversionError> {
    ensure_convertible(from, to)?;
    if from.same_scale(to) {
        return Ok(0);
    }

    for note in notes.iter_mut() {
        note.grade = denormalize(normalize(note.grade, from), to);
    }
    refresh_display_labels(notes, to);
    Ok(notes.len())
}

/// Converts all notes of all subjects in place.
///
/// Either every subject is converted or none is.
///
/// # Side effects
/// - Emits `scale_convert` logging events with counts and system ids.
pub fn convert_subjects(
    subjects: &mut [Subject],
    from: &GradingScale,
    to: &GradingScale,
) -> Result<ConversionReport, ConversionError> {
    if let Err(err) = ensure_convertible(from, to) {
        warn!(
            "event=scale_convert module=convert status=error from={} to={} error={}",
            from.system, to.system, err
        );
        return Err(err);
    }
    if from.same_scale(to) {
        info!(
            "event=scale_convert module=convert status=skip reason=same_scale system={}",
            to.system
        );
        return Ok(ConversionReport::default());
    }

    let mut report = ConversionReport {
        subjects: subjects.len(),
        notes: 0,
    };
    for subject in subjects.iter_mut() {
        report.notes += convert_all(&mut subject.notes, from, to)?;
    }

    info!(
        "event=scale_convert module=convert status=ok from={} to={} subjects={} notes={}",
        from.system,
        to.system,
        report.subjects,
        report.notes
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::{convert, standing, ConversionError, ScaleSide};
    use crate::model::scale::{GradingScale, GradingSystem};

    fn degenerate() -> GradingScale {
        GradingScale {
            min_grade: 4.0,
            max_grade: 4.0,
            is_ascending: false,
            system: GradingSystem::Custom,
        }
    }

    #[test]
    fn swiss_to_german_flips_orientation() {
        let converted = convert(5.5, &GradingScale::swiss(), &GradingScale::german()).unwrap();
        assert_eq!(converted, 1.5);
    }

    #[test]
    fn best_swiss_grade_becomes_full_percentage() {
        let converted =
            convert(6.0, &GradingScale::swiss(), &GradingScale::percentage()).unwrap();
        assert_eq!(converted, 100.0);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        let converted = convert(9.0, &GradingScale::swiss(), &GradingScale::german()).unwrap();
        assert_eq!(converted, 1.0);
        let converted = convert(-3.0, &GradingScale::swiss(), &GradingScale::german()).unwrap();
        assert_eq!(converted, 6.0);
    }

    #[test]
    fn degenerate_scales_are_rejected_on_either_side() {
        let err = convert(3.0, &degenerate(), &GradingScale::swiss()).unwrap_err();
        assert_eq!(
            err,
            ConversionError::DegenerateScale {
                side: ScaleSide::Source,
                bound: 4.0
            }
        );
        let err = convert(3.0, &GradingScale::swiss(), &degenerate()).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::DegenerateScale {
                side: ScaleSide::Target,
                ..
            }
        ));
    }

    #[test]
    fn equal_scales_return_input_without_rounding() {
        let scale = GradingScale::swiss();
        assert_eq!(convert(4.37, &scale, &scale).unwrap(), 4.37);
    }

    #[test]
    fn standing_is_one_for_best_and_zero_for_worst() {
        let german = GradingScale::german();
        assert_eq!(standing(1.0, &german).unwrap(), 1.0);
        assert_eq!(standing(6.0, &german).unwrap(), 0.0);
        assert_eq!(standing(f64::NAN, &german).unwrap(), 0.0);
    }
}
