//! Grading scale value object.
//!
//! # Responsibility
//! - Describe a grading scale as `(min, max, orientation, system)`.
//! - Provide presets for the supported grading systems.
//! - Provide bounds helpers (best/worst bound, containment, clamping,
//!   precision-aware rounding).
//!
//! # Invariants
//! - `min_grade` and `max_grade` are finite.
//! - `max_grade > min_grade`; zero-range scales are rejected by
//!   `validate()` and by deserialization.
//! - `is_ascending == true` means the numerically smallest bound is the
//!   best grade (German 1); `false` means the largest bound is best
//!   (Swiss 6).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Closed set of grading systems known to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingSystem {
    /// Swiss 6..1, 6 is best.
    Swiss,
    /// German 1..6, 1 is best.
    German,
    /// US letter grades, stored as GPA points 0..4.
    UsLetter,
    /// Percentage 0..100, 100 is best.
    Percentage,
    /// Caller-defined bounds and orientation.
    Custom,
}

impl GradingSystem {
    /// Stable identifier used in logs and settings files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Swiss => "swiss",
            Self::German => "german",
            Self::UsLetter => "us_letter",
            Self::Percentage => "percentage",
            Self::Custom => "custom",
        }
    }

    /// Number of decimals used when a grade is shown or committed.
    ///
    /// Percentage grades are whole numbers; every other system keeps one
    /// decimal.
    pub fn display_decimals(self) -> u32 {
        match self {
            Self::Percentage => 0,
            _ => 1,
        }
    }
}

impl Display for GradingSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for grading scale bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleValidationError {
    /// One of the bounds is NaN or infinite.
    NonFiniteBound { min: f64, max: f64 },
    /// `min_grade == max_grade`; conversion would divide by zero.
    ZeroRange { bound: f64 },
    /// `min_grade > max_grade`.
    InvertedRange { min: f64, max: f64 },
}

impl Display for ScaleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteBound { min, max } => {
                write!(f, "scale bounds must be finite, got min={min} max={max}")
            }
            Self::ZeroRange { bound } => {
                write!(f, "scale has zero range: min and max are both {bound}")
            }
            Self::InvertedRange { min, max } => {
                write!(f, "scale min ({min}) must be < max ({max})")
            }
        }
    }
}

impl Error for ScaleValidationError {}

/// Grading scale: numeric bounds plus which bound is the best grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GradingScaleWire")]
pub struct GradingScale {
    pub min_grade: f64,
    pub max_grade: f64,
    /// `true` when the smaller bound is the best grade.
    pub is_ascending: bool,
    pub system: GradingSystem,
}

#[derive(Deserialize)]
struct GradingScaleWire {
    min_grade: f64,
    max_grade: f64,
    is_ascending: bool,
    system: GradingSystem,
}

impl TryFrom<GradingScaleWire> for GradingScale {
    type Error = ScaleValidationError;

    fn try_from(value: GradingScaleWire) -> Result<Self, Self::Error> {
        Self::new(
            value.system,
            value.min_grade,
            value.max_grade,
            value.is_ascending,
        )
    }
}

impl Default for GradingScale {
    fn default() -> Self {
        Self::swiss()
    }
}

impl GradingScale {
    /// Creates a validated scale.
    ///
    /// # Errors
    /// - Returns `ScaleValidationError` when bounds are non-finite, equal,
    ///   or reversed.
    pub fn new(
        system: GradingSystem,
        min_grade: f64,
        max_grade: f64,
        is_ascending: bool,
    ) -> Result<Self, ScaleValidationError> {
        let scale = Self {
            min_grade,
            max_grade,
            is_ascending,
            system,
        };
        scale.validate()?;
        Ok(scale)
    }

    /// Swiss scale: 1..6, 6 is best.
    pub fn swiss() -> Self {
        Self::preset(GradingSystem::Swiss, 1.0, 6.0, false)
    }

    /// German scale: 1..6, 1 is best.
    pub fn german() -> Self {
        Self::preset(GradingSystem::German, 1.0, 6.0, true)
    }

    /// US letter scale in GPA points: 0 (F) .. 4 (A).
    pub fn us_letter() -> Self {
        Self::preset(GradingSystem::UsLetter, 0.0, 4.0, false)
    }

    /// Percentage scale: 0..100, 100 is best.
    pub fn percentage() -> Self {
        Self::preset(GradingSystem::Percentage, 0.0, 100.0, false)
    }

    /// Custom bounds with explicit orientation.
    pub fn custom(
        min_grade: f64,
        max_grade: f64,
        is_ascending: bool,
    ) -> Result<Self, ScaleValidationError> {
        Self::new(GradingSystem::Custom, min_grade, max_grade, is_ascending)
    }

    /// Returns the preset for a fixed system, `None` for `Custom`.
    pub fn for_system(system: GradingSystem) -> Option<Self> {
        match system {
            GradingSystem::Swiss => Some(Self::swiss()),
            GradingSystem::German => Some(Self::german()),
            GradingSystem::UsLetter => Some(Self::us_letter()),
            GradingSystem::Percentage => Some(Self::percentage()),
            GradingSystem::Custom => None,
        }
    }

    fn preset(system: GradingSystem, min_grade: f64, max_grade: f64, is_ascending: bool) -> Self {
        Self {
            min_grade,
            max_grade,
            is_ascending,
            system,
        }
    }

    /// Checks bound invariants.
    pub fn validate(&self) -> Result<(), ScaleValidationError> {
        if !self.min_grade.is_finite() || !self.max_grade.is_finite() {
            return Err(ScaleValidationError::NonFiniteBound {
                min: self.min_grade,
                max: self.max_grade,
            });
        }
        if self.min_grade == self.max_grade {
            return Err(ScaleValidationError::ZeroRange {
                bound: self.min_grade,
            });
        }
        if self.min_grade > self.max_grade {
            return Err(ScaleValidationError::InvertedRange {
                min: self.min_grade,
                max: self.max_grade,
            });
        }
        Ok(())
    }

    /// Whether this scale has zero width and cannot take part in conversion.
    pub fn is_degenerate(&self) -> bool {
        self.max_grade == self.min_grade
    }

    /// Absolute width of the scale.
    pub fn span(&self) -> f64 {
        (self.max_grade - self.min_grade).abs()
    }

    /// Lower and upper numeric bounds, in order.
    pub fn bounds(&self) -> (f64, f64) {
        (
            self.min_grade.min(self.max_grade),
            self.min_grade.max(self.max_grade),
        )
    }

    /// Numeric value of the best possible grade.
    pub fn best(&self) -> f64 {
        if self.is_ascending {
            self.min_grade
        } else {
            self.max_grade
        }
    }

    /// Numeric value of the worst possible grade.
    pub fn worst(&self) -> f64 {
        if self.is_ascending {
            self.max_grade
        } else {
            self.min_grade
        }
    }

    /// Whether `value` lies within the scale bounds (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        let (low, high) = self.bounds();
        value >= low && value <= high
    }

    /// Clamps `value` into the scale bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        let (low, high) = self.bounds();
        value.clamp(low, high)
    }

    /// Rounds `value` with this scale's display precision.
    pub fn round_for_display(&self, value: f64) -> f64 {
        round_to(value, self.system.display_decimals())
    }

    /// Whether `a` is a strictly better grade than `b` on this scale.
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        if self.is_ascending {
            a < b
        } else {
            a > b
        }
    }

    /// Field-wise equality used to decide whether stored grades must be
    /// re-mapped.
    pub fn same_scale(&self, other: &Self) -> bool {
        self.min_grade == other.min_grade
            && self.max_grade == other.max_grade
            && self.is_ascending == other.is_ascending
            && self.system == other.system
    }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// One-decimal rounding used for stored grades and averages.
pub fn round_tenth(value: f64) -> f64 {
    round_to(value, 1)
}

/// Two-decimal rounding used for chart series.
pub fn round_hundredth(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::{round_hundredth, round_tenth, GradingScale, GradingSystem, ScaleValidationError};

    #[test]
    fn presets_have_expected_best_and_worst_bounds() {
        assert_eq!(GradingScale::swiss().best(), 6.0);
        assert_eq!(GradingScale::swiss().worst(), 1.0);
        assert_eq!(GradingScale::german().best(), 1.0);
        assert_eq!(GradingScale::german().worst(), 6.0);
        assert_eq!(GradingScale::us_letter().best(), 4.0);
        assert_eq!(GradingScale::percentage().best(), 100.0);
    }

    #[test]
    fn new_rejects_zero_and_inverted_ranges() {
        assert_eq!(
            GradingScale::custom(3.0, 3.0, false).unwrap_err(),
            ScaleValidationError::ZeroRange { bound: 3.0 }
        );
        assert_eq!(
            GradingScale::custom(5.0, 1.0, true).unwrap_err(),
            ScaleValidationError::InvertedRange { min: 5.0, max: 1.0 }
        );
        assert!(matches!(
            GradingScale::custom(f64::NAN, 1.0, true),
            Err(ScaleValidationError::NonFiniteBound { .. })
        ));
    }

    #[test]
    fn clamp_and_contains_use_inclusive_bounds() {
        let scale = GradingScale::german();
        assert!(scale.contains(1.0));
        assert!(scale.contains(6.0));
        assert!(!scale.contains(6.01));
        assert_eq!(scale.clamp(7.2), 6.0);
        assert_eq!(scale.clamp(-1.0), 1.0);
    }

    #[test]
    fn display_rounding_depends_on_system() {
        assert_eq!(GradingScale::percentage().round_for_display(87.6), 88.0);
        assert_eq!(GradingScale::swiss().round_for_display(4.56), 4.6);
        assert_eq!(GradingSystem::Percentage.display_decimals(), 0);
    }

    #[test]
    fn rounding_helpers_round_half_away_from_zero() {
        assert_eq!(round_tenth(2.25), 2.3);
        assert_eq!(round_hundredth(3.333_333), 3.33);
        assert_eq!(round_hundredth(2.666_666), 2.67);
    }

    #[test]
    fn orientation_decides_which_grade_is_better() {
        assert!(GradingScale::swiss().is_better(5.5, 4.0));
        assert!(GradingScale::german().is_better(1.5, 2.0));
    }
}
