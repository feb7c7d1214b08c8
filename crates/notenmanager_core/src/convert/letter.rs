//! US letter rendering of numeric grades.
//!
//! The mapping is display-only. Conversion arithmetic always runs on the
//! numeric grade.
//!
//! | Numeric range (inclusive) | Letter |
//! |---------------------------|--------|
//! | 3.70 – 4.00               | A      |
//! | 2.70 – 3.69               | B      |
//! | 1.70 – 2.69               | C      |
//! | 0.70 – 1.69               | D      |
//! | 0.00 – 0.69               | F      |

use crate::model::gradebook::Note;
use crate::model::scale::{GradingScale, GradingSystem};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Coarse US letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Canonical GPA point used to seed a numeric value from a letter.
    pub fn canonical_points(self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::B => 3.0,
            Self::C => 2.0,
            Self::D => 1.0,
            Self::F => 0.0,
        }
    }
}

impl Display for LetterGrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLetterError(pub String);

impl Display for UnknownLetterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown letter grade `{}`; expected A|B|C|D|F", self.0)
    }
}

impl Error for UnknownLetterError {}

/// Parses picker or typed text; grade input uses it to seed a numeric
/// grade on the US letter scale.
impl FromStr for LetterGrade {
    type Err = UnknownLetterError;

    /// Accepts the base letter with an optional `+`/`-` modifier; the
    /// modifier is dropped.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let base = trimmed.trim_end_matches(['+', '-']);
        match base.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "F" => Ok(Self::F),
            _ => Err(UnknownLetterError(trimmed.to_string())),
        }
    }
}

/// Maps GPA points to a letter. Values above 4.0 are `A`, below 0 are `F`.
pub fn numeric_to_letter(value: f64) -> LetterGrade {
    // Values between two printed bands (3.695) fall into the lower band.
    match value {
        v if v >= 3.7 => LetterGrade::A,
        v if v >= 2.7 => LetterGrade::B,
        v if v >= 1.7 => LetterGrade::C,
        v if v >= 0.7 => LetterGrade::D,
        _ => LetterGrade::F,
    }
}

/// Maps a letter to its canonical GPA point.
pub fn letter_to_numeric(letter: LetterGrade) -> f64 {
    letter.canonical_points()
}

/// Display label for `grade` on `scale`; `None` unless the scale is US
/// letter.
pub fn display_label(grade: f64, scale: &GradingScale) -> Option<String> {
    match scale.system {
        GradingSystem::UsLetter => Some(numeric_to_letter(grade).as_str().to_string()),
        _ => None,
    }
}

/// Recomputes `display_label` for every note against the active scale.
pub fn refresh_display_labels(notes: &mut [Note], scale: &GradingScale) {
    for note in notes.iter_mut() {
        note.display_label = display_label(note.grade, scale);
    }
}
