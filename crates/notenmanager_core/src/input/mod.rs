//! Grade text input handling.
//!
//! # Responsibility
//! - Filter keystrokes cheaply while the user is typing (`LiveClean`).
//! - Turn the settled text into a grade on the active scale (`Commit`).
//! - On the US letter scale, accept a typed letter (`B+`) and seed the
//!   grade from its canonical points.
//!
//! # Invariants
//! - Both modes share one character filter.
//! - A committed grade is always inside the active scale and rounded with
//!   the scale's display precision.
//! - Debouncing is the caller's job; every call here is cheap and
//!   idempotent.

use crate::convert::letter::{letter_to_numeric, LetterGrade};
use crate::model::scale::{GradingScale, GradingSystem};
use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.,\-]").expect("valid grade filter regex"));

/// Processing depth requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Per-keystroke filtering only; never parses.
    LiveClean,
    /// Final pass after the input settled: parse, clamp and round.
    Commit,
}

/// Result of processing grade text.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeInput {
    /// Text to show back in the field.
    pub text: String,
    /// Parsed grade. Always `None` in `LiveClean` mode.
    pub value: Option<f64>,
}

/// Processes raw field text in the requested mode.
pub fn process_grade_input(raw: &str, scale: &GradingScale, mode: InputMode) -> GradeInput {
    if let Some(letter) = letter_input(raw, scale) {
        return match mode {
            InputMode::LiveClean => GradeInput {
                text: raw.trim().to_ascii_uppercase(),
                value: None,
            },
            InputMode::Commit => {
                let value = letter_to_numeric(letter);
                GradeInput {
                    text: format_grade(value, scale),
                    value: Some(value),
                }
            }
        };
    }

    let cleaned = live_clean(raw);
    match mode {
        InputMode::LiveClean => GradeInput {
            text: cleaned,
            value: None,
        },
        InputMode::Commit => match commit_cleaned(&cleaned, scale) {
            Some(value) => GradeInput {
                text: format_grade(value, scale),
                value: Some(value),
            },
            None => GradeInput {
                text: cleaned,
                value: None,
            },
        },
    }
}

/// Drops characters that cannot be part of a grade.
///
/// Keeps digits, one decimal separator (`,` becomes `.`) and a leading
/// minus sign.
pub fn live_clean(raw: &str) -> String {
    let filtered = DISALLOWED_CHARS_RE.replace_all(raw, "");
    let mut cleaned = String::with_capacity(filtered.len());
    let mut seen_separator = false;

    for ch in filtered.chars() {
        match ch {
            '-' if cleaned.is_empty() => cleaned.push('-'),
            '-' => {}
            '.' | ',' if !seen_separator => {
                seen_separator = true;
                cleaned.push('.');
            }
            '.' | ',' => {}
            digit => cleaned.push(digit),
        }
    }

    cleaned
}

/// Parses, clamps and rounds a settled grade text.
///
/// Returns `None` for text without a number (`""`, `"-"`, `"."`).
/// A letter on the US letter scale commits to its canonical points.
pub fn commit_grade(raw: &str, scale: &GradingScale) -> Option<f64> {
    if let Some(letter) = letter_input(raw, scale) {
        return Some(letter_to_numeric(letter));
    }
    commit_cleaned(&live_clean(raw), scale)
}

fn letter_input(raw: &str, scale: &GradingScale) -> Option<LetterGrade> {
    if scale.system != GradingSystem::UsLetter {
        return None;
    }
    raw.parse::<LetterGrade>().ok()
}

fn commit_cleaned(cleaned: &str, scale: &GradingScale) -> Option<f64> {
    let value = cleaned.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(scale.round_for_display(scale.clamp(value)))
}

/// Formats a grade with the scale's display precision.
pub fn format_grade(value: f64, scale: &GradingScale) -> String {
    let decimals = scale.system.display_decimals() as usize;
    format!("{value:.decimals$}")
}
