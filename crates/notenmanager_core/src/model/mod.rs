//! Domain model for subjects, notes, grading scales and settings.
//!
//! # Responsibility
//! - Define the value types every core computation consumes.
//! - Keep scale bounds/orientation validation next to the scale type.
//!
//! # Invariants
//! - `Note::grade` is always a plain number on the currently active scale.
//! - `Note::display_label` is derived and never persisted.
//! - A usable `GradingScale` has `max_grade > min_grade`.

pub mod gradebook;
pub mod scale;
pub mod settings;
