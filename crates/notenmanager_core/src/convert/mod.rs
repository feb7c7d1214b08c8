//! Grade conversion between grading scales.
//!
//! # Responsibility
//! - Re-map grades across scales while preserving relative standing.
//! - Render US letter labels for display.
//!
//! # Invariants
//! - Conversion never produces a grade outside the target scale.
//! - Batch conversion is all-or-nothing.

pub mod letter;
pub mod scale_converter;
