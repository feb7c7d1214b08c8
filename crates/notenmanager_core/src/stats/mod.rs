//! Derived statistics over stored grades.
//!
//! # Responsibility
//! - Compute averages, running averages and the target-reached flag.
//! - Build the derived view the host renders after every mutation.
//!
//! # Invariants
//! - Derived figures are recomputed from grades; nothing here is persisted.
//! - Empty inputs yield defined defaults (`0`, empty series), not errors.

pub mod averages;
pub mod summary;
