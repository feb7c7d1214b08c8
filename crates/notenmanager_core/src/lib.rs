//! Core grading logic for NotenManager.
//! This crate owns scale conversion and grade statistics; UI and storage
//! formats live with the host.

pub mod convert;
pub mod input;
pub mod logging;
pub mod model;
pub mod service;
pub mod stats;
pub mod store;

pub use convert::letter::{
    display_label, letter_to_numeric, numeric_to_letter, refresh_display_labels, LetterGrade,
    UnknownLetterError,
};
pub use convert::scale_converter::{
    convert, convert_all, convert_subjects, standing, ConversionError, ConversionReport,
    ScaleSide,
};
pub use input::{commit_grade, live_clean, process_grade_input, GradeInput, InputMode};
pub use logging::{init_logging, logging_status, LogConfig, LogLevel, LoggingError};
pub use model::gradebook::{Note, NoteId, Subject, SubjectId};
pub use model::scale::{GradingScale, GradingSystem, ScaleValidationError};
pub use model::settings::AppSettings;
pub use service::gradebook_service::{GradebookService, GradebookServiceError, NoteDraft};
pub use stats::averages::{
    is_target_reached, overall_average, parse_target, running_average_series, subject_average,
    RunningAveragePoint, TargetComparison, TargetParseError,
};
pub use stats::summary::{
    derive_view, grade_distribution, recent_notes, DerivedView, GradeBand, RecentNote,
    SubjectAverage,
};
pub use store::{GradebookStore, JsonFileStore, MemoryStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
