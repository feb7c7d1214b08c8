//! Storage collaborator contracts and implementations.
//!
//! # Responsibility
//! - Define the load/save contract the gradebook service persists through.
//! - Provide an in-memory store and a JSON file store.
//!
//! # Invariants
//! - A failed save leaves previously stored data readable.
//! - Missing data files read as empty subjects / default settings.

pub mod json_store;
pub mod memory_store;

use crate::model::gradebook::Subject;
use crate::model::settings::AppSettings;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialization {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Store refused the write (read-only or failing backend).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage io failure at `{}`: {source}", path.display())
            }
            Self::Serialization { path, source } => {
                write!(f, "invalid stored data in `{}`: {source}", path.display())
            }
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            Self::Unavailable(_) => None,
        }
    }
}

/// Persistence contract for subjects and settings.
pub trait GradebookStore {
    fn load_subjects(&self) -> StoreResult<Vec<Subject>>;
    fn save_subjects(&mut self, subjects: &[Subject]) -> StoreResult<()>;
    fn load_settings(&self) -> StoreResult<AppSettings>;
    fn save_settings(&mut self, settings: &AppSettings) -> StoreResult<()>;
}
