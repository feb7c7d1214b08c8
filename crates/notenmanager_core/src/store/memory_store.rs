//! In-memory store for tests and ephemeral sessions.

use super::{GradebookStore, StoreResult};
use crate::model::gradebook::Subject;
use crate::model::settings::AppSettings;

/// Store that keeps the last saved snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    subjects: Vec<Subject>,
    settings: AppSettings,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with subjects and settings.
    pub fn with_data(subjects: Vec<Subject>, settings: AppSettings) -> Self {
        Self {
            subjects,
            settings,
            saves: 0,
        }
    }

    /// Number of successful save calls (subjects and settings).
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl GradebookStore for MemoryStore {
    fn load_subjects(&self) -> StoreResult<Vec<Subject>> {
        Ok(self.subjects.clone())
    }

    fn save_subjects(&mut self, subjects: &[Subject]) -> StoreResult<()> {
        self.subjects = subjects.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn load_settings(&self) -> StoreResult<AppSettings> {
        Ok(self.settings.clone())
    }

    fn save_settings(&mut self, settings: &AppSettings) -> StoreResult<()> {
        self.settings = settings.clone();
        self.saves += 1;
        Ok(())
    }
}
