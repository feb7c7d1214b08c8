//! JSON file store.
//!
//! # Responsibility
//! - Persist subjects and settings as two JSON documents in one directory.
//!
//! # Invariants
//! - Writes go to a temp file first and are renamed into place.
//! - Unreadable settings fall back to defaults; unreadable subjects are an
//!   error so user data is never silently replaced.

use super::{GradebookStore, StoreError, StoreResult};
use crate::model::gradebook::{note_count, Subject};
use crate::model::settings::AppSettings;
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const SUBJECTS_FILE_NAME: &str = "subjects.json";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Store backed by `subjects.json` and `settings.json` in `dir`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens (and creates if needed) the data directory.
    ///
    /// # Errors
    /// - Returns `StoreError::Io` when the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        info!("event=store_open module=store status=ok kind=json");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn subjects_path(&self) -> PathBuf {
        self.dir.join(SUBJECTS_FILE_NAME)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE_NAME)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Serialization {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let raw = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialization {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, raw)
        .and_then(|()| fs::rename(&tmp_path, path))
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
}

impl GradebookStore for JsonFileStore {
    fn load_subjects(&self) -> StoreResult<Vec<Subject>> {
        let path = self.subjects_path();
        match read_json::<Vec<Subject>>(&path) {
            Ok(subjects) => Ok(subjects.unwrap_or_default()),
            Err(err) => {
                error!(
                    "event=store_load module=store status=error target=subjects error={}",
                    err
                );
                Err(err)
            }
        }
    }

    fn save_subjects(&mut self, subjects: &[Subject]) -> StoreResult<()> {
        write_json(&self.subjects_path(), subjects)
    }

    fn load_settings(&self) -> StoreResult<AppSettings> {
        match read_json::<AppSettings>(&self.settings_path()) {
            Ok(settings) => Ok(settings.unwrap_or_default()),
            Err(StoreError::Serialization { source, .. }) => {
                // Stored grades keep their numbers; the default scale may not
                // be the one they were written on.
                let stored_notes = read_json::<Vec<Subject>>(&self.subjects_path())
                    .ok()
                    .flatten()
                    .map(|subjects| note_count(&subjects))
                    .unwrap_or(0);
                warn!(
                    "event=store_load module=store status=fallback target=settings stored_notes={} default_system={} error={}",
                    stored_notes,
                    AppSettings::default().scale.system,
                    source
                );
                Ok(AppSettings::default())
            }
            Err(err) => Err(err),
        }
    }

    fn save_settings(&mut self, settings: &AppSettings) -> StoreResult<()> {
        write_json(&self.settings_path(), settings)
    }
}
