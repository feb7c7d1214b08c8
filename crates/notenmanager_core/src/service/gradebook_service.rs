//! Gradebook use-case service.
//!
//! # Responsibility
//! - Own the loaded subjects, the active settings and the last committed
//!   scale snapshot.
//! - Run scale conversion when settings change the scale, then persist.
//! - Provide subject/note CRUD and recompute the derived view on demand.
//!
//! # Invariants
//! - In-memory state changes only after the store accepted the write.
//! - Stored subjects and stored settings name the same scale.
//! - A scale change converts every note of every subject or none.
//! - New and edited grades must lie inside the active scale.
//! - The target-reached flag survives unparsable target text.

use crate::convert::letter::refresh_display_labels;
use crate::convert::scale_converter::{convert_subjects, ConversionError, ConversionReport};
use crate::model::gradebook::{note_count, Note, NoteId, Subject, SubjectId};
use crate::model::scale::{GradingScale, ScaleValidationError};
use crate::model::settings::AppSettings;
use crate::stats::summary::{derive_view, recent_notes, DerivedView, RecentNote};
use crate::store::{GradebookStore, StoreError};
use chrono::NaiveDate;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for gradebook use-cases.
#[derive(Debug)]
pub enum GradebookServiceError {
    /// Subject name is blank after trim.
    InvalidName,
    /// Grade is outside the active scale or not finite.
    GradeOutOfRange { grade: f64, min: f64, max: f64 },
    /// New settings carry an invalid scale.
    InvalidScale(ScaleValidationError),
    /// Target subject does not exist.
    SubjectNotFound(SubjectId),
    /// Target note does not exist in the subject.
    NoteNotFound(NoteId),
    /// Scale conversion was rejected; no grade changed.
    Conversion(ConversionError),
    /// Persistence failure; in-memory state is unchanged.
    Store(StoreError),
}

impl Display for GradebookServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "subject name must not be blank"),
            Self::GradeOutOfRange { grade, min, max } => {
                write!(f, "grade {grade} is outside the active scale [{min}, {max}]")
            }
            Self::InvalidScale(err) => write!(f, "invalid grading scale: {err}"),
            Self::SubjectNotFound(id) => write!(f, "subject not found: {id}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Conversion(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GradebookServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidScale(err) => Some(err),
            Self::Conversion(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for GradebookServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ConversionError> for GradebookServiceError {
    fn from(value: ConversionError) -> Self {
        Self::Conversion(value)
    }
}

impl From<ScaleValidationError> for GradebookServiceError {
    fn from(value: ScaleValidationError) -> Self {
        Self::InvalidScale(value)
    }
}

pub type ServiceResult<T> = Result<T, GradebookServiceError>;

/// Input for creating or replacing one note.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub kind: String,
    pub grade: f64,
    pub date: NaiveDate,
}

/// Gradebook facade over a storage implementation.
pub struct GradebookService<S: GradebookStore> {
    store: S,
    subjects: Vec<Subject>,
    settings: AppSettings,
    /// Scale the stored grades are currently expressed in.
    committed_scale: GradingScale,
    selected_subject: Option<SubjectId>,
    target_reached: bool,
}

impl<S: GradebookStore> GradebookService<S> {
    /// Loads subjects and settings from `store`.
    ///
    /// # Errors
    /// - Returns `Store` when the store cannot be read.
    pub fn open(store: S) -> ServiceResult<Self> {
        let settings = store.load_settings()?;
        let mut subjects = store.load_subjects()?;
        for subject in &mut subjects {
            refresh_display_labels(&mut subject.notes, &settings.scale);
        }
        info!(
            "event=gradebook_open module=service status=ok subjects={} notes={} system={}",
            subjects.len(),
            note_count(&subjects),
            settings.scale.system
        );

        let mut service = Self {
            store,
            committed_scale: settings.scale,
            subjects,
            settings,
            selected_subject: None,
            target_reached: false,
        };
        service.derived_view();
        Ok(service)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|subject| subject.id == id)
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selected_subject(&self) -> Option<SubjectId> {
        self.selected_subject
    }

    /// Recomputes every derived figure from stored grades.
    pub fn derived_view(&mut self) -> DerivedView {
        let view = derive_view(
            &self.subjects,
            &self.settings,
            self.selected_subject,
            self.target_reached,
        );
        self.target_reached = view.target_reached;
        view
    }

    /// Selects the subject whose running average is charted.
    pub fn select_subject(&mut self, id: Option<SubjectId>) -> ServiceResult<()> {
        if let Some(id) = id {
            self.subject(id)
                .ok_or(GradebookServiceError::SubjectNotFound(id))?;
        }
        self.selected_subject = id;
        Ok(())
    }

    /// Newest notes across all subjects.
    pub fn recent_notes(&self, count: usize) -> Vec<RecentNote> {
        recent_notes(&self.subjects, count)
    }

    /// Creates an empty subject.
    pub fn add_subject(
        &mut self,
        name: &str,
        lessons_per_week: u32,
        color_tag: &str,
    ) -> ServiceResult<SubjectId> {
        let name = normalize_name(name)?;
        let subject = Subject::new(name, lessons_per_week, color_tag);
        let id = subject.id;

        let mut next = self.subjects.clone();
        next.push(subject);
        self.commit_subjects(next, "add_subject")?;
        Ok(id)
    }

    /// Renames a subject.
    pub fn rename_subject(&mut self, id: SubjectId, name: &str) -> ServiceResult<()> {
        let name = normalize_name(name)?;
        let mut next = self.subjects.clone();
        find_subject_mut(&mut next, id)?.name = name;
        self.commit_subjects(next, "rename_subject")
    }

    /// Deletes a subject with all its notes.
    pub fn delete_subject(&mut self, id: SubjectId) -> ServiceResult<()> {
        let mut next = self.subjects.clone();
        let index = next
            .iter()
            .position(|subject| subject.id == id)
            .ok_or(GradebookServiceError::SubjectNotFound(id))?;
        next.remove(index);
        self.commit_subjects(next, "delete_subject")?;
        if self.selected_subject == Some(id) {
            self.selected_subject = None;
        }
        Ok(())
    }

    /// Adds a note to a subject.
    pub fn add_note(&mut self, subject_id: SubjectId, draft: NoteDraft) -> ServiceResult<NoteId> {
        self.ensure_in_scale(draft.grade)?;
        let mut note = Note::new(draft.kind, draft.grade, draft.date);
        refresh_display_labels(std::slice::from_mut(&mut note), &self.settings.scale);
        let note_id = note.id;

        let mut next = self.subjects.clone();
        find_subject_mut(&mut next, subject_id)?.notes.push(note);
        self.commit_subjects(next, "add_note")?;
        Ok(note_id)
    }

    /// Replaces type, grade and date of an existing note.
    pub fn update_note(
        &mut self,
        subject_id: SubjectId,
        note_id: NoteId,
        draft: NoteDraft,
    ) -> ServiceResult<()> {
        self.ensure_in_scale(draft.grade)?;
        let scale = self.settings.scale;

        let mut next = self.subjects.clone();
        let note = find_subject_mut(&mut next, subject_id)?
            .note_mut(note_id)
            .ok_or(GradebookServiceError::NoteNotFound(note_id))?;
        note.kind = draft.kind;
        note.grade = draft.grade;
        note.date = draft.date;
        refresh_display_labels(std::slice::from_mut(note), &scale);
        self.commit_subjects(next, "update_note")
    }

    /// Deletes one note.
    pub fn delete_note(&mut self, subject_id: SubjectId, note_id: NoteId) -> ServiceResult<()> {
        let mut next = self.subjects.clone();
        find_subject_mut(&mut next, subject_id)?
            .remove_note(note_id)
            .ok_or(GradebookServiceError::NoteNotFound(note_id))?;
        self.commit_subjects(next, "delete_note")
    }

    /// Removes every subject.
    pub fn clear_all(&mut self) -> ServiceResult<()> {
        self.commit_subjects(Vec::new(), "clear_all")?;
        self.selected_subject = None;
        Ok(())
    }

    /// Updates the target average text and persists settings.
    pub fn set_target_text(&mut self, text: &str) -> ServiceResult<()> {
        let mut next = self.settings.clone();
        next.target_average = text.to_string();
        self.store.save_settings(&next)?;
        self.settings = next;
        Ok(())
    }

    /// Applies new settings, converting stored grades when the scale
    /// changed.
    ///
    /// Subjects are saved before settings. When the settings save fails the
    /// previous subjects are written back, so both documents stay on one
    /// scale.
    ///
    /// # Errors
    /// - `InvalidScale` when the new scale fails validation.
    /// - `Conversion` when either scale is degenerate; nothing changes.
    /// - `Store` when persisting fails; store and memory stay on the previous
    ///   scale unless the rollback write fails too.
    pub fn apply_settings(&mut self, settings: AppSettings) -> ServiceResult<ConversionReport> {
        settings.scale.validate()?;

        let from = self.committed_scale;
        let to = settings.scale;
        let mut report = ConversionReport::default();
        let mut converted = None;

        if !from.same_scale(&to) {
            let mut next = self.subjects.clone();
            report = convert_subjects(&mut next, &from, &to)?;
            self.store.save_subjects(&next).map_err(|err| {
                error!(
                    "event=settings_apply module=service status=error stage=save_subjects error={}",
                    err
                );
                err
            })?;
            converted = Some(next);
        }

        if let Err(err) = self.store.save_settings(&settings) {
            error!(
                "event=settings_apply module=service status=error stage=save_settings error={}",
                err
            );
            if let Some(next) = converted {
                self.rollback_conversion(next, to);
            }
            return Err(err.into());
        }

        if let Some(next) = converted {
            self.subjects = next;
            self.committed_scale = to;
        }
        self.settings = settings;
        for subject in &mut self.subjects {
            refresh_display_labels(&mut subject.notes, &to);
        }

        info!(
            "event=settings_apply module=service status=ok system={} converted_notes={}",
            to.system, report.notes
        );
        Ok(report)
    }

    /// Writes the unconverted subjects back after a failed settings save.
    ///
    /// If that write fails too, the store keeps the converted grades; memory
    /// then follows the store so new grades are validated on the scale the
    /// stored grades use.
    fn rollback_conversion(&mut self, converted: Vec<Subject>, to: GradingScale) {
        match self.store.save_subjects(&self.subjects) {
            Ok(()) => info!(
                "event=settings_apply module=service status=rollback system={}",
                self.committed_scale.system
            ),
            Err(err) => {
                error!(
                    "event=settings_apply module=service status=error stage=rollback error={}",
                    err
                );
                self.subjects = converted;
                self.committed_scale = to;
                self.settings.scale = to;
                for subject in &mut self.subjects {
                    refresh_display_labels(&mut subject.notes, &to);
                }
            }
        }
    }

    fn ensure_in_scale(&self, grade: f64) -> ServiceResult<()> {
        let scale = &self.settings.scale;
        if grade.is_finite() && scale.contains(grade) {
            return Ok(());
        }
        let (min, max) = scale.bounds();
        Err(GradebookServiceError::GradeOutOfRange { grade, min, max })
    }

    fn commit_subjects(&mut self, next: Vec<Subject>, operation: &str) -> ServiceResult<()> {
        if let Err(err) = self.store.save_subjects(&next) {
            error!(
                "event={} module=service status=error error={}",
                operation, err
            );
            return Err(err.into());
        }
        debug!(
            "event={} module=service status=ok subjects={}",
            operation,
            next.len()
        );
        self.subjects = next;
        Ok(())
    }
}

fn normalize_name(name: &str) -> ServiceResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GradebookServiceError::InvalidName);
    }
    Ok(trimmed.to_string())
}

fn find_subject_mut(subjects: &mut [Subject], id: SubjectId) -> ServiceResult<&mut Subject> {
    subjects
        .iter_mut()
        .find(|subject| subject.id == id)
        .ok_or(GradebookServiceError::SubjectNotFound(id))
}
