use chrono::NaiveDate;
use notenmanager_core::{
    AppSettings, GradebookService, GradebookStore, GradingScale, JsonFileStore, Note, NoteDraft,
    StoreError, Subject,
};
use std::fs;

#[test]
fn missing_files_load_as_empty_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("data")).unwrap();

    assert!(store.load_subjects().unwrap().is_empty());
    assert_eq!(store.load_settings().unwrap(), AppSettings::default());
}

#[test]
fn subjects_and_settings_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::open(dir.path()).unwrap();

    let mut math = Subject::new("Mathematik", 3, "math");
    let mut note = Note::new("Test", 4.0, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    note.display_label = Some("B".to_string());
    math.notes.push(note);
    store.save_subjects(&[math.clone()]).unwrap();

    let settings = AppSettings {
        user_name: "Lena".to_string(),
        scale: GradingScale::percentage(),
        ..AppSettings::default()
    };
    store.save_settings(&settings).unwrap();

    let reopened = JsonFileStore::open(dir.path()).unwrap();
    let loaded = reopened.load_subjects().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, math.id);
    assert_eq!(loaded[0].notes[0].grade, 4.0);
    assert_eq!(loaded[0].notes[0].display_label, None);
    assert_eq!(reopened.load_settings().unwrap(), settings);
}

#[test]
fn corrupt_settings_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    fs::write(store.settings_path(), "{ not json").unwrap();

    assert_eq!(store.load_settings().unwrap(), AppSettings::default());
}

#[test]
fn corrupt_settings_next_to_grades_leave_subjects_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::open(dir.path()).unwrap();
    let mut math = Subject::new("Mathematik", 3, "math");
    math.notes
        .push(Note::new("Test", 1.5, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
    store.save_subjects(&[math]).unwrap();
    let subjects_before = fs::read_to_string(store.subjects_path()).unwrap();
    fs::write(store.settings_path(), "{\"scale\": 3").unwrap();

    assert_eq!(store.load_settings().unwrap(), AppSettings::default());
    assert_eq!(
        fs::read_to_string(store.subjects_path()).unwrap(),
        subjects_before
    );
    assert_eq!(store.load_subjects().unwrap()[0].notes[0].grade, 1.5);
}

#[test]
fn settings_with_zero_range_scale_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    let raw = serde_json::json!({
        "scale": {
            "min_grade": 2.0,
            "max_grade": 2.0,
            "is_ascending": false,
            "system": "custom"
        }
    });
    fs::write(store.settings_path(), raw.to_string()).unwrap();

    assert_eq!(store.load_settings().unwrap().scale, GradingScale::swiss());
}

#[test]
fn corrupt_subjects_are_reported_not_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    fs::write(store.subjects_path(), "[{\"id\": 1}]").unwrap();

    let err = store.load_subjects().unwrap_err();
    assert!(matches!(err, StoreError::Serialization { .. }));
    assert!(fs::read_to_string(store.subjects_path())
        .unwrap()
        .contains("\"id\""));
}

#[test]
fn service_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let math_id = {
        let store = JsonFileStore::open(dir.path()).unwrap();
        let mut service = GradebookService::open(store).unwrap();
        let math = service.add_subject("Mathematik", 3, "math").unwrap();
        service
            .add_note(
                math,
                NoteDraft {
                    kind: "Klassenarbeit".to_string(),
                    grade: 5.5,
                    date: NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
                },
            )
            .unwrap();
        service
            .apply_settings(AppSettings {
                scale: GradingScale::german(),
                ..AppSettings::default()
            })
            .unwrap();
        math
    };

    let store = JsonFileStore::open(dir.path()).unwrap();
    let service = GradebookService::open(store).unwrap();
    assert_eq!(service.settings().scale, GradingScale::german());
    assert_eq!(service.subject(math_id).unwrap().notes[0].grade, 1.5);
}
