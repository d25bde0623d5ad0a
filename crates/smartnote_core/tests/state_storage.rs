use chrono::NaiveDate;
use smartnote_core::{
    AppState, JsonFileStore, MemoryStore, Note, PointsLedger, StateStore, StorageError, Todo,
};
use std::fs;

fn sample_state() -> AppState {
    let mut state = AppState::default();
    let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    state
        .entries
        .push_note(Note::new("buy milk", day.and_hms_opt(7, 45, 0).unwrap()));
    let mut done = Todo::new("call Sam", day);
    done.complete();
    state.entries.push_todo(done);
    state.entries.push_todo(Todo::new("file taxes", day.succ_opt().unwrap()));
    state.points = PointsLedger::new(30);
    state
}

#[test]
fn missing_document_loads_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("data").join("app_data.json"));

    let state = store.load().unwrap();
    assert_eq!(state, AppState::default());
    assert!(state.entries.notes().is_empty());
    assert_eq!(state.points.total(), 0);
}

#[test]
fn save_creates_parent_directory_and_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("app_data.json");
    let mut store = JsonFileStore::new(&path);
    let state = sample_state();

    store.save(&state).unwrap();

    assert!(path.exists());
    assert!(!dir.path().join("nested").join("app_data.json.tmp").exists());
    assert_eq!(store.load().unwrap(), state);
}

#[test]
fn saved_document_uses_three_top_level_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app_data.json");
    let mut store = JsonFileStore::new(&path);
    store.save(&sample_state()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let object = json.as_object().unwrap();
    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["notes", "points", "todos"]);

    assert_eq!(json["notes"][0]["text"], "buy milk");
    assert_eq!(json["notes"][0]["date"], "2026-10-19 07:45");
    assert_eq!(json["todos"][0]["task"], "call Sam");
    assert_eq!(json["todos"][0]["date"], "2026-10-19");
    assert_eq!(json["todos"][0]["completed"], true);
    assert_eq!(json["todos"][1]["date"], "2026-10-20");
    assert_eq!(json["points"], 30);
}

#[test]
fn save_replaces_previous_document_entirely() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("app_data.json"));
    store.save(&sample_state()).unwrap();

    let smaller = AppState {
        points: PointsLedger::new(1),
        ..AppState::default()
    };
    store.save(&smaller).unwrap();

    assert_eq!(store.load().unwrap(), smaller);
}

#[test]
fn missing_fields_fall_back_to_defaults_and_nil_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app_data.json");
    fs::write(
        &path,
        r#"{"todos": [{"task": "legacy", "date": "2025-01-02", "completed": false}]}"#,
    )
    .unwrap();

    let state = JsonFileStore::new(&path).load().unwrap();
    assert!(state.entries.notes().is_empty());
    assert_eq!(state.points.total(), 0);
    let todo = &state.entries.todos()[0];
    assert_eq!(todo.task, "legacy");
    assert_eq!(todo.date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    assert!(todo.id.is_nil());
}

#[test]
fn malformed_document_is_reported_not_masked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app_data.json");
    fs::write(&path, "{\"notes\": [").unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::Malformed { path: ref p, .. } if p == &path));
    assert!(err.to_string().contains("malformed"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"notes\": [");
}

#[test]
fn bad_date_format_is_malformed() {
    let mut store = MemoryStore::with_document(
        r#"{"notes": [{"text": "x", "date": "19/10/2026"}], "todos": [], "points": 0}"#,
    );
    assert!(matches!(
        store.load().unwrap_err(),
        StorageError::Malformed { .. }
    ));

    store.save(&AppState::default()).unwrap();
    assert_eq!(store.load().unwrap(), AppState::default());
}

#[test]
fn failed_save_leaves_no_tmp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app_data.json");
    fs::create_dir(&path).unwrap();

    let err = JsonFileStore::new(&path).save(&sample_state()).unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
    assert!(!dir.path().join("app_data.json.tmp").exists());
    assert!(path.is_dir());
}
