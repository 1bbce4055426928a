use serde_json::json;
use stalkline_core::{
    CategoryKey, ConfigError, Dataset, DatasetError, EntryId, FocusPolicy, SelectionOrder,
    ViewConfig, ViewState,
};
use std::fs;

#[test]
fn dataset_and_config_load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("timeline.json");
    let config_path = dir.path().join("view.json");

    let data = json!({
        "lee": [
            { "y": 2016.5, "date": "2016.07", "event": "first", "fact": "one" },
            { "y": 2020.25, "date": "2020.04", "event": "second" },
        ],
        "park": [{ "y": 2018, "date": "2018.01", "event": "third", "fact": "three" }],
    });
    fs::write(&data_path, serde_json::to_vec_pretty(&data).unwrap()).unwrap();

    let config = json!({
        "categories": [
            { "key": "lee", "display_name": "Lee", "x": -10.0, "color": "#ffcc00" },
            { "key": "park", "display_name": "Park", "x": -2.0, "color": "#00ffff" },
        ],
        "selection_order": "insertion",
        "focus_policy": "snap_to_latest",
        "framing": { "padding": { "right": 500 } },
    });
    fs::write(&config_path, config.to_string()).unwrap();

    let dataset = Dataset::from_path(&data_path).unwrap();
    let config = ViewConfig::from_path(&config_path).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(config.selection_order, SelectionOrder::Insertion);
    assert_eq!(config.focus_policy, FocusPolicy::SnapToLatest);
    assert_eq!(config.framing.padding.right, 500.0);
    assert_eq!(config.framing.padding.left, 40.0);

    let lee = dataset.entries(&CategoryKey::new("lee"));
    assert_eq!(lee[1].fact, "");

    let state = ViewState::new(config, dataset).unwrap();
    assert_eq!(state.range().min(), 2016.5);
    assert_eq!(state.range().max(), 2020.25);
    assert!(state.is_visible(&"lee@2020.25".parse::<EntryId>().unwrap()));
}

#[test]
fn missing_data_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dataset::from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, DatasetError::Io(_)));
}

#[test]
fn duplicate_y_in_one_category_is_rejected() {
    let data = json!({
        "main": [
            { "y": 7, "date": "", "event": "", "fact": "" },
            { "y": 7.0, "date": "", "event": "", "fact": "" },
        ],
    });
    let err = Dataset::from_json_str(&data.to_string()).unwrap_err();
    assert!(matches!(err, DatasetError::DuplicateY { .. }));
}

#[test]
fn same_y_in_different_categories_is_fine() {
    let data = json!({
        "main": [{ "y": 7, "date": "", "event": "", "fact": "" }],
        "park": [{ "y": 7, "date": "", "event": "", "fact": "" }],
    });
    let dataset = Dataset::from_json_str(&data.to_string()).unwrap();
    assert_eq!(dataset.len(), 2);
}

#[test]
fn malformed_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("view.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        ViewConfig::from_path(&path).unwrap_err(),
        ConfigError::Json(_)
    ));

    fs::write(&path, json!({ "categories": [] }).to_string()).unwrap();
    assert!(matches!(
        ViewConfig::from_path(&path).unwrap_err(),
        ConfigError::EmptyCategories
    ));
}

#[test]
fn empty_dataset_yields_zero_range_and_no_home() {
    let mut state = ViewState::new(ViewConfig::default(), Dataset::default()).unwrap();
    assert_eq!(state.range().lo(), 0.0);
    assert_eq!(state.range().hi(), 0.0);
    assert!(state.visible_entries().is_empty());
    assert!(state.home().is_none());
}
