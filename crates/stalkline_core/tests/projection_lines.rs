use glam::Vec3;
use serde_json::json;
use stalkline_core::{
    project_to_screen, CameraView, Category, CategoryKey, Dataset, EntryId, ScreenRect,
    ViewConfig, ViewState, Viewport,
};

const VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

fn state() -> ViewState {
    let data = json!({
        "a": [
            { "y": 0, "date": "", "event": "", "fact": "" },
            { "y": 4, "date": "", "event": "", "fact": "" },
        ],
    });
    let config = ViewConfig {
        categories: vec![Category::new("a", "A", 0.0, "#ffffff")],
        ..ViewConfig::default()
    };
    ViewState::new(config, Dataset::from_json_str(&data.to_string()).unwrap()).unwrap()
}

fn front_camera() -> CameraView {
    CameraView {
        eye: Vec3::new(0.0, 0.0, 20.0),
        target: Vec3::ZERO,
        ..CameraView::from_preset(&ViewConfig::default().camera)
    }
}

fn id(y: f64) -> EntryId {
    EntryId::new(CategoryKey::new("a"), y)
}

#[test]
fn line_runs_from_projected_entry_to_card_anchor() {
    let mut state = state();
    state.toggle_entry(&id(0.0));
    let rect = ScreenRect::new(1000.0, 300.0, 200.0, 100.0);
    assert!(state.set_card_rect(&id(0.0), rect));

    let lines = state.frame_lines(front_camera(), VIEWPORT);
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert!(line.state.visible);
    assert!(line.changed);

    // The origin sits at the viewport center; the anchor is (1000, 350).
    assert!((line.state.origin.x - 640.0).abs() < 1e-3);
    assert!((line.state.origin.y - 400.0).abs() < 1e-3);
    let expected_length = (360.0f32 * 360.0 + 50.0 * 50.0).sqrt();
    assert!((line.state.length - expected_length).abs() < 1e-2);
    assert!((line.state.angle - (-50.0f32).atan2(360.0)).abs() < 1e-4);
}

#[test]
fn unchanged_frame_reports_no_change() {
    let mut state = state();
    state.toggle_entry(&id(4.0));
    state.set_card_rect(&id(4.0), ScreenRect::new(900.0, 100.0, 300.0, 80.0));

    let first = state.frame_lines(front_camera(), VIEWPORT);
    let second = state.frame_lines(front_camera(), VIEWPORT);
    assert!(first[0].changed);
    assert!(!second[0].changed);
    assert_eq!(first[0].state, second[0].state);
}

#[test]
fn card_outside_viewport_hides_line_and_keeps_geometry() {
    let mut state = state();
    state.toggle_entry(&id(0.0));
    state.set_card_rect(&id(0.0), ScreenRect::new(1000.0, 300.0, 200.0, 100.0));
    let shown = state.frame_lines(front_camera(), VIEWPORT)[0].state;

    state.set_card_rect(&id(0.0), ScreenRect::new(1000.0, -150.0, 200.0, 100.0));
    let above = state.frame_lines(front_camera(), VIEWPORT)[0].clone();
    assert!(!above.state.visible);
    assert!(above.changed);
    assert_eq!(above.state.origin, shown.origin);
    assert_eq!(above.state.length, shown.length);

    state.set_card_rect(&id(0.0), ScreenRect::new(1000.0, 801.0, 200.0, 100.0));
    let below = state.frame_lines(front_camera(), VIEWPORT)[0].clone();
    assert!(!below.state.visible);
    assert!(!below.changed);
}

#[test]
fn card_touching_viewport_edge_keeps_line() {
    let mut state = state();
    state.toggle_entry(&id(0.0));
    state.set_card_rect(&id(0.0), ScreenRect::new(1000.0, -100.0, 200.0, 100.0));

    let lines = state.frame_lines(front_camera(), VIEWPORT);
    assert!(lines[0].state.visible);
}

#[test]
fn entries_without_cards_produce_no_lines() {
    let mut state = state();
    state.toggle_entry(&id(0.0));
    state.toggle_entry(&id(4.0));
    state.set_card_rect(&id(4.0), ScreenRect::new(1000.0, 300.0, 200.0, 100.0));

    let lines = state.frame_lines(front_camera(), VIEWPORT);
    let ids: Vec<&EntryId> = lines.iter().map(|line| &line.id).collect();
    assert_eq!(ids, vec![&id(4.0)]);
}

#[test]
fn deselected_entry_drops_its_line() {
    let mut state = state();
    state.toggle_entry(&id(0.0));
    state.set_card_rect(&id(0.0), ScreenRect::new(1000.0, 300.0, 200.0, 100.0));
    assert_eq!(state.frame_lines(front_camera(), VIEWPORT).len(), 1);

    state.toggle_entry(&id(0.0));
    assert!(state.frame_lines(front_camera(), VIEWPORT).is_empty());
}

#[test]
fn entry_behind_camera_hides_line() {
    let mut state = state();
    state.toggle_entry(&id(0.0));
    state.set_card_rect(&id(0.0), ScreenRect::new(1000.0, 300.0, 200.0, 100.0));
    let camera = CameraView {
        eye: Vec3::new(0.0, 0.0, -5.0),
        target: Vec3::new(0.0, 0.0, -20.0),
        ..front_camera()
    };
    assert!(project_to_screen(Vec3::ZERO, &camera, &VIEWPORT).is_none());

    let lines = state.frame_lines(camera, VIEWPORT);
    assert!(!lines[0].state.visible);
}

#[test]
fn non_finite_camera_hides_line_without_churn() {
    let mut state = state();
    state.toggle_entry(&id(0.0));
    state.set_card_rect(&id(0.0), ScreenRect::new(1000.0, 300.0, 200.0, 100.0));
    let shown = state.frame_lines(front_camera(), VIEWPORT)[0].state;

    let mut broken = front_camera();
    broken.eye.x = f32::NAN;
    let first = state.frame_lines(broken, VIEWPORT)[0].clone();
    assert!(!first.state.visible);
    assert!(first.changed);
    assert_eq!(first.state.origin, shown.origin);
    assert!(first.state.length.is_finite());

    let second = state.frame_lines(broken, VIEWPORT)[0].clone();
    assert!(!second.state.visible);
    assert!(!second.changed);
}

#[test]
fn non_finite_camera_is_not_recorded_for_fits() {
    let mut state = state();
    assert!(state.observe_camera(front_camera(), VIEWPORT));

    let mut broken = front_camera();
    broken.fov_y_degrees = f32::INFINITY;
    assert!(!state.observe_camera(broken, VIEWPORT));
    state.frame_lines(broken, VIEWPORT);
    assert_eq!(*state.camera(), front_camera());

    let command = state.home().unwrap();
    assert!(command.eye.is_finite());
    assert!(command.target.is_finite());
}
