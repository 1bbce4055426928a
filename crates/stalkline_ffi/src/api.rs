//! FFI use-case API for the Flutter viewer shell.
//!
//! # Responsibility
//! - Expose the view operations to Dart via FRB as sync calls.
//! - Own the single process-wide view session.
//! - Flatten core types into plain DTOs the bridge can mirror.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Calls made without an open session fail softly: envelopes carry
//!   `ok = false`, collection/option results come back empty.
//! - Entry ids cross the boundary in their `<category>@<y>` text form.

use log::warn;
use stalkline_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CameraCommand, CameraView, CategoryKey, Dataset, EntryId, LineUpdate, ScreenRect, Transition,
    ViewConfig, ViewState, Viewport,
};
use std::sync::{Mutex, OnceLock, PoisonError};

static SESSION: OnceLock<Mutex<Option<ViewState>>> = OnceLock::new();

const NO_SESSION: &str = "no open session; call open_session first";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result of opening a view session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub ok: bool,
    pub message: String,
    /// Number of loaded entries across all categories.
    pub entry_count: u32,
    /// Configured category keys in display order.
    pub categories: Vec<String>,
}

impl SessionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            entry_count: 0,
            categories: Vec::new(),
        }
    }
}

/// Generic action envelope for view commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
    /// Flag value after a toggle (selected, enabled, shown); `None` otherwise.
    pub state: Option<bool>,
    /// Selection size after the command.
    pub selection_count: u32,
}

impl ActionResponse {
    fn success(message: impl Into<String>, state: Option<bool>, view: &ViewState) -> Self {
        Self {
            ok: true,
            message: message.into(),
            state,
            selection_count: count(view.selection().len()),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            state: None,
            selection_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3Dto {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Camera pose reported by the host every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDto {
    pub eye: Vec3Dto,
    pub target: Vec3Dto,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportDto {
    pub width: f32,
    pub height: f32,
}

/// Camera move the host should perform next.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraCommandDto {
    /// `home|focus|preset`.
    pub kind: String,
    pub eye: Vec3Dto,
    pub target: Vec3Dto,
    /// Smooth transition length; `None` means jump.
    pub transition_ms: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryDto {
    pub id: String,
    pub position: Vec3Dto,
    pub color: String,
    pub selected: bool,
    pub label_visible: bool,
    pub scale_target: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StalkDto {
    pub key: String,
    pub x: f32,
    pub color: String,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDto {
    pub id: String,
    pub category: String,
    pub display_name: String,
    pub color: String,
    pub date: String,
    pub event: String,
    pub fact: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleDto {
    pub key: String,
    pub display_name: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeDto {
    pub lo: f64,
    pub hi: f64,
    pub min: f64,
    pub max: f64,
}

/// Everything the host needs to redraw after a state change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    pub ok: bool,
    pub message: String,
    pub entries: Vec<EntryDto>,
    pub stalks: Vec<StalkDto>,
    pub cards: Vec<CardDto>,
    pub titles: Vec<TitleDto>,
    pub range: RangeDto,
    pub show_all_labels: bool,
    pub show_title: bool,
}

/// Connector line for one selected entry, in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDto {
    pub id: String,
    pub origin_x: f32,
    pub origin_y: f32,
    pub length: f32,
    /// Rotation in radians.
    pub angle: f32,
    pub visible: bool,
    /// Differs from the previous frame.
    pub changed: bool,
}

/// Loads timeline data (and optional view config) into a fresh session.
///
/// # FFI contract
/// - Replaces any previous session; selection and filters start over.
/// - `config_json = None` uses the built-in defaults.
/// - Never panics; parse and validation errors come back in `message`.
#[flutter_rust_bridge::frb(sync)]
pub fn open_session(data_json: String, config_json: Option<String>) -> SessionResponse {
    let config = match config_json.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => match ViewConfig::from_json_str(raw) {
            Ok(config) => config,
            Err(err) => return SessionResponse::failure(format!("invalid view config: {err}")),
        },
        _ => ViewConfig::default(),
    };
    let dataset = match Dataset::from_json_str(&data_json) {
        Ok(dataset) => dataset,
        Err(err) => return SessionResponse::failure(format!("invalid timeline data: {err}")),
    };
    let view = match ViewState::new(config, dataset) {
        Ok(view) => view,
        Err(err) => return SessionResponse::failure(format!("invalid view config: {err}")),
    };

    let response = SessionResponse {
        ok: true,
        message: "Session opened.".to_string(),
        entry_count: count(view.dataset().len()),
        categories: view
            .config()
            .categories
            .iter()
            .map(|category| category.key.to_string())
            .collect(),
    };
    *lock_session() = Some(view);
    response
}

/// Drops the current session.
#[flutter_rust_bridge::frb(sync)]
pub fn close_session() -> ActionResponse {
    match lock_session().take() {
        Some(_) => ActionResponse {
            ok: true,
            message: "Session closed.".to_string(),
            state: None,
            selection_count: 0,
        },
        None => ActionResponse::failure(NO_SESSION),
    }
}

/// Toggles selection of one entry by id text (`<category>@<y>`).
///
/// `state` is whether the entry is selected afterwards.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_entry(id: String) -> ActionResponse {
    let id = match id.parse::<EntryId>() {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(format!("toggle_entry failed: {err}")),
    };
    act("toggle_entry", |view| {
        let selected = view.toggle_entry(&id);
        ActionResponse::success("Selection updated.", Some(selected), view)
    })
}

/// Toggles one category; `state` is the new enable flag.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_category(key: String) -> ActionResponse {
    let key = CategoryKey::new(key.trim());
    act("toggle_category", |view| match view.toggle_category(&key) {
        Some(enabled) => ActionResponse::success("Category updated.", Some(enabled), view),
        None => ActionResponse::failure(format!("unknown category `{key}`")),
    })
}

/// Moves the lower range endpoint; non-finite values are rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn set_range_lo(value: f64) -> ActionResponse {
    if !value.is_finite() {
        return ActionResponse::failure(format!("set_range_lo failed: `{value}` is not finite"));
    }
    act("set_range_lo", |view| {
        view.set_range_lo(value);
        ActionResponse::success("Range updated.", None, view)
    })
}

/// Moves the upper range endpoint; non-finite values are rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn set_range_hi(value: f64) -> ActionResponse {
    if !value.is_finite() {
        return ActionResponse::failure(format!("set_range_hi failed: `{value}` is not finite"));
    }
    act("set_range_hi", |view| {
        view.set_range_hi(value);
        ActionResponse::success("Range updated.", None, view)
    })
}

/// Flips "show all labels"; `state` is the new value.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_labels() -> ActionResponse {
    act("toggle_labels", |view| {
        let shown = view.toggle_labels();
        ActionResponse::success("Labels updated.", Some(shown), view)
    })
}

/// Flips the title strip; `state` is the new value.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_title() -> ActionResponse {
    act("toggle_title", |view| {
        let shown = view.toggle_title();
        ActionResponse::success("Title updated.", Some(shown), view)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn clear_selection() -> ActionResponse {
    act("clear_selection", |view| {
        view.clear_selection();
        ActionResponse::success("Selection cleared.", None, view)
    })
}

/// "Reset all": clears the selection and queues the preset camera pose.
#[flutter_rust_bridge::frb(sync)]
pub fn reset_view() -> ActionResponse {
    act("reset_view", |view| {
        view.reset();
        ActionResponse::success("View reset.", None, view)
    })
}

/// Queues a fit over every visible entry; `state` is whether a command was queued.
#[flutter_rust_bridge::frb(sync)]
pub fn home_camera() -> ActionResponse {
    act("home_camera", |view| {
        let queued = view.home().is_some();
        let message = if queued {
            "Camera command queued."
        } else {
            "Nothing visible to frame."
        };
        ActionResponse::success(message, Some(queued), view)
    })
}

/// Queues a focus on the selection; `state` is whether a command was queued.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_selection() -> ActionResponse {
    act("focus_selection", |view| {
        let queued = view.focus_selection().is_some();
        let message = if queued {
            "Camera command queued."
        } else {
            "Selection is empty."
        };
        ActionResponse::success(message, Some(queued), view)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn reset_camera() -> ActionResponse {
    act("reset_camera", |view| {
        view.reset_camera();
        ActionResponse::success("Camera command queued.", Some(true), view)
    })
}

/// Hands the latest queued camera command to the host, at most once.
#[flutter_rust_bridge::frb(sync)]
pub fn take_camera_command() -> Option<CameraCommandDto> {
    with_view(|view| view.take_camera_command())
        .ok()
        .flatten()
        .map(to_camera_command_dto)
}

/// Records where the host laid out a selected entry's card.
///
/// `state` is whether the rect was stored (only selected entries keep one).
#[flutter_rust_bridge::frb(sync)]
pub fn report_card_rect(
    id: String,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
) -> ActionResponse {
    let id = match id.parse::<EntryId>() {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(format!("report_card_rect failed: {err}")),
    };
    act("report_card_rect", |view| {
        let stored = view.set_card_rect(&id, ScreenRect::new(left, top, width, height));
        ActionResponse::success("Card rect recorded.", Some(stored), view)
    })
}

/// Forgets a card rect after the host unmounts the card.
#[flutter_rust_bridge::frb(sync)]
pub fn forget_card(id: String) -> ActionResponse {
    let id = match id.parse::<EntryId>() {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(format!("forget_card failed: {err}")),
    };
    act("forget_card", |view| {
        let removed = view.remove_card_rect(&id).is_some();
        ActionResponse::success("Card rect removed.", Some(removed), view)
    })
}

/// Snapshot of every render descriptor.
#[flutter_rust_bridge::frb(sync)]
pub fn scene() -> SceneSnapshot {
    match with_view(|view| to_scene_snapshot(view)) {
        Ok(snapshot) => snapshot,
        Err(message) => SceneSnapshot {
            ok: false,
            message,
            ..SceneSnapshot::default()
        },
    }
}

/// Per-frame connector lines; also records the camera for later fits.
///
/// # FFI contract
/// - Called once per rendered frame.
/// - Empty without an open session.
#[flutter_rust_bridge::frb(sync)]
pub fn frame_lines(camera: CameraDto, viewport: ViewportDto) -> Vec<LineDto> {
    let camera = to_camera_view(&camera);
    let viewport = Viewport::new(viewport.width, viewport.height);
    with_view(|view| view.frame_lines(camera, viewport))
        .map(|lines| lines.into_iter().map(to_line_dto).collect())
        .unwrap_or_default()
}

fn lock_session() -> std::sync::MutexGuard<'static, Option<ViewState>> {
    SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn with_view<T>(f: impl FnOnce(&mut ViewState) -> T) -> Result<T, String> {
    let mut guard = lock_session();
    let view = guard.as_mut().ok_or_else(|| NO_SESSION.to_string())?;
    Ok(f(view))
}

fn act(op: &str, f: impl FnOnce(&mut ViewState) -> ActionResponse) -> ActionResponse {
    with_view(f).unwrap_or_else(|message| {
        warn!("event=ffi_call module=ffi status=error op={op} reason=no_session");
        ActionResponse::failure(format!("{op} failed: {message}"))
    })
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

fn vec3_dto(value: [f32; 3]) -> Vec3Dto {
    Vec3Dto {
        x: value[0],
        y: value[1],
        z: value[2],
    }
}

fn to_camera_view(camera: &CameraDto) -> CameraView {
    CameraView {
        eye: [camera.eye.x, camera.eye.y, camera.eye.z].into(),
        target: [camera.target.x, camera.target.y, camera.target.z].into(),
        fov_y_degrees: camera.fov_y_degrees,
        near: camera.near,
        far: camera.far,
        ..CameraView::from_preset(&Default::default())
    }
}

fn to_camera_command_dto(command: CameraCommand) -> CameraCommandDto {
    CameraCommandDto {
        kind: command.kind.as_str().to_string(),
        eye: vec3_dto(command.eye.to_array()),
        target: vec3_dto(command.target.to_array()),
        transition_ms: match command.transition {
            Transition::Instant => None,
            Transition::Smooth { duration_ms } => Some(duration_ms),
        },
    }
}

fn to_line_dto(update: LineUpdate) -> LineDto {
    LineDto {
        id: update.id.to_string(),
        origin_x: update.state.origin.x,
        origin_y: update.state.origin.y,
        length: update.state.length,
        angle: update.state.angle,
        visible: update.state.visible,
        changed: update.changed,
    }
}

fn to_scene_snapshot(view: &ViewState) -> SceneSnapshot {
    let range = view.range_descriptor();
    SceneSnapshot {
        ok: true,
        message: String::new(),
        entries: view
            .entry_descriptors()
            .into_iter()
            .map(|entry| EntryDto {
                id: entry.id.to_string(),
                position: vec3_dto(entry.position),
                color: entry.color,
                selected: entry.selected,
                label_visible: entry.label_visible,
                scale_target: entry.scale_target,
            })
            .collect(),
        stalks: view
            .stalk_descriptors()
            .into_iter()
            .map(|stalk| StalkDto {
                key: stalk.key.to_string(),
                x: stalk.x,
                color: stalk.color,
                height: stalk.height,
            })
            .collect(),
        cards: view
            .card_feed()
            .into_iter()
            .map(|card| CardDto {
                id: card.id.to_string(),
                category: card.category.to_string(),
                display_name: card.display_name,
                color: card.color,
                date: card.date,
                event: card.event,
                fact: card.fact,
            })
            .collect(),
        titles: view
            .title_strip()
            .into_iter()
            .map(|title| TitleDto {
                key: title.key.to_string(),
                display_name: title.display_name,
                color: title.color,
            })
            .collect(),
        range: RangeDto {
            lo: range.lo,
            hi: range.hi,
            min: range.min,
            max: range.max,
        },
        show_all_labels: view.show_all_labels(),
        show_title: view.show_title(),
    }
}
