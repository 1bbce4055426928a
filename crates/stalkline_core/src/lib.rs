//! Core view logic for the Stalkline timeline viewer.
//! The renderer and UI host stay thin; selection, filtering, projection
//! and camera framing rules live here.

pub mod config;
pub mod dataset;
pub mod framing;
pub mod logging;
pub mod model;
pub mod projection;
pub mod render;
pub mod state;

pub use config::{
    CameraPreset, ConfigError, FocusPolicy, FramingConfig, LabelMode, Padding, SelectionOrder,
    ViewConfig,
};
pub use dataset::{Dataset, DatasetError, DatasetResult, EntryRecord};
pub use framing::{Bounds, CameraCommand, CameraCommandKind, CameraFramer, Transition};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryKey};
pub use model::entry::{Entry, EntryId, EntryIdParseError};
pub use projection::{project_to_screen, CameraView, LineState, LineUpdate, ScreenRect, Viewport};
pub use state::view_state::ViewState;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
