//! View configuration.
//!
//! # Responsibility
//! - Carry the policy switches that distinguish viewer variants
//!   (selection order, focus policy, label mode).
//! - Carry category layout, camera preset and framing parameters.
//! - Validate everything once at load time.
//!
//! # Invariants
//! - A `ViewConfig` held by `ViewState` has passed `validate()`.
//! - Every field has a default, so partial JSON documents are accepted.

use crate::model::category::{
    default_categories, is_valid_category_key, is_valid_hex_color, Category,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// How the materialized selection list is ordered for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// Descending `y`, most recent first. Ties keep insertion order.
    #[default]
    NewestFirst,
    /// Raw insertion order.
    Insertion,
}

/// What "focus on selection" does with the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusPolicy {
    /// Fit the union bounding box of every selected entry.
    #[default]
    FitSelection,
    /// Jump to a fixed offset from the most recently selected entry.
    SnapToLatest,
}

/// When entry labels are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    Off,
    SelectedOnly,
    /// Selected entries always; all entries while "show all labels" is on.
    #[default]
    Toggleable,
}

/// Camera pose used at startup and by "reset camera".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraPreset {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraPreset {
    fn default() -> Self {
        Self {
            eye: [-8.0, 8.0, 26.0],
            target: [0.0, 0.0, 0.0],
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Screen-space padding in logical pixels kept clear when framing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Padding {
    fn default() -> Self {
        // The card panel is 400px wide on the right edge.
        Self {
            left: 40.0,
            right: 440.0,
            top: 40.0,
            bottom: 40.0,
        }
    }
}

/// Camera framing parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    pub padding: Padding,
    /// Orbit distance limits; fitted distances are clamped into this range.
    pub min_distance: f32,
    pub max_distance: f32,
    /// Lower bound for the fitted bounding-sphere radius (single-point fits).
    pub min_fit_radius: f32,
    /// Duration of smooth transitions requested by fit commands.
    pub transition_ms: u32,
    /// Eye offset from the target entry under `FocusPolicy::SnapToLatest`.
    pub snap_offset: [f32; 3],
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            min_distance: 5.0,
            max_distance: 60.0,
            min_fit_radius: 1.0,
            transition_ms: 600,
            snap_offset: [0.0, 2.0, 12.0],
        }
    }
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Stalks in display order.
    pub categories: Vec<Category>,
    /// Rendered stalk length in world units.
    pub stalk_height: f32,
    pub selection_order: SelectionOrder,
    pub focus_policy: FocusPolicy,
    pub label_mode: LabelMode,
    pub show_labels_initially: bool,
    pub show_title_initially: bool,
    pub camera: CameraPreset,
    pub framing: FramingConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            stalk_height: 150.0,
            selection_order: SelectionOrder::default(),
            focus_policy: FocusPolicy::default(),
            label_mode: LabelMode::default(),
            show_labels_initially: false,
            show_title_initially: true,
            camera: CameraPreset::default(),
            framing: FramingConfig::default(),
        }
    }
}

/// Configuration load/validation error.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    EmptyCategories,
    InvalidCategoryKey(String),
    DuplicateCategoryKey(String),
    InvalidColor { key: String, color: String },
    InvalidStalkOffset(String),
    InvalidStalkHeight(f32),
    InvalidPadding(&'static str),
    InvalidDistanceLimits { min: f32, max: f32 },
    InvalidFitRadius(f32),
    InvalidFieldOfView(f32),
    InvalidClipPlanes { near: f32, far: f32 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config read failed: {err}"),
            Self::Json(err) => write!(f, "config parse failed: {err}"),
            Self::EmptyCategories => write!(f, "config must declare at least one category"),
            Self::InvalidCategoryKey(key) => write!(f, "invalid category key `{key}`"),
            Self::DuplicateCategoryKey(key) => write!(f, "duplicate category key `{key}`"),
            Self::InvalidColor { key, color } => {
                write!(f, "category `{key}` has invalid color `{color}`; expected #rrggbb")
            }
            Self::InvalidStalkOffset(key) => {
                write!(f, "category `{key}` has a non-finite x offset")
            }
            Self::InvalidStalkHeight(value) => {
                write!(f, "stalk_height must be positive, got {value}")
            }
            Self::InvalidPadding(side) => {
                write!(f, "padding.{side} must be a finite value >= 0")
            }
            Self::InvalidDistanceLimits { min, max } => write!(
                f,
                "distance limits must satisfy 0 < min_distance <= max_distance, got {min}..{max}"
            ),
            Self::InvalidFitRadius(value) => {
                write!(f, "min_fit_radius must be positive, got {value}")
            }
            Self::InvalidFieldOfView(value) => {
                write!(f, "fov_y_degrees must be in (0, 180), got {value}")
            }
            Self::InvalidClipPlanes { near, far } => {
                write!(f, "clip planes must satisfy 0 < near < far, got {near}..{far}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl ViewConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks category layout, camera and framing invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::EmptyCategories);
        }

        let mut seen = BTreeSet::new();
        for category in &self.categories {
            let key = category.key.as_str();
            if !is_valid_category_key(key) {
                return Err(ConfigError::InvalidCategoryKey(key.to_string()));
            }
            if !seen.insert(key) {
                return Err(ConfigError::DuplicateCategoryKey(key.to_string()));
            }
            if !is_valid_hex_color(&category.color) {
                return Err(ConfigError::InvalidColor {
                    key: key.to_string(),
                    color: category.color.clone(),
                });
            }
            if !category.x.is_finite() {
                return Err(ConfigError::InvalidStalkOffset(key.to_string()));
            }
        }

        if !(self.stalk_height.is_finite() && self.stalk_height > 0.0) {
            return Err(ConfigError::InvalidStalkHeight(self.stalk_height));
        }

        let padding = &self.framing.padding;
        for (side, value) in [
            ("left", padding.left),
            ("right", padding.right),
            ("top", padding.top),
            ("bottom", padding.bottom),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidPadding(side));
            }
        }

        let (min, max) = (self.framing.min_distance, self.framing.max_distance);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidDistanceLimits { min, max });
        }
        let radius = self.framing.min_fit_radius;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidFitRadius(radius));
        }

        let fov = self.camera.fov_y_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::InvalidFieldOfView(fov));
        }
        let (near, far) = (self.camera.near, self.camera.far);
        if !(near > 0.0 && far.is_finite() && near < far) {
            return Err(ConfigError::InvalidClipPlanes { near, far });
        }

        Ok(())
    }

    /// Looks up one category by key.
    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.key.as_str() == key)
    }
}
