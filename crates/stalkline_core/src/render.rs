//! Render descriptors handed to the host each frame.
//!
//! # Responsibility
//! - Describe what to draw as plain target values (no interpolation state).
//!
//! # Invariants
//! - Descriptors are recomputed from `ViewState`; they never feed back into it.

use crate::config::LabelMode;
use crate::model::category::CategoryKey;
use crate::model::entry::EntryId;

/// Scale target of a selected fruit; the host lerps towards it.
pub const SELECTED_SCALE: f32 = 1.6;
/// Scale target of an unselected fruit.
pub const RESTING_SCALE: f32 = 1.0;

/// One visible fruit.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDescriptor {
    pub id: EntryId,
    pub position: [f32; 3],
    pub color: String,
    pub selected: bool,
    pub label_visible: bool,
    pub scale_target: f32,
}

/// One enabled stalk.
#[derive(Debug, Clone, PartialEq)]
pub struct StalkDescriptor {
    pub key: CategoryKey,
    pub x: f32,
    pub color: String,
    pub height: f32,
}

/// One detail card in the side panel, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDescriptor {
    pub id: EntryId,
    pub category: CategoryKey,
    pub display_name: String,
    pub color: String,
    pub date: String,
    pub event: String,
    pub fact: String,
}

/// One heading in the title strip.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleDescriptor {
    pub key: CategoryKey,
    pub display_name: String,
    pub color: String,
}

/// Current and limiting values for the two range sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeDescriptor {
    pub lo: f64,
    pub hi: f64,
    pub min: f64,
    pub max: f64,
}

pub fn label_visible(mode: LabelMode, show_all: bool, selected: bool) -> bool {
    match mode {
        LabelMode::Off => false,
        LabelMode::SelectedOnly => selected,
        LabelMode::Toggleable => show_all || selected,
    }
}

pub fn scale_target(selected: bool) -> f32 {
    if selected {
        SELECTED_SCALE
    } else {
        RESTING_SCALE
    }
}
