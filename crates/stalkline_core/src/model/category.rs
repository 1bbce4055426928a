//! Category (stalk) model.
//!
//! # Responsibility
//! - Name one stalk and carry its fixed spatial offset and display color.
//!
//! # Invariants
//! - Keys are lowercase ASCII identifiers (`[a-z][a-z0-9_]*`).
//! - Colors are `#rrggbb` hex strings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt::{Display, Formatter};

static CATEGORY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid category key regex"));
static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color regex"));

/// Stable key naming one category, e.g. `lee`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Wraps a key without validation.
    ///
    /// Config and id parsing call [`is_valid_category_key`] before relying on it.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for CategoryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One stalk in the scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    /// Key used in the data source and in entry ids.
    pub key: CategoryKey,
    /// Human-readable label for the title strip and cards.
    pub display_name: String,
    /// World-space x offset of the stalk.
    pub x: f32,
    /// `#rrggbb` display color.
    pub color: String,
}

impl Category {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        x: f32,
        color: impl Into<String>,
    ) -> Self {
        Self {
            key: CategoryKey::new(key),
            display_name: display_name.into(),
            x,
            color: color.into(),
        }
    }
}

/// Returns whether `value` is an acceptable category key.
pub fn is_valid_category_key(value: &str) -> bool {
    CATEGORY_KEY_RE.is_match(value)
}

/// Returns whether `value` is a `#rrggbb` color.
pub fn is_valid_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

/// Built-in stalk layout used when no config is supplied.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("lee", "이언주", -10.0, "#ffcc00"),
        Category::new("main", "핵심 이슈", -6.0, "#ffffff"),
        Category::new("park", "박주민", -2.0, "#00ffff"),
    ]
}
