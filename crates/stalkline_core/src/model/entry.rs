//! Timeline entry model.
//!
//! # Responsibility
//! - Define the immutable record for one fruit on a stalk.
//! - Derive the stable `EntryId` used across selection, cards and lines.
//!
//! # Invariants
//! - `EntryId` equality and hashing use the normalized bit pattern of `y`,
//!   so `-0.0` and `0.0` name the same entry.
//! - Text form is `<category>@<y>` and round-trips through `FromStr`.

use crate::model::category::{is_valid_category_key, CategoryKey};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Derived identity of one entry: its category plus its timeline position.
#[derive(Debug, Clone)]
pub struct EntryId {
    category: CategoryKey,
    y: f64,
}

impl EntryId {
    pub fn new(category: CategoryKey, y: f64) -> Self {
        Self {
            category,
            y: normalize_y(y),
        }
    }

    pub fn category(&self) -> &CategoryKey {
        &self.category
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl PartialEq for EntryId {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for EntryId {}

impl Hash for EntryId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.category.hash(state);
        self.y.to_bits().hash(state);
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.category, self.y)
    }
}

/// Error returned when entry id text is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryIdParseError {
    MissingSeparator(String),
    InvalidCategory(String),
    InvalidY(String),
}

impl Display for EntryIdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSeparator(raw) => {
                write!(f, "entry id `{raw}` must look like `<category>@<y>`")
            }
            Self::InvalidCategory(raw) => write!(f, "entry id has invalid category `{raw}`"),
            Self::InvalidY(raw) => write!(f, "entry id has invalid y `{raw}`"),
        }
    }
}

impl Error for EntryIdParseError {}

impl FromStr for EntryId {
    type Err = EntryIdParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (category, y) = trimmed
            .rsplit_once('@')
            .ok_or_else(|| EntryIdParseError::MissingSeparator(trimmed.to_string()))?;
        if !is_valid_category_key(category) {
            return Err(EntryIdParseError::InvalidCategory(category.to_string()));
        }
        let y = y
            .parse::<f64>()
            .ok()
            .filter(|y| y.is_finite())
            .ok_or_else(|| EntryIdParseError::InvalidY(y.to_string()))?;
        Ok(Self::new(CategoryKey::new(category), y))
    }
}

/// One fruit on a stalk, as loaded from the data source.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub category: CategoryKey,
    /// Timeline position; doubles as world-space height.
    pub y: f64,
    pub date: String,
    pub event: String,
    pub fact: String,
}

impl Entry {
    pub fn id(&self) -> EntryId {
        EntryId::new(self.category.clone(), self.y)
    }

    /// Stalk height in world units.
    ///
    /// Narrowed to `f32`; values above 2^24 lose integer precision, so
    /// distinct `y` may share one world position.
    pub fn world_y(&self) -> f32 {
        self.y as f32
    }
}

fn normalize_y(y: f64) -> f64 {
    // -0.0 == 0.0 but their bits differ.
    if y == 0.0 {
        0.0
    } else {
        y
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryId, EntryIdParseError};
    use crate::model::category::CategoryKey;
    use std::collections::HashSet;

    #[test]
    fn display_and_parse_round_trip() {
        let id = EntryId::new(CategoryKey::new("park"), 20.5);
        assert_eq!(id.to_string(), "park@20.5");
        assert_eq!("park@20.5".parse::<EntryId>().expect("parse id"), id);

        let whole = EntryId::new(CategoryKey::new("lee"), 10.0);
        assert_eq!(whole.to_string(), "lee@10");
    }

    #[test]
    fn negative_zero_names_the_same_entry() {
        let a = EntryId::new(CategoryKey::new("main"), 0.0);
        let b = EntryId::new(CategoryKey::new("main"), -0.0);
        assert_eq!(a, b);
        assert_eq!(b.to_string(), "main@0");

        let set: HashSet<EntryId> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        assert!(matches!(
            "lee10".parse::<EntryId>(),
            Err(EntryIdParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            "Lee@10".parse::<EntryId>(),
            Err(EntryIdParseError::InvalidCategory(_))
        ));
        assert!(matches!(
            "lee@ten".parse::<EntryId>(),
            Err(EntryIdParseError::InvalidY(_))
        ));
        assert!(matches!(
            "lee@NaN".parse::<EntryId>(),
            Err(EntryIdParseError::InvalidY(_))
        ));
    }
}
