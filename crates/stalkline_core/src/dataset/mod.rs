//! Static timeline data source.
//!
//! # Responsibility
//! - Load the `{ category: [ { y, date, event, fact } ] }` document once.
//! - Enforce per-category identity invariants before any view state exists.
//! - Answer read-only lookups by category and by `EntryId`.
//!
//! # Invariants
//! - A `Dataset` is never mutated after construction.
//! - `y` is finite and unique within each category; violations are load
//!   errors rather than silently merged entries.
//! - A category absent from the document reads as an empty slice.
//! - Entries whose `y` differ but whose `f32` world heights coincide are
//!   kept and counted in `collapsed_positions()`.

use crate::model::category::CategoryKey;
use crate::model::entry::{Entry, EntryId};
use log::{info, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Data source load/validation error.
#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Json(serde_json::Error),
    DuplicateY { category: String, y: f64 },
    NonFiniteY { category: String },
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "dataset read failed: {err}"),
            Self::Json(err) => write!(f, "dataset parse failed: {err}"),
            Self::DuplicateY { category, y } => {
                write!(f, "category `{category}` has more than one entry at y={y}")
            }
            Self::NonFiniteY { category } => {
                write!(f, "category `{category}` has an entry with non-finite y")
            }
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Wire shape of one entry in the source document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryRecord {
    pub y: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub fact: String,
}

impl EntryRecord {
    pub fn new(y: f64, date: &str, event: &str, fact: &str) -> Self {
        Self {
            y,
            date: date.to_string(),
            event: event.to_string(),
            fact: fact.to_string(),
        }
    }
}

/// Immutable, validated timeline data.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    by_category: BTreeMap<CategoryKey, Vec<Entry>>,
    index: HashMap<EntryId, usize>,
    collapsed_positions: usize,
}

impl Dataset {
    /// Parses and validates a JSON data document.
    pub fn from_json_str(raw: &str) -> DatasetResult<Self> {
        let records: BTreeMap<String, Vec<EntryRecord>> = serde_json::from_str(raw)?;
        Self::from_records(records)
    }

    /// Reads, parses and validates a JSON data file.
    pub fn from_path(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Builds a dataset from already-decoded records.
    ///
    /// Entry order within a category follows the input order.
    pub fn from_records<K: Into<String>>(
        records: impl IntoIterator<Item = (K, Vec<EntryRecord>)>,
    ) -> DatasetResult<Self> {
        let mut by_category = BTreeMap::new();
        let mut index = HashMap::new();
        let mut collapsed_positions = 0;

        for (key, items) in records {
            let key = CategoryKey::new(key);
            let mut entries = Vec::with_capacity(items.len());
            let mut heights = HashSet::with_capacity(items.len());
            let mut collapsed = 0;
            for record in items {
                if !record.y.is_finite() {
                    return Err(DatasetError::NonFiniteY {
                        category: key.to_string(),
                    });
                }
                let entry = Entry {
                    category: key.clone(),
                    y: record.y,
                    date: record.date,
                    event: record.event,
                    fact: record.fact,
                };
                if index.insert(entry.id(), entries.len()).is_some() {
                    return Err(DatasetError::DuplicateY {
                        category: key.to_string(),
                        y: record.y,
                    });
                }
                if !heights.insert(entry.world_y().to_bits()) {
                    collapsed += 1;
                }
                entries.push(entry);
            }
            if collapsed > 0 {
                warn!(
                    "event=dataset_load module=dataset status=degraded reason=collapsed_positions category={} count={}",
                    key, collapsed
                );
            }
            collapsed_positions += collapsed;
            by_category.insert(key, entries);
        }

        let dataset = Self {
            by_category,
            index,
            collapsed_positions,
        };
        info!(
            "event=dataset_load module=dataset status=ok categories={} entries={}",
            dataset.by_category.len(),
            dataset.len()
        );
        Ok(dataset)
    }

    /// Entries of one category in source order; empty when absent.
    pub fn entries(&self, key: &CategoryKey) -> &[Entry] {
        self.by_category
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Looks up one entry by derived id.
    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        let position = *self.index.get(id)?;
        self.by_category.get(id.category())?.get(position)
    }

    /// Category keys present in the source document.
    pub fn category_keys(&self) -> impl Iterator<Item = &CategoryKey> {
        self.by_category.keys()
    }

    /// Min/max `y` over the given categories, or `None` when they hold no entries.
    pub fn y_bounds<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a CategoryKey>,
    ) -> Option<(f64, f64)> {
        keys.into_iter()
            .flat_map(|key| self.entries(key))
            .fold(None, |bounds, entry| match bounds {
                None => Some((entry.y, entry.y)),
                Some((lo, hi)) => Some((f64::min(lo, entry.y), f64::max(hi, entry.y))),
            })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Entries that share their world height with an earlier entry of the
    /// same category after narrowing `y` to `f32`.
    pub fn collapsed_positions(&self) -> usize {
        self.collapsed_positions
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
