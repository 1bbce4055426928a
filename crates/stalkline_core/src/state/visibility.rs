//! Category visibility flags and the timeline range filter.
//!
//! # Responsibility
//! - Hold one independent on/off flag per configured category.
//! - Hold the closed `[lo, hi]` window over entry `y`.
//!
//! # Invariants
//! - `min <= lo <= hi <= max` after every mutation.
//! - Both range endpoints are inclusive.

use crate::model::category::CategoryKey;

/// Per-category visibility flags in configured order.
#[derive(Debug, Clone, Default)]
pub struct CategoryVisibility {
    flags: Vec<(CategoryKey, bool)>,
}

impl CategoryVisibility {
    /// Every given category starts enabled.
    pub fn all_enabled<'a>(keys: impl IntoIterator<Item = &'a CategoryKey>) -> Self {
        Self {
            flags: keys.into_iter().map(|key| (key.clone(), true)).collect(),
        }
    }

    /// Unknown keys read as disabled.
    pub fn is_enabled(&self, key: &CategoryKey) -> bool {
        self.flags
            .iter()
            .any(|(candidate, enabled)| candidate == key && *enabled)
    }

    /// Sets one flag; returns the previous value, or `None` for an unknown key.
    pub fn set(&mut self, key: &CategoryKey, enabled: bool) -> Option<bool> {
        let (_, flag) = self.flags.iter_mut().find(|(candidate, _)| candidate == key)?;
        let previous = *flag;
        *flag = enabled;
        Some(previous)
    }

    /// Enabled keys in configured order.
    pub fn enabled_keys(&self) -> impl Iterator<Item = &CategoryKey> {
        self.flags
            .iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(key, _)| key)
    }
}

/// Closed timeline window clamped to the data-derived bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    lo: f64,
    hi: f64,
    min: f64,
    max: f64,
}

impl TimeRange {
    /// Full window over `[min, max]`. Arguments are swapped when reversed.
    pub fn new(min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            lo: min,
            hi: max,
            min,
            max,
        }
    }

    /// Window over the bounds of a dataset; `[0, 0]` when it is empty.
    pub fn from_bounds(bounds: Option<(f64, f64)>) -> Self {
        let (min, max) = bounds.unwrap_or((0.0, 0.0));
        Self::new(min, max)
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, y: f64) -> bool {
        self.lo <= y && y <= self.hi
    }

    /// Moves the lower endpoint, pulling `hi` up when crossed.
    ///
    /// Non-finite input is ignored.
    pub fn set_lo(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.lo = value.clamp(self.min, self.max);
        if self.lo > self.hi {
            self.hi = self.lo;
        }
    }

    /// Moves the upper endpoint, pulling `lo` down when crossed.
    ///
    /// Non-finite input is ignored.
    pub fn set_hi(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.hi = value.clamp(self.min, self.max);
        if self.hi < self.lo {
            self.lo = self.hi;
        }
    }

    /// Restores the full data-derived window.
    pub fn reset(&mut self) {
        self.lo = self.min;
        self.hi = self.max;
    }
}
