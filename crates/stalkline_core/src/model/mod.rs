//! Timeline domain model.
//!
//! # Responsibility
//! - Define the immutable records loaded from the data source.
//! - Define the stable identity used by selection, cards and lines.
//!
//! # Invariants
//! - Entry identity is derived from `(category, y)` and never stored.
//! - `y` is unique and finite within one category.

pub mod category;
pub mod entry;
