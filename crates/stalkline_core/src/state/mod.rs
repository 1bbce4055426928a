//! Session-local view state.
//!
//! # Responsibility
//! - Own selection, visibility, time range and card side-table state.
//! - Funnel every mutation through `ViewState` operations.
//!
//! # Invariants
//! - selected ⟹ visible, enforced eagerly whenever visibility narrows.
//! - Nothing here is persisted.

pub mod cards;
pub mod selection;
pub mod view_state;
pub mod visibility;
