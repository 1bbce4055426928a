//! Screen-space projection of selected entries.
//!
//! # Responsibility
//! - Describe the active camera and viewport supplied by the host each frame.
//! - Compute the connector line from a projected entry to its detail card.
//!
//! # Invariants
//! - Pixel coordinates have their origin at the top-left of the viewport,
//!   with y growing downwards.
//! - Line geometry is recomputed every frame; only the last state per entry
//!   is retained.

pub mod camera;
pub mod projector;

pub use camera::{project_to_screen, CameraView, Viewport};
pub use projector::{connector, LineState, LineTracker, LineUpdate, ScreenRect};
