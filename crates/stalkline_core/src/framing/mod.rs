//! Camera framing commands.
//!
//! # Responsibility
//! - Compute bounding volumes over entry positions.
//! - Turn "home", "focus" and "reset" requests into camera commands.
//! - Hold the single pending command the host should apply next.
//!
//! # Invariants
//! - Framing an empty set produces no command.
//! - A newer command always supersedes a pending one (last command wins).
//! - The host owns interpolation; commands carry only end poses.

pub mod bounds;
pub mod framer;

pub use bounds::Bounds;
pub use framer::{CameraCommand, CameraCommandKind, CameraDirector, CameraFramer, Transition};
