//! Camera commands and the fit math behind them.
//!
//! # Responsibility
//! - Fit bounds into the padded viewport region, keeping the view direction.
//! - Produce snap and preset poses.
//! - Hold at most one pending command for the host.
//!
//! # Invariants
//! - Fitted distances stay within the configured orbit limits.
//! - Submitting a command replaces the pending one.

use crate::config::{CameraPreset, FramingConfig};
use crate::framing::bounds::Bounds;
use crate::projection::camera::{CameraView, Viewport};
use glam::{Vec2, Vec3};

/// How the host should move to a commanded pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Instant,
    Smooth { duration_ms: u32 },
}

/// Which user action produced a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraCommandKind {
    Home,
    Focus,
    Preset,
}

impl CameraCommandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Focus => "focus",
            Self::Preset => "preset",
        }
    }
}

/// End pose requested from the host camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraCommand {
    pub kind: CameraCommandKind,
    pub eye: Vec3,
    pub target: Vec3,
    pub transition: Transition,
}

/// Holds the one pending camera command.
#[derive(Debug, Clone, Default)]
pub struct CameraDirector {
    pending: Option<CameraCommand>,
}

impl CameraDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending command.
    pub fn submit(&mut self, command: CameraCommand) {
        self.pending = Some(command);
    }

    pub fn pending(&self) -> Option<&CameraCommand> {
        self.pending.as_ref()
    }

    /// Hands the pending command to the host.
    pub fn take_pending(&mut self) -> Option<CameraCommand> {
        self.pending.take()
    }
}

/// Fits camera poses around entry geometry.
#[derive(Debug, Clone)]
pub struct CameraFramer {
    framing: FramingConfig,
    preset: CameraPreset,
}

impl CameraFramer {
    pub fn new(framing: FramingConfig, preset: CameraPreset) -> Self {
        Self { framing, preset }
    }

    /// Fits `bounds` into the padded region of `viewport`, keeping the
    /// current view direction.
    ///
    /// The distance fits the bounding sphere and is clamped to the orbit
    /// limits. The target is then shifted so the box center lands on the
    /// center of the padded region rather than the viewport center.
    pub fn fit(
        &self,
        kind: CameraCommandKind,
        bounds: &Bounds,
        current: &CameraView,
        viewport: &Viewport,
    ) -> CameraCommand {
        let region = self.padded_region(viewport);
        let tan_y = current.half_fov_tan();
        let tan_x = tan_y * viewport.aspect();

        let usable_tan = (tan_x * region.fraction.x).min(tan_y * region.fraction.y);
        let radius = bounds.radius().max(self.framing.min_fit_radius);
        let distance = (radius / usable_tan.atan().sin())
            .clamp(self.framing.min_distance, self.framing.max_distance);

        let (right, up) = current.basis();
        let target = bounds.center()
            - right * (region.center_ndc.x * tan_x * distance)
            - up * (region.center_ndc.y * tan_y * distance);
        let eye = target - current.forward() * distance;

        CameraCommand {
            kind,
            eye,
            target,
            transition: Transition::Smooth {
                duration_ms: self.framing.transition_ms,
            },
        }
    }

    /// Looks at `point` from the configured fixed offset.
    pub fn snap_to(&self, point: Vec3) -> CameraCommand {
        CameraCommand {
            kind: CameraCommandKind::Focus,
            eye: point + Vec3::from_array(self.framing.snap_offset),
            target: point,
            transition: Transition::Instant,
        }
    }

    /// Jumps back to the startup pose.
    pub fn preset(&self) -> CameraCommand {
        CameraCommand {
            kind: CameraCommandKind::Preset,
            eye: Vec3::from_array(self.preset.eye),
            target: Vec3::from_array(self.preset.target),
            transition: Transition::Instant,
        }
    }

    fn padded_region(&self, viewport: &Viewport) -> PaddedRegion {
        if viewport.is_degenerate() {
            return PaddedRegion {
                fraction: Vec2::ONE,
                center_ndc: Vec2::ZERO,
            };
        }
        let padding = &self.framing.padding;
        let usable_w = (viewport.width - padding.left - padding.right).max(1.0);
        let usable_h = (viewport.height - padding.top - padding.bottom).max(1.0);
        let center_x = padding.left + usable_w * 0.5;
        let center_y = padding.top + usable_h * 0.5;

        PaddedRegion {
            fraction: Vec2::new(
                (usable_w / viewport.width).min(1.0),
                (usable_h / viewport.height).min(1.0),
            ),
            center_ndc: Vec2::new(
                center_x / viewport.width * 2.0 - 1.0,
                1.0 - center_y / viewport.height * 2.0,
            ),
        }
    }
}

struct PaddedRegion {
    // Share of the viewport left after padding, per axis.
    fraction: Vec2,
    center_ndc: Vec2,
}
