//! Host camera pose and world-to-pixel projection.
//!
//! # Responsibility
//! - Build right-handed view and GL-style projection matrices.
//! - Map world points to viewport pixels with a top-left origin.
//!
//! # Invariants
//! - Points at or behind the eye plane never project.

use crate::config::CameraPreset;
use glam::{Mat4, Vec2, Vec3};

/// Perspective camera pose as reported by (or requested from) the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraView {
    pub fn from_preset(preset: &CameraPreset) -> Self {
        Self {
            eye: Vec3::from_array(preset.eye),
            target: Vec3::from_array(preset.target),
            up: Vec3::Y,
            fov_y_degrees: preset.fov_y_degrees,
            near: preset.near,
            far: preset.far,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style clip space, matching WebGL hosts.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, viewport: &Viewport) -> Mat4 {
        self.projection_matrix(viewport.aspect()) * self.view_matrix()
    }

    /// Unit vector from eye towards target; `-Z` when they coincide.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Camera-space right and up axes in world coordinates.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let forward = self.forward();
        let right = forward
            .cross(self.up)
            .try_normalize()
            .unwrap_or(Vec3::X);
        let up = right.cross(forward);
        (right, up)
    }

    /// Whether every component of the pose is a finite number.
    pub fn is_finite(&self) -> bool {
        self.eye.is_finite()
            && self.target.is_finite()
            && self.up.is_finite()
            && self.fov_y_degrees.is_finite()
            && self.near.is_finite()
            && self.far.is_finite()
    }

    /// Tangent of half the vertical field of view.
    pub fn half_fov_tan(&self) -> f32 {
        (self.fov_y_degrees.to_radians() * 0.5).tan()
    }
}

/// Host viewport size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Projects a world point to viewport pixels.
///
/// Returns `None` for points behind the camera or a zero-sized viewport.
pub fn project_to_screen(world: Vec3, camera: &CameraView, viewport: &Viewport) -> Option<Vec2> {
    if viewport.is_degenerate() {
        return None;
    }
    project_with(world, &camera.view_projection(viewport), viewport)
}

pub(crate) fn project_with(world: Vec3, view_projection: &Mat4, viewport: &Viewport) -> Option<Vec2> {
    let clip = *view_projection * world.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x + 1.0) * viewport.width * 0.5,
        (1.0 - ndc.y) * viewport.height * 0.5,
    ))
}
