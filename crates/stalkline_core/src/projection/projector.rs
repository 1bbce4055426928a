//! Per-frame connector lines between entries and their cards.
//!
//! # Responsibility
//! - Turn a projected entry and a card rect into a length/angle segment.
//! - Remember the last state per entry so hosts can skip unchanged lines.
//!
//! # Invariants
//! - A card outside the viewport vertically always yields `visible = false`.
//! - A visible line always carries finite geometry.

use crate::model::entry::EntryId;
use crate::projection::camera::{project_with, CameraView, Viewport};
use crate::state::cards::CardLayout;
use glam::{Vec2, Vec3};
use std::collections::HashMap;

/// On-screen rectangle of a rendered detail card, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Leading edge, vertically centered.
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.left, self.top + self.height * 0.5)
    }

    /// Whether the card lies entirely above or below the viewport.
    pub fn is_off_screen_vertically(&self, viewport_height: f32) -> bool {
        self.bottom() < 0.0 || self.top > viewport_height
    }
}

/// Connector line as rendered by the overlay: a segment starting at `origin`
/// with the given width (`length`) and rotation (`angle`, radians).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineState {
    pub origin: Vec2,
    pub length: f32,
    pub angle: f32,
    pub visible: bool,
}

/// One line produced by a frame update.
#[derive(Debug, Clone, PartialEq)]
pub struct LineUpdate {
    pub id: EntryId,
    pub state: LineState,
    /// Differs from the state reported on the previous frame.
    pub changed: bool,
}

/// Length and angle of the segment from `from` to `to`.
pub fn connector(from: Vec2, to: Vec2) -> (f32, f32) {
    let delta = to - from;
    (delta.length(), delta.y.atan2(delta.x))
}

/// Per-frame connector line computation with last-state retention.
#[derive(Debug, Clone, Default)]
pub struct LineTracker {
    last: HashMap<EntryId, LineState>,
}

impl LineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes lines for `targets` (selected entries with world positions).
    ///
    /// Entries without a card rectangle produce no line. A card entirely
    /// above or below the viewport hides its line before any projection
    /// happens; the previous geometry is kept with `visible = false`.
    /// Points behind the camera and non-finite geometry hide the line the
    /// same way.
    pub fn update<'a>(
        &mut self,
        targets: impl IntoIterator<Item = (&'a EntryId, Vec3)>,
        cards: &CardLayout,
        camera: &CameraView,
        viewport: &Viewport,
    ) -> Vec<LineUpdate> {
        let view_projection = camera.view_projection(viewport);
        let mut next = HashMap::with_capacity(self.last.len());
        let mut updates = Vec::new();

        for (id, world) in targets {
            let Some(rect) = cards.get(id) else {
                continue;
            };
            let previous = self.last.get(id).copied().unwrap_or_default();

            let state = if rect.is_off_screen_vertically(viewport.height) {
                LineState {
                    visible: false,
                    ..previous
                }
            } else {
                let segment = project_with(world, &view_projection, viewport)
                    .filter(|_| !viewport.is_degenerate())
                    .map(|origin| {
                        let (length, angle) = connector(origin, rect.anchor());
                        (origin, length, angle)
                    })
                    .filter(|(origin, length, angle)| {
                        origin.is_finite() && length.is_finite() && angle.is_finite()
                    });
                match segment {
                    Some((origin, length, angle)) => LineState {
                        origin,
                        length,
                        angle,
                        visible: true,
                    },
                    None => LineState {
                        visible: false,
                        ..previous
                    },
                }
            };

            updates.push(LineUpdate {
                id: id.clone(),
                state,
                changed: state != previous,
            });
            next.insert(id.clone(), state);
        }

        self.last = next;
        updates
    }

    /// Last reported state for one entry.
    pub fn last(&self, id: &EntryId) -> Option<&LineState> {
        self.last.get(id)
    }

    pub fn clear(&mut self) {
        self.last.clear();
    }
}
