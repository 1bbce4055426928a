//! Axis-aligned bounds over entry positions.
//!
//! # Invariants
//! - `min`/`max` are the coordinate-wise extremes of the input points.
//! - An empty point set has no bounds.

use glam::Vec3;

/// Axis-aligned box over a set of world positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Coordinate-wise min/max of `points`; `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, point| {
            Some(match bounds {
                None => Self {
                    min: point,
                    max: point,
                },
                Some(Self { min, max }) => Self {
                    min: min.min(point),
                    max: max.max(point),
                },
            })
        })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the sphere circumscribing the box.
    pub fn radius(&self) -> f32 {
        self.size().length() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::Bounds;
    use glam::Vec3;

    #[test]
    fn empty_set_has_no_bounds() {
        assert_eq!(Bounds::from_points(std::iter::empty()), None);
    }

    #[test]
    fn bounds_match_coordinate_wise_extremes() {
        let bounds = Bounds::from_points([
            Vec3::new(-10.0, 4.0, 0.0),
            Vec3::new(-2.0, 30.0, 0.0),
            Vec3::new(-6.0, -7.5, 0.0),
        ])
        .expect("non-empty");
        assert_eq!(bounds.min, Vec3::new(-10.0, -7.5, 0.0));
        assert_eq!(bounds.max, Vec3::new(-2.0, 30.0, 0.0));
        assert_eq!(bounds.center(), Vec3::new(-6.0, 11.25, 0.0));
    }

    #[test]
    fn single_point_has_zero_radius() {
        let bounds = Bounds::from_points([Vec3::new(1.0, 2.0, 3.0)]).expect("one point");
        assert_eq!(bounds.min, bounds.max);
        assert_eq!(bounds.radius(), 0.0);
    }
}
