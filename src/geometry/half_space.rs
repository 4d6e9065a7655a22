use crate::math::Point3;

use super::surface::Plane;

/// An infinite solid bounded by a single plane.
///
/// The boundary plane's normal points out of the material: a point belongs
/// to the half-space when its signed distance to the boundary is `<= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfSpace {
    boundary: Plane,
}

impl HalfSpace {
    /// Half-space on the negative side of `boundary`.
    #[must_use]
    pub fn below(boundary: Plane) -> Self {
        Self { boundary }
    }

    /// The bounding plane, normal pointing away from the material.
    #[must_use]
    pub fn boundary(&self) -> &Plane {
        &self.boundary
    }

    /// Whether `point` lies inside or on the boundary, within `tolerance`.
    #[must_use]
    pub fn contains(&self, point: &Point3, tolerance: f64) -> bool {
        self.boundary.signed_distance(point) <= tolerance
    }
}
