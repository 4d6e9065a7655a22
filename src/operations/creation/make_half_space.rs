use crate::error::{GeometryError, Result};
use crate::geometry::surface::Plane;
use crate::geometry::HalfSpace;
use crate::math::{Point3, DISTANCE_TOLERANCE};

/// Creates the half-space bounded by a plane that contains a reference point.
pub struct MakeHalfSpace {
    plane: Plane,
    reference: Point3,
}

impl MakeHalfSpace {
    /// Creates a new `MakeHalfSpace` operation.
    #[must_use]
    pub fn new(plane: Plane, reference: Point3) -> Self {
        Self { plane, reference }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] when the reference point lies on
    /// the plane, since it then selects neither side.
    pub fn execute(&self) -> Result<HalfSpace> {
        let d = self.plane.signed_distance(&self.reference);
        if d.abs() < DISTANCE_TOLERANCE {
            return Err(GeometryError::Degenerate(
                "half-space reference point lies on its boundary plane".into(),
            )
            .into());
        }
        let boundary = if d < 0.0 {
            self.plane.clone()
        } else {
            self.plane.reversed()
        };
        Ok(HalfSpace::below(boundary))
    }
}
