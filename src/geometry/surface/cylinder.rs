use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// A circular cylindrical surface.
///
/// `P(u, v) = center + radius * (cos(u) * ref_dir + sin(u) * (axis × ref_dir)) + v * axis`
///
/// Faces lying on a cylinder are curved: they have no plane equation and
/// are skipped by every planar analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    center: Point3,
    radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
}

impl Cylinder {
    /// Creates a cylinder around `axis` through `center`.
    ///
    /// The angular reference direction is chosen perpendicular to the axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive or the axis is zero-length.
    pub fn new(center: Point3, radius: f64, axis: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("cylinder radius must be positive".into()).into(),
            );
        }
        let axis_len = axis.norm();
        if axis_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let axis = axis / axis_len;

        let candidate = if axis.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let ref_dir = candidate - axis * candidate.dot(&axis);
        let ref_dir = ref_dir / ref_dir.norm();

        Ok(Self {
            center,
            radius,
            axis,
            ref_dir,
        })
    }

    /// Returns the center point on the axis.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the unit axis direction.
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Distance of `point` from the surface (radial deviation).
    #[must_use]
    pub fn distance(&self, point: &Point3) -> f64 {
        let d = point - self.center;
        let radial = d - self.axis * d.dot(&self.axis);
        (radial.norm() - self.radius).abs()
    }
}

impl Surface for Cylinder {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        let binormal = self.axis.cross(&self.ref_dir);
        let radial = self.ref_dir * u.cos() + binormal * u.sin();
        Ok(self.center + radial * self.radius + self.axis * v)
    }

    fn normal(&self, u: f64, _v: f64) -> Result<Vector3> {
        let binormal = self.axis.cross(&self.ref_dir);
        Ok(self.ref_dir * u.cos() + binormal * u.sin())
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, std::f64::consts::TAU, f64::NEG_INFINITY, f64::INFINITY)
    }
}
