use crate::error::{OperationError, Result};
use crate::math::{Point2, Point3, TOLERANCE};
use crate::topology::{SolidId, TopologyStore};

use super::{MakePolyhedron, PolygonFace};

/// Extrudes a simple horizontal footprint polygon straight up.
///
/// The footprint may be given in either winding; it is normalized so that
/// the bottom face points down and the top face up.
pub struct MakePrism {
    footprint: Vec<Point2>,
    base: f64,
    height: f64,
}

impl MakePrism {
    /// Creates a new `MakePrism` operation.
    #[must_use]
    pub fn new(footprint: Vec<Point2>, base: f64, height: f64) -> Self {
        Self {
            footprint,
            base,
            height,
        }
    }

    /// Executes the extrusion.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a non-positive height or a
    /// footprint with fewer than 3 points or no area.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.height <= TOLERANCE {
            return Err(
                OperationError::InvalidInput("prism height must be positive".into()).into(),
            );
        }
        if self.footprint.len() < 3 {
            return Err(OperationError::InvalidInput(
                "prism footprint needs at least 3 points".into(),
            )
            .into());
        }

        let signed = signed_area(&self.footprint);
        if signed.abs() < TOLERANCE {
            return Err(OperationError::InvalidInput("prism footprint has no area".into()).into());
        }
        let ring: Vec<Point2> = if signed > 0.0 {
            self.footprint.clone()
        } else {
            self.footprint.iter().rev().copied().collect()
        };

        let top_z = self.base + self.height;
        let bottom: Vec<Point3> = ring.iter().map(|q| Point3::new(q.x, q.y, self.base)).collect();
        let top: Vec<Point3> = ring.iter().map(|q| Point3::new(q.x, q.y, top_z)).collect();

        let n = ring.len();
        let mut faces = Vec::with_capacity(n + 2);
        faces.push(PolygonFace::planar(bottom.iter().rev().copied().collect()));
        faces.push(PolygonFace::planar(top.clone()));
        for i in 0..n {
            let j = (i + 1) % n;
            faces.push(PolygonFace::planar(vec![bottom[i], bottom[j], top[j], top[i]]));
        }

        MakePolyhedron::new(faces).execute(store)
    }
}

/// Shoelace signed area, positive for counter-clockwise polygons.
fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    0.5 * twice
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::{IsValid, Volume};
    use approx::assert_relative_eq;

    fn q(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn l_shaped_prism_volume() {
        let mut store = TopologyStore::new();
        let footprint = vec![q(0.0, 0.0), q(2.0, 0.0), q(2.0, 1.0), q(1.0, 1.0), q(1.0, 2.0), q(0.0, 2.0)];
        let solid = MakePrism::new(footprint, 1.0, 2.0).execute(&mut store).unwrap();

        let faces = store.solid_faces(solid).unwrap();
        assert_eq!(faces.len(), 8);
        assert!(IsValid::new(solid).execute(&store));
        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn clockwise_footprint_is_normalized() {
        let mut store = TopologyStore::new();
        let footprint = vec![q(0.0, 0.0), q(0.0, 1.0), q(1.0, 1.0), q(1.0, 0.0)];
        let solid = MakePrism::new(footprint, 0.0, 3.0).execute(&mut store).unwrap();
        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_height_fails() {
        let mut store = TopologyStore::new();
        let footprint = vec![q(0.0, 0.0), q(1.0, 0.0), q(0.0, 1.0)];
        assert!(MakePrism::new(footprint, 0.0, 0.0).execute(&mut store).is_err());
    }

    #[test]
    fn collinear_footprint_fails() {
        let mut store = TopologyStore::new();
        let footprint = vec![q(0.0, 0.0), q(1.0, 0.0), q(2.0, 0.0)];
        assert!(MakePrism::new(footprint, 0.0, 1.0).execute(&mut store).is_err());
    }
}
