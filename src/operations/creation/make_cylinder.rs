use std::f64::consts::TAU;

use crate::error::{OperationError, Result};
use crate::geometry::surface::{Cylinder, Surface};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{FaceSurface, SolidId, TopologyStore};

use super::{MakePolyhedron, PolygonFace};

/// Creates a vertical faceted cylinder (e.g. a round column).
///
/// The cap faces are planar polygons. Each lateral facet carries the
/// cylinder surface, so it counts as a curved face for planar analyses while
/// area and volume integrate its faceted boundary.
pub struct MakeCylinder {
    base_center: Point3,
    radius: f64,
    height: f64,
    segments: usize,
}

impl MakeCylinder {
    /// Creates a new `MakeCylinder` operation.
    #[must_use]
    pub fn new(base_center: Point3, radius: f64, height: f64, segments: usize) -> Self {
        Self {
            base_center,
            radius,
            height,
            segments,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive radius or height, or fewer than
    /// 3 segments.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.height < TOLERANCE {
            return Err(
                OperationError::InvalidInput("cylinder height must be positive".into()).into(),
            );
        }
        if self.segments < 3 {
            return Err(OperationError::InvalidInput(
                "cylinder needs at least 3 segments".into(),
            )
            .into());
        }
        let surface = Cylinder::new(self.base_center, self.radius, Vector3::z())?;

        #[allow(clippy::cast_precision_loss)]
        let step = TAU / self.segments as f64;
        let mut bottom = Vec::with_capacity(self.segments);
        let mut top = Vec::with_capacity(self.segments);
        for k in 0..self.segments {
            #[allow(clippy::cast_precision_loss)]
            let u = step * k as f64;
            bottom.push(surface.evaluate(u, 0.0)?);
            top.push(surface.evaluate(u, self.height)?);
        }

        let n = self.segments;
        let mut faces = Vec::with_capacity(n + 2);
        faces.push(PolygonFace::planar(bottom.iter().rev().copied().collect()));
        faces.push(PolygonFace::planar(top.clone()));
        for i in 0..n {
            let j = (i + 1) % n;
            faces.push(PolygonFace::on_surface(
                vec![bottom[i], bottom[j], top[j], top[i]],
                FaceSurface::Cylinder(surface.clone()),
            ));
        }

        MakePolyhedron::new(faces).execute(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::{IsValid, Volume};
    use std::f64::consts::PI;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn lateral_facets_are_curved() {
        let mut store = TopologyStore::new();
        let solid = MakeCylinder::new(p(0.0, 0.0, 0.0), 0.5, 3.0, 12)
            .execute(&mut store)
            .unwrap();
        let faces = store.solid_faces(solid).unwrap();
        assert_eq!(faces.len(), 14);
        let planar = faces
            .iter()
            .filter(|&&f| store.face(f).unwrap().plane().is_some())
            .count();
        assert_eq!(planar, 2);
        assert!(IsValid::new(solid).execute(&store));
    }

    #[test]
    fn volume_approaches_exact_with_many_segments() {
        let mut store = TopologyStore::new();
        let solid = MakeCylinder::new(p(1.0, 1.0, 0.0), 2.0, 5.0, 256)
            .execute(&mut store)
            .unwrap();
        let volume = Volume::new(solid).execute(&store).unwrap();
        let expected = PI * 4.0 * 5.0;
        assert!((volume - expected).abs() < expected * 0.01, "got {volume}");
    }

    #[test]
    fn zero_radius_fails() {
        let mut store = TopologyStore::new();
        assert!(MakeCylinder::new(p(0.0, 0.0, 0.0), 0.0, 1.0, 8).execute(&mut store).is_err());
    }

    #[test]
    fn two_segments_fail() {
        let mut store = TopologyStore::new();
        assert!(MakeCylinder::new(p(0.0, 0.0, 0.0), 1.0, 1.0, 2).execute(&mut store).is_err());
    }
}
