use crate::error::Result;
use crate::math::{Point3, Vector3};
use crate::topology::{SolidId, TopologyStore};

/// Computes the signed volume of a solid.
///
/// Uses the divergence theorem over the faceted boundary: every face loop
/// is fanned into triangles and the signed tetrahedra they span with a
/// reference point are summed. Outward-oriented closed solids give a
/// positive value; an inside-out shell gives a negative one.
pub struct Volume {
    solid: SolidId,
}

impl Volume {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the signed volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid's topology cannot be read.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        let faces = store.solid_faces(self.solid)?;

        // Tetrahedra are taken relative to a vertex of the solid instead of
        // the world origin to keep far-from-origin models precise.
        let mut reference: Option<Point3> = None;
        let mut six_volume = 0.0;
        for face in faces {
            for lp in store.face_loops(face)? {
                let Some(first) = lp.first() else {
                    continue;
                };
                let origin = *reference.get_or_insert(*first);
                let rel: Vec<Vector3> = lp.iter().map(|p| p - origin).collect();
                for i in 1..rel.len().saturating_sub(1) {
                    six_volume += rel[0].dot(&rel[i].cross(&rel[i + 1]));
                }
            }
        }

        Ok(six_volume / 6.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::{MakeBox, MakePolyhedron, PolygonFace};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn offset_box_volume() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(p(1000.0, 2000.0, 3.0), p(1003.0, 2005.0, 7.0))
            .execute(&mut store)
            .unwrap();
        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn inside_out_solid_is_negative() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        let c = p(0.0, 1.0, 0.0);
        let d = p(0.0, 0.0, 1.0);
        let faces = vec![
            PolygonFace::planar(vec![a, b, c]),
            PolygonFace::planar(vec![a, d, b]),
            PolygonFace::planar(vec![a, c, d]),
            PolygonFace::planar(vec![b, d, c]),
        ];
        let mut store = TopologyStore::new();
        let solid = MakePolyhedron::new(faces).execute(&mut store).unwrap();
        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), -1.0 / 6.0, epsilon = 1e-12);
    }
}
