use std::collections::HashMap;

use crate::error::Result;
use crate::topology::{SolidId, TopologyStore, VertexId};

/// Validates that a solid's boundary is a closed, consistently oriented
/// surface: every directed vertex pair is used once and its reverse once.
pub struct IsValid {
    solid: SolidId,
}

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the validation, returning `true` if the solid is valid.
    #[must_use]
    pub fn execute(&self, store: &TopologyStore) -> bool {
        self.check(store).unwrap_or(false)
    }

    fn check(&self, store: &TopologyStore) -> Result<bool> {
        let faces = store.solid_faces(self.solid)?;
        if faces.len() < 4 {
            return Ok(false);
        }

        let mut uses: HashMap<(VertexId, VertexId), usize> = HashMap::new();
        for face in faces {
            for wire in store.face(face)?.wires() {
                if !store.wire(wire)?.is_closed {
                    return Ok(false);
                }
                let ring = store.wire_vertices(wire)?;
                for i in 0..ring.len() {
                    let key = (ring[i], ring[(i + 1) % ring.len()]);
                    *uses.entry(key).or_default() += 1;
                }
            }
        }

        Ok(uses
            .iter()
            .all(|(&(a, b), &count)| count == 1 && uses.get(&(b, a)) == Some(&1)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeBox, MakePolyhedron, PolygonFace};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_is_valid() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        assert!(IsValid::new(solid).execute(&store));
    }

    #[test]
    fn open_box_is_invalid() {
        let corners = [
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        let top: Vec<Point3> = corners.iter().map(|c| p(c.x, c.y, 1.0)).collect();
        let mut faces = vec![PolygonFace::planar(top.clone())];
        for i in 0..4 {
            let j = (i + 1) % 4;
            faces.push(PolygonFace::planar(vec![corners[i], corners[j], top[j], top[i]]));
        }
        let mut store = TopologyStore::new();
        let solid = MakePolyhedron::new(faces).execute(&mut store).unwrap();
        assert!(!IsValid::new(solid).execute(&store));
    }
}
