use tracing::debug;

use crate::error::{OperationError, Result};
use crate::math::polygon_3d::{clip_segment_to_polygon, polygon_normal};
use crate::math::DISTANCE_TOLERANCE;
use crate::operations::creation::{add_line_edge, VertexMerger};
use crate::topology::{EdgeId, FaceId, SolidId, TopologyStore};

use super::plane_cut::{coplanar_underside_segments, face_section_segments};

/// Intersects a planar face with the boundary of a solid.
///
/// The result is a set of loose line edges lying in the face's plane and
/// inside its outer boundary. A solid face lying in the plane contributes
/// its boundary whether it is the top or the bottom of the solid, so a
/// solid resting on the plane and one ending at it are both sectioned. Edges of one section share vertices where
/// they meet, but are not assembled into wires; see
/// [`ConnectEdges`](super::ConnectEdges).
pub struct Section {
    face: FaceId,
    solid: SolidId,
}

impl Section {
    /// Creates a new `Section` operation.
    #[must_use]
    pub fn new(face: FaceId, solid: SolidId) -> Self {
        Self { face, solid }
    }

    /// Executes the section, returning the created edges.
    ///
    /// An empty vector means the face does not meet the solid.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the section face is not
    /// planar, or an error if an entity is missing.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<Vec<EdgeId>> {
        let slice = store.face(self.face)?;
        let plane = slice
            .plane()
            .cloned()
            .ok_or_else(|| OperationError::InvalidInput("section face is not planar".into()))?;
        let boundary = store.wire_points(slice.outer_wire)?;

        let mut segments = Vec::new();
        for face in store.solid_faces(self.solid)? {
            let loops = store.face_loops(face)?;
            let Some(outward) = loops.first().and_then(|outer| polygon_normal(outer)) else {
                debug!(?face, "skipping face without area");
                continue;
            };
            segments.extend(face_section_segments(&loops, &outward, &plane));
            segments.extend(coplanar_underside_segments(&loops, &outward, &plane));
        }

        let mut merger = VertexMerger::new(DISTANCE_TOLERANCE);
        let mut edges = Vec::with_capacity(segments.len());
        for (a, b) in segments {
            for (t0, t1) in clip_segment_to_polygon(&a, &b, &boundary, &plane) {
                let start = merger.get_or_create(store, &(a + (b - a) * t0));
                let end = merger.get_or_create(store, &(a + (b - a) * t1));
                if start != end {
                    edges.push(add_line_edge(store, start, end)?);
                }
            }
        }

        debug!(edges = edges.len(), "section computed");
        Ok(edges)
    }
}
