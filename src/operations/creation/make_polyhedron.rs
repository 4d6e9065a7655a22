use crate::error::{OperationError, Result};
use crate::math::{Point3, DISTANCE_TOLERANCE};
use crate::topology::{
    FaceId, FaceSurface, OrientedEdge, ShellData, SolidId, TopologyStore, VertexId, WireData,
    WireId,
};

use super::make_wire::add_line_edge;
use super::vertex_merger::VertexMerger;
use super::{MakeFace, MakeSolid};

/// One boundary face of a polyhedron, given as point loops.
///
/// The boundary runs counter-clockwise seen from outside; holes run
/// clockwise. A face without an explicit surface is planar.
#[derive(Debug, Clone)]
pub struct PolygonFace {
    pub boundary: Vec<Point3>,
    pub holes: Vec<Vec<Point3>>,
    pub surface: Option<FaceSurface>,
}

impl PolygonFace {
    /// A planar face without holes.
    #[must_use]
    pub fn planar(boundary: Vec<Point3>) -> Self {
        Self {
            boundary,
            holes: Vec::new(),
            surface: None,
        }
    }

    /// A face on a given (possibly curved) surface.
    #[must_use]
    pub fn on_surface(boundary: Vec<Point3>, surface: FaceSurface) -> Self {
        Self {
            boundary,
            holes: Vec::new(),
            surface: Some(surface),
        }
    }

    /// Adds hole loops.
    #[must_use]
    pub fn with_holes(mut self, holes: Vec<Vec<Point3>>) -> Self {
        self.holes = holes;
        self
    }
}

/// Creates a closed solid from outward-oriented polygon faces.
///
/// Coincident corners of adjacent faces are merged into shared vertices.
pub struct MakePolyhedron {
    faces: Vec<PolygonFace>,
}

impl MakePolyhedron {
    /// Creates a new `MakePolyhedron` operation.
    #[must_use]
    pub fn new(faces: Vec<PolygonFace>) -> Self {
        Self { faces }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than four faces are given or a face
    /// cannot be built (too few points, non-planar, no area).
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.faces.len() < 4 {
            return Err(OperationError::InvalidInput(format!(
                "a closed polyhedron needs at least 4 faces, got {}",
                self.faces.len()
            ))
            .into());
        }

        let mut merger = VertexMerger::new(DISTANCE_TOLERANCE);
        let mut face_ids: Vec<FaceId> = Vec::with_capacity(self.faces.len());
        for face in &self.faces {
            let outer = loop_wire(store, &mut merger, &face.boundary)?;
            let holes = face
                .holes
                .iter()
                .map(|h| loop_wire(store, &mut merger, h))
                .collect::<Result<Vec<_>>>()?;
            let mut op = MakeFace::new(outer, holes);
            if let Some(surface) = &face.surface {
                op = op.with_surface(surface.clone());
            }
            face_ids.push(op.execute(store)?);
        }

        let shell = store.add_shell(ShellData {
            faces: face_ids,
            is_closed: true,
        });
        MakeSolid::new(shell, vec![]).execute(store)
    }
}

/// Builds a closed wire over merged vertices, dropping repeated points.
fn loop_wire(
    store: &mut TopologyStore,
    merger: &mut VertexMerger,
    points: &[Point3],
) -> Result<WireId> {
    let mut vertices: Vec<VertexId> = Vec::with_capacity(points.len());
    for p in points {
        let v = merger.get_or_create(store, p);
        if vertices.last() != Some(&v) {
            vertices.push(v);
        }
    }
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    if vertices.len() < 3 {
        return Err(
            OperationError::InvalidInput("face loop has fewer than 3 distinct points".into())
                .into(),
        );
    }

    let n = vertices.len();
    let mut edges = Vec::with_capacity(n);
    for i in 0..n {
        let edge = add_line_edge(store, vertices[i], vertices[(i + 1) % n])?;
        edges.push(OrientedEdge::new(edge, true));
    }
    Ok(store.add_wire(WireData {
        edges,
        is_closed: true,
    }))
}
