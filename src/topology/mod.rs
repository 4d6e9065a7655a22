pub mod edge;
pub mod face;
pub mod shell;
pub mod solid;
pub mod vertex;
pub mod wire;

pub use edge::{EdgeCurve, EdgeData, EdgeId};
pub use face::{FaceData, FaceId, FaceSurface};
pub use shell::{ShellData, ShellId};
pub use solid::{SolidData, SolidId};
pub use vertex::{VertexData, VertexId};
pub use wire::{OrientedEdge, WireData, WireId};

use crate::error::TopologyError;
use crate::math::Point3;
use slotmap::SlotMap;

/// Central arena that owns all topological entities.
///
/// Entities reference each other via typed IDs (generational indices).
/// Operations never mutate existing entities; they insert new ones, so a
/// solid handed to an analysis stage stays valid for the whole run.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    solids: SlotMap<SolidId, SolidData>,
}

fn not_found(kind: &str) -> TopologyError {
    TopologyError::EntityNotFound(kind.into())
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns the vertex data.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices.get(id).ok_or_else(|| not_found("vertex"))
    }

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns the edge data.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges.get(id).ok_or_else(|| not_found("edge"))
    }

    /// Inserts a wire and returns its ID.
    pub fn add_wire(&mut self, data: WireData) -> WireId {
        self.wires.insert(data)
    }

    /// Returns the wire data.
    ///
    /// # Errors
    ///
    /// Returns an error if the wire is not in the store.
    pub fn wire(&self, id: WireId) -> Result<&WireData, TopologyError> {
        self.wires.get(id).ok_or_else(|| not_found("wire"))
    }

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns the face data.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces.get(id).ok_or_else(|| not_found("face"))
    }

    /// Inserts a shell and returns its ID.
    pub fn add_shell(&mut self, data: ShellData) -> ShellId {
        self.shells.insert(data)
    }

    /// Returns the shell data.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell is not in the store.
    pub fn shell(&self, id: ShellId) -> Result<&ShellData, TopologyError> {
        self.shells.get(id).ok_or_else(|| not_found("shell"))
    }

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        self.solids.insert(data)
    }

    /// Returns the solid data.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, TopologyError> {
        self.solids.get(id).ok_or_else(|| not_found("solid"))
    }

    // --- Traversal ---

    /// All faces of a solid: outer shell first, then void shells.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or one of its shells is missing.
    pub fn solid_faces(&self, id: SolidId) -> Result<Vec<FaceId>, TopologyError> {
        let solid = self.solid(id)?;
        let mut faces = self.shell(solid.outer_shell)?.faces.clone();
        for &inner in &solid.inner_shells {
            faces.extend_from_slice(&self.shell(inner)?.faces);
        }
        Ok(faces)
    }

    /// Start and end positions of an edge, in its natural direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or its vertices are missing.
    pub fn edge_points(&self, id: EdgeId) -> Result<(Point3, Point3), TopologyError> {
        let edge = self.edge(id)?;
        Ok((self.vertex(edge.start)?.point, self.vertex(edge.end)?.point))
    }

    /// Vertex IDs of a wire in traversal order (one per oriented edge start).
    ///
    /// # Errors
    ///
    /// Returns an error if the wire, an edge or a vertex is missing.
    pub fn wire_vertices(&self, id: WireId) -> Result<Vec<VertexId>, TopologyError> {
        self.wire(id)?
            .edges
            .iter()
            .map(|oe| {
                let edge = self.edge(oe.edge)?;
                Ok(if oe.forward { edge.start } else { edge.end })
            })
            .collect()
    }

    /// Vertex positions of a wire in traversal order.
    ///
    /// For a closed wire this is the polygon loop without a repeated first point.
    ///
    /// # Errors
    ///
    /// Returns an error if the wire, an edge or a vertex is missing.
    pub fn wire_points(&self, id: WireId) -> Result<Vec<Point3>, TopologyError> {
        self.wire_vertices(id)?
            .into_iter()
            .map(|v| Ok(self.vertex(v)?.point))
            .collect()
    }

    /// Boundary loops of a face, outer loop first.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn face_loops(&self, id: FaceId) -> Result<Vec<Vec<Point3>>, TopologyError> {
        self.face(id)?
            .wires()
            .map(|w| self.wire_points(w))
            .collect()
    }

    /// All vertex positions of a solid, with repeats.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn solid_points(&self, id: SolidId) -> Result<Vec<Point3>, TopologyError> {
        let mut points = Vec::new();
        for face in self.solid_faces(id)? {
            for lp in self.face_loops(face)? {
                points.extend(lp);
            }
        }
        Ok(points)
    }
}
