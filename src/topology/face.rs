use crate::geometry::surface::{Cylinder, Plane};

use super::wire::WireId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// The geometric surface associated with a face.
#[derive(Debug, Clone)]
pub enum FaceSurface {
    /// A planar surface whose normal is the face's outward normal.
    Plane(Plane),
    /// A cylindrical surface. The face boundary is a faceted approximation.
    Cylinder(Cylinder),
}

/// Data associated with a topological face.
///
/// A face is a bounded region on a surface, defined by an outer wire
/// and optionally inner wires (holes). The outer wire runs counter-clockwise
/// seen from outside the owning solid; inner wires run the other way.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The geometric surface on which this face lies.
    pub surface: FaceSurface,
    /// The outer boundary wire.
    pub outer_wire: WireId,
    /// Inner boundary wires (holes).
    pub inner_wires: Vec<WireId>,
}

impl FaceData {
    /// The plane equation of the face, or `None` for curved faces.
    #[must_use]
    pub fn plane(&self) -> Option<&Plane> {
        match &self.surface {
            FaceSurface::Plane(plane) => Some(plane),
            FaceSurface::Cylinder(_) => None,
        }
    }

    /// All boundary wires, outer first.
    pub fn wires(&self) -> impl Iterator<Item = WireId> + '_ {
        std::iter::once(self.outer_wire).chain(self.inner_wires.iter().copied())
    }
}
