use crate::error::{GeometryError, Result, TopologyError};
use crate::geometry::surface::Plane;
use crate::math::polygon_3d::{average_point, max_plane_deviation, polygon_normal};
use crate::topology::{FaceData, FaceId, FaceSurface, TopologyStore, WireId};

/// Largest allowed distance of a boundary point from the fitted face plane.
const PLANARITY_TOLERANCE: f64 = 1e-6;

/// Creates a face bounded by closed wires.
///
/// Without an explicit surface the face is planar: its plane passes through
/// the outer wire's centroid with the outer wire's Newell normal, so the
/// normal follows the wire's winding.
pub struct MakeFace {
    outer_wire: WireId,
    inner_wires: Vec<WireId>,
    surface: Option<FaceSurface>,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation.
    #[must_use]
    pub fn new(outer_wire: WireId, inner_wires: Vec<WireId>) -> Self {
        Self {
            outer_wire,
            inner_wires,
            surface: None,
        }
    }

    /// Places the face on a given surface instead of fitting a plane.
    #[must_use]
    pub fn with_surface(mut self, surface: FaceSurface) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WireNotClosed`] for an open boundary,
    /// [`GeometryError::Degenerate`] for a boundary without area and
    /// [`GeometryError::NonPlanar`] when a fitted plane does not hold
    /// all boundary points.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        for &wire in std::iter::once(&self.outer_wire).chain(&self.inner_wires) {
            if !store.wire(wire)?.is_closed {
                return Err(TopologyError::WireNotClosed.into());
            }
        }

        let surface = match &self.surface {
            Some(surface) => surface.clone(),
            None => FaceSurface::Plane(self.fit_plane(store)?),
        };

        Ok(store.add_face(FaceData {
            surface,
            outer_wire: self.outer_wire,
            inner_wires: self.inner_wires.clone(),
        }))
    }

    fn fit_plane(&self, store: &TopologyStore) -> Result<Plane> {
        let outer = store.wire_points(self.outer_wire)?;
        let normal = polygon_normal(&outer)
            .ok_or_else(|| GeometryError::Degenerate("face boundary has no area".into()))?;
        let centroid = average_point(&outer)
            .ok_or_else(|| GeometryError::Degenerate("face boundary is empty".into()))?;
        let plane = Plane::from_normal(centroid, normal)?;

        let mut deviation = max_plane_deviation(&outer, &plane);
        for &inner in &self.inner_wires {
            deviation = deviation.max(max_plane_deviation(&store.wire_points(inner)?, &plane));
        }
        if deviation > PLANARITY_TOLERANCE {
            return Err(GeometryError::NonPlanar(format!(
                "boundary deviates {deviation:.3e} from its plane"
            ))
            .into());
        }
        Ok(plane)
    }
}
