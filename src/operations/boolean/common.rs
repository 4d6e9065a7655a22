use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::surface::Plane;
use crate::geometry::HalfSpace;
use crate::math::polygon_3d::{area_vector, point_in_polygon_3d, polygon_area, polygon_normal};
use crate::math::{Point3, DISTANCE_TOLERANCE};
use crate::operations::creation::{MakePolyhedron, PolygonFace};
use crate::operations::section::chain_segments;
use crate::operations::section::plane_cut::{
    crossing_point, face_section_segments, snapped_distance,
};
use crate::topology::{FaceId, FaceSurface, SolidId, TopologyStore};

/// Computes the common part of a solid and a half-space.
///
/// Faces are clipped against the boundary plane and the cut is closed with
/// planar cap faces. The input solid is left untouched; the result is a new
/// solid in the store.
pub struct Common {
    solid: SolidId,
    half_space: HalfSpace,
}

impl Common {
    /// Creates a new `Common` operation.
    #[must_use]
    pub fn new(solid: SolidId, half_space: HalfSpace) -> Self {
        Self { solid, half_space }
    }

    /// Executes the operation, creating the result solid in the topology store.
    ///
    /// A solid entirely inside the half-space is copied unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Failed`] if nothing of the solid lies inside
    /// the half-space or the cut cannot be capped.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        let plane = self.half_space.boundary();

        // Step 1: classify vertices
        let points = store.solid_points(self.solid)?;
        let distances: Vec<f64> = points.iter().map(|p| snapped_distance(plane, p)).collect();
        if !distances.iter().any(|&d| d < 0.0) {
            return Err(OperationError::Failed("empty result".into()).into());
        }
        let cut = distances.iter().any(|&d| d > 0.0);

        // Step 2: clip faces, collecting the section for the cap
        let mut polygons = Vec::new();
        let mut cap_segments = Vec::new();
        for face in store.solid_faces(self.solid)? {
            let loops = store.face_loops(face)?;
            if !cut {
                polygons.push(face_polygon(store, face, loops)?);
                continue;
            }
            let Some(outward) = loops.first().and_then(|outer| polygon_normal(outer)) else {
                continue;
            };
            cap_segments.extend(face_section_segments(&loops, &outward, plane));

            let on_plane = loops[0].iter().all(|p| snapped_distance(plane, p) == 0.0);
            if on_plane {
                debug!(?face, "dropping face in cutting plane");
                continue;
            }
            let mut clipped = loops.iter().map(|lp| clip_loop(lp, plane));
            let Some(boundary) = clipped.next().filter(|lp| is_face_loop(lp)) else {
                continue;
            };
            let holes: Vec<Vec<Point3>> = clipped.filter(|lp| is_face_loop(lp)).collect();
            polygons.push(face_polygon(store, face, std::iter::once(boundary).chain(holes).collect())?);
        }

        // Step 3: cap the cut
        if cut {
            let caps = cap_faces(&cap_segments, plane)?;
            debug!(caps = caps.len(), segments = cap_segments.len(), "cap built");
            polygons.extend(caps);
        }

        MakePolyhedron::new(polygons).execute(store)
    }
}

/// A polygon face carrying over the source face's surface.
fn face_polygon(
    store: &TopologyStore,
    face: FaceId,
    mut loops: Vec<Vec<Point3>>,
) -> Result<PolygonFace> {
    if loops.is_empty() {
        return Err(OperationError::InvalidInput("face without boundary".into()).into());
    }
    let boundary = loops.remove(0);
    let polygon = match &store.face(face)?.surface {
        FaceSurface::Plane(_) => PolygonFace::planar(boundary),
        surface => PolygonFace::on_surface(boundary, surface.clone()),
    };
    Ok(polygon.with_holes(loops))
}

/// Sutherland–Hodgman clip of a loop, keeping the part with signed distance `<= 0`.
fn clip_loop(points: &[Point3], plane: &Plane) -> Vec<Point3> {
    let n = points.len();
    let mut out: Vec<Point3> = Vec::with_capacity(n + 2);
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let da = snapped_distance(plane, a);
        let db = snapped_distance(plane, b);
        if da <= 0.0 {
            out.push(*a);
        }
        if (da < 0.0 && db > 0.0) || (da > 0.0 && db < 0.0) {
            out.push(crossing_point(a, da, b, db));
        }
    }
    out.dedup_by(|a, b| (*a - *b).norm() < DISTANCE_TOLERANCE);
    if out.len() > 1 && (out[0] - out[out.len() - 1]).norm() < DISTANCE_TOLERANCE {
        out.pop();
    }
    out
}

fn is_face_loop(points: &[Point3]) -> bool {
    points.len() >= 3 && polygon_normal(points).is_some()
}

/// Chains section segments into loops and nests holes into outer loops.
fn cap_faces(segments: &[(Point3, Point3)], plane: &Plane) -> Result<Vec<PolygonFace>> {
    let mut loops = Vec::new();
    for chain in chain_segments(segments, DISTANCE_TOLERANCE) {
        if !chain.closed {
            return Err(OperationError::Failed(format!(
                "cap is not closed ({} open segments)",
                chain.links.len()
            ))
            .into());
        }
        let points: Vec<Point3> = chain
            .links
            .iter()
            .map(|&(i, forward)| if forward { segments[i].0 } else { segments[i].1 })
            .collect();
        loops.push(points);
    }
    Ok(nest_loops(loops, plane))
}

/// Groups loops by winding: loops counter-clockwise about the plane normal
/// are outer boundaries, the others become holes of the smallest outer loop
/// containing them.
fn nest_loops(loops: Vec<Vec<Point3>>, plane: &Plane) -> Vec<PolygonFace> {
    let normal = plane.plane_normal();
    let (outers, holes): (Vec<_>, Vec<_>) = loops
        .into_iter()
        .filter(|lp| is_face_loop(lp))
        .partition(|lp| area_vector(lp).dot(normal) > 0.0);

    let mut faces: Vec<PolygonFace> = outers.into_iter().map(PolygonFace::planar).collect();
    for hole in holes {
        let host = faces
            .iter_mut()
            .filter(|face| point_in_polygon_3d(&hole[0], &face.boundary, plane))
            .min_by(|a, b| polygon_area(&a.boundary).total_cmp(&polygon_area(&b.boundary)));
        match host {
            Some(face) => face.holes.push(hole),
            None => debug!("dropping cap hole outside every outer loop"),
        }
    }
    faces
}
