//! Intersection of planar face loops with a cutting plane.
//!
//! Shared by [`Section`](super::Section) and the half-space `Common`: both
//! must agree on which points count as on the plane and on the exact
//! coordinates of every crossing, so that segments produced for two faces
//! sharing an edge meet at the same point.

use crate::geometry::surface::Plane;
use crate::math::{Point3, Vector3, DISTANCE_TOLERANCE, TOLERANCE};

/// Signed distance of `point` from `plane`, snapped to `0` within
/// [`DISTANCE_TOLERANCE`].
pub(crate) fn snapped_distance(plane: &Plane, point: &Point3) -> f64 {
    let d = plane.signed_distance(point);
    if d.abs() < DISTANCE_TOLERANCE {
        0.0
    } else {
        d
    }
}

/// Whether an edge with endpoint distances `da`, `db` crosses the plane.
///
/// A point on the plane counts as above it.
pub(crate) fn crosses(da: f64, db: f64) -> bool {
    (da < 0.0) != (db < 0.0)
}

/// Point where the edge `a`-`b` meets the plane.
///
/// Interpolation always runs from the lower endpoint to the upper one so the
/// result does not depend on the edge direction.
pub(crate) fn crossing_point(a: &Point3, da: f64, b: &Point3, db: f64) -> Point3 {
    let (lo, d_lo, hi, d_hi) = if da <= db {
        (a, da, b, db)
    } else {
        (b, db, a, da)
    };
    let t = d_lo / (d_lo - d_hi);
    lo + (hi - lo) * t
}

/// Segments where a planar face crosses `plane`.
///
/// `loops` are the face boundary loops (outer first, then holes) and
/// `outward` the face's unit outward normal. Crossings of all loops with the
/// plane are sorted along `plane_normal × outward` and paired, which handles
/// non-convex faces and holes. Each segment runs in that direction, so the
/// cross-section of the solid lies to its left seen from the normal side of
/// `plane`.
pub(crate) fn face_section_segments(
    loops: &[Vec<Point3>],
    outward: &Vector3,
    plane: &Plane,
) -> Vec<(Point3, Point3)> {
    let direction = plane.plane_normal().cross(outward);
    if direction.norm() < TOLERANCE {
        return Vec::new();
    }

    let mut crossings: Vec<(f64, Point3)> = Vec::new();
    for lp in loops {
        let n = lp.len();
        for i in 0..n {
            let a = &lp[i];
            let b = &lp[(i + 1) % n];
            let da = snapped_distance(plane, a);
            let db = snapped_distance(plane, b);
            if crosses(da, db) {
                let q = crossing_point(a, da, b, db);
                crossings.push((direction.dot(&q.coords), q));
            }
        }
    }
    crossings.sort_by(|x, y| x.0.total_cmp(&y.0));

    crossings
        .chunks_exact(2)
        .filter_map(|pair| {
            let (a, b) = (pair[0].1, pair[1].1);
            ((b - a).norm() > DISTANCE_TOLERANCE).then_some((a, b))
        })
        .collect()
}

/// Boundary of a face lying in `plane` with its material above it.
///
/// [`face_section_segments`] treats points on the plane as above, so a
/// solid resting on the plane yields no crossings there. Its bottom face
/// is returned instead, each loop reversed so that the segments run with
/// the same orientation as crossing segments. Any other face gives nothing.
pub(crate) fn coplanar_underside_segments(
    loops: &[Vec<Point3>],
    outward: &Vector3,
    plane: &Plane,
) -> Vec<(Point3, Point3)> {
    let in_plane = loops
        .iter()
        .flatten()
        .all(|q| snapped_distance(plane, q) == 0.0);
    if !in_plane || outward.dot(plane.plane_normal()) >= 0.0 {
        return Vec::new();
    }
    loops
        .iter()
        .flat_map(|lp| {
            let n = lp.len();
            (0..n).map(move |i| (lp[(i + 1) % n], lp[i]))
        })
        .collect()
}
