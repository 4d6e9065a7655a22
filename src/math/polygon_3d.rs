use crate::geometry::surface::Plane;

use super::{Point2, Point3, Vector3, TOLERANCE};

/// Newell area vector of a closed polygon.
///
/// The direction is the polygon normal following the right-hand rule over the
/// vertex order; the length is twice the enclosed area. Works for non-convex
/// polygons and is robust against nearly collinear leading vertices.
#[must_use]
pub fn area_vector(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

/// Unsigned area of a closed planar polygon.
#[must_use]
pub fn polygon_area(points: &[Point3]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    0.5 * area_vector(points).norm()
}

/// Unit normal of a polygon, or `None` when the polygon has no area.
#[must_use]
pub fn polygon_normal(points: &[Point3]) -> Option<Vector3> {
    let v = area_vector(points);
    let len = v.norm();
    (len > TOLERANCE).then(|| v / len)
}

/// Largest distance of any polygon point from the plane.
#[must_use]
pub fn max_plane_deviation(points: &[Point3], plane: &Plane) -> f64 {
    points
        .iter()
        .map(|p| plane.signed_distance(p).abs())
        .fold(0.0, f64::max)
}

/// Arithmetic mean of a point set.
#[must_use]
pub fn average_point(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
    #[allow(clippy::cast_precision_loss)]
    let inv_n = 1.0 / points.len() as f64;
    Some(Point3::from(sum * inv_n))
}

/// Point-in-polygon test for a 3D point coplanar with the polygon.
///
/// Projects into the plane's UV frame and uses the winding number.
/// Points on the boundary may be reported either way.
#[must_use]
pub fn point_in_polygon_3d(point: &Point3, polygon: &[Point3], plane: &Plane) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let uv: Vec<Point2> = polygon.iter().map(|p| plane.project(p)).collect();
    winding_number(&plane.project(point), &uv) != 0
}

fn winding_number(point: &Point2, polygon: &[Point2]) -> i32 {
    let n = polygon.len();
    let mut winding = 0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let side = (b - a).perp(&(point - a));
        if a.y <= point.y {
            if b.y > point.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Clips a segment lying in `plane` to the region of a coplanar polygon.
///
/// Returns the inside portions as `(t_start, t_end)` parameter pairs on the
/// segment, `t` in `[0, 1]`, sorted and merged where contiguous.
#[must_use]
pub fn clip_segment_to_polygon(
    start: &Point3,
    end: &Point3,
    polygon: &[Point3],
    plane: &Plane,
) -> Vec<(f64, f64)> {
    if polygon.len() < 3 {
        return Vec::new();
    }

    let s = plane.project(start);
    let d = plane.project(end) - s;
    let uv: Vec<Point2> = polygon.iter().map(|p| plane.project(p)).collect();

    let mut cuts = vec![0.0, 1.0];
    for i in 0..uv.len() {
        let a = uv[i];
        let e = uv[(i + 1) % uv.len()] - a;
        let denom = d.perp(&e);
        if denom.abs() < TOLERANCE {
            continue;
        }
        let w = a - s;
        let t = w.perp(&e) / denom;
        let u = w.perp(&d) / denom;
        if (-TOLERANCE..=1.0 + TOLERANCE).contains(&t) && (-TOLERANCE..=1.0 + TOLERANCE).contains(&u)
        {
            cuts.push(t.clamp(0.0, 1.0));
        }
    }
    cuts.sort_by(f64::total_cmp);
    cuts.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);

    let mut inside: Vec<(f64, f64)> = Vec::new();
    for pair in cuts.windows(2) {
        let (t0, t1) = (pair[0], pair[1]);
        let mid = s + d * (0.5 * (t0 + t1));
        if winding_number(&mid, &uv) == 0 {
            continue;
        }
        match inside.last_mut() {
            Some(last) if (last.1 - t0).abs() < TOLERANCE => last.1 = t1,
            _ => inside.push((t0, t1)),
        }
    }
    inside
}
