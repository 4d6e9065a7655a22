use crate::error::{OperationError, Result};
use crate::geometry::curve::Line;
use crate::math::{Point3, DISTANCE_TOLERANCE};
use crate::topology::{
    EdgeCurve, EdgeData, EdgeId, OrientedEdge, TopologyStore, VertexData, VertexId, WireData,
    WireId,
};

/// Creates a polyline wire from a sequence of 3D points.
///
/// With `close` set, an extra edge joins the last point back to the first.
pub struct MakeWire {
    points: Vec<Point3>,
    close: bool,
}

impl MakeWire {
    /// Creates a new `MakeWire` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, close: bool) -> Self {
        Self { points, close }
    }

    /// Executes the operation, creating the wire in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if there are too few points
    /// or two consecutive points coincide.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        let min_points = if self.close { 3 } else { 2 };
        if self.points.len() < min_points {
            return Err(OperationError::InvalidInput(format!(
                "wire needs at least {min_points} points, got {}",
                self.points.len()
            ))
            .into());
        }

        let vertices: Vec<VertexId> = self
            .points
            .iter()
            .map(|p| store.add_vertex(VertexData::new(*p)))
            .collect();

        let n = vertices.len();
        let edge_count = if self.close { n } else { n - 1 };
        let mut edges = Vec::with_capacity(edge_count);
        for i in 0..edge_count {
            let j = (i + 1) % n;
            let edge = add_line_edge(store, vertices[i], vertices[j])?;
            edges.push(OrientedEdge::new(edge, true));
        }

        Ok(store.add_wire(WireData {
            edges,
            is_closed: self.close,
        }))
    }
}

/// Inserts a straight edge between two existing vertices.
///
/// # Errors
///
/// Returns an error if the vertices are missing or closer than
/// [`DISTANCE_TOLERANCE`].
pub(crate) fn add_line_edge(
    store: &mut TopologyStore,
    start: VertexId,
    end: VertexId,
) -> Result<EdgeId> {
    let a = store.vertex(start)?.point;
    let b = store.vertex(end)?.point;
    let length = (b - a).norm();
    if length < DISTANCE_TOLERANCE {
        return Err(OperationError::InvalidInput("edge endpoints coincide".into()).into());
    }
    Ok(store.add_edge(EdgeData {
        start,
        end,
        curve: EdgeCurve::Line(Line::through(a, b)?),
        t_start: 0.0,
        t_end: length,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn closed_triangle_has_3_edges() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)], true)
            .execute(&mut store)
            .unwrap();
        let data = store.wire(wire).unwrap();
        assert_eq!(data.edges.len(), 3);
        assert!(data.is_closed);
        assert_eq!(store.wire_points(wire).unwrap().len(), 3);
    }

    #[test]
    fn open_polyline_has_n_minus_1_edges() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 1.0, 0.0)], false)
            .execute(&mut store)
            .unwrap();
        let data = store.wire(wire).unwrap();
        assert_eq!(data.edges.len(), 2);
        assert!(!data.is_closed);
    }

    #[test]
    fn closed_wire_with_two_points_fails() {
        let mut store = TopologyStore::new();
        let result = MakeWire::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)], true).execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn coincident_points_fail() {
        let mut store = TopologyStore::new();
        let result = MakeWire::new(vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)], false)
            .execute(&mut store);
        assert!(result.is_err());
    }
}
