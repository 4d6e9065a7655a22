use tracing::debug;

use crate::error::Result;
use crate::math::Point3;
use crate::topology::{EdgeId, OrientedEdge, TopologyStore, WireData, WireId};

/// Default endpoint matching tolerance for [`ConnectEdges`].
pub const DEFAULT_CONNECT_TOLERANCE: f64 = 1e-5;

/// Wires built by [`ConnectEdges`].
#[derive(Debug, Clone, Default)]
pub struct ConnectedWires {
    /// Wires whose last edge ends where the first one starts.
    pub closed: Vec<WireId>,
    /// Chains that could not be closed.
    pub open: Vec<WireId>,
}

/// Reassembles loose edges into wires.
///
/// Edges are chained greedily by endpoint proximity: a chain is grown
/// forward from its end, then backward from its start, preferring edges in
/// their natural direction. Every input edge ends up in exactly one wire.
pub struct ConnectEdges {
    edges: Vec<EdgeId>,
    tolerance: f64,
}

impl ConnectEdges {
    /// Creates a new `ConnectEdges` operation.
    #[must_use]
    pub fn new(edges: Vec<EdgeId>, tolerance: f64) -> Self {
        Self { edges, tolerance }
    }

    /// Executes the operation, adding the wires to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge or its vertices are missing.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<ConnectedWires> {
        let segments = self
            .edges
            .iter()
            .map(|&e| store.edge_points(e))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut wires = ConnectedWires::default();
        for chain in chain_segments(&segments, self.tolerance) {
            let edges = chain
                .links
                .iter()
                .map(|&(i, forward)| OrientedEdge::new(self.edges[i], forward))
                .collect();
            let wire = store.add_wire(WireData {
                edges,
                is_closed: chain.closed,
            });
            if chain.closed {
                wires.closed.push(wire);
            } else {
                wires.open.push(wire);
            }
        }

        debug!(
            edges = self.edges.len(),
            closed = wires.closed.len(),
            open = wires.open.len(),
            "edges connected"
        );
        Ok(wires)
    }
}

/// A chain of segments: `(segment index, forward)` in traversal order.
#[derive(Debug, Clone)]
pub(crate) struct Chain {
    pub(crate) links: Vec<(usize, bool)>,
    pub(crate) closed: bool,
}

/// Chains segments by endpoint proximity.
///
/// Chains are started from the lowest unused index, so the output order
/// follows the input order. A chain is closed when it has at least three
/// segments and its two ends meet.
pub(crate) fn chain_segments(segments: &[(Point3, Point3)], tolerance: f64) -> Vec<Chain> {
    let near = |a: &Point3, b: &Point3| (a - b).norm() <= tolerance;
    let oriented = |(i, forward): (usize, bool)| {
        let (s, e) = segments[i];
        if forward {
            (s, e)
        } else {
            (e, s)
        }
    };

    let mut used = vec![false; segments.len()];
    let mut chains = Vec::new();

    for seed in 0..segments.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        let mut links = vec![(seed, true)];
        let (mut head, mut tail) = segments[seed];

        // Forward from the tail.
        while !near(&tail, &head) {
            let next = pick(segments, &used, |s, e| {
                if near(s, &tail) {
                    Some(true)
                } else if near(e, &tail) {
                    Some(false)
                } else {
                    None
                }
            });
            let Some(link) = next else { break };
            used[link.0] = true;
            links.push(link);
            tail = oriented(link).1;
        }

        // Backward from the head.
        while !near(&tail, &head) {
            let prev = pick(segments, &used, |s, e| {
                if near(e, &head) {
                    Some(true)
                } else if near(s, &head) {
                    Some(false)
                } else {
                    None
                }
            });
            let Some(link) = prev else { break };
            used[link.0] = true;
            links.insert(0, link);
            head = oriented(link).0;
        }

        let closed = links.len() >= 3 && near(&tail, &head);
        chains.push(Chain { links, closed });
    }
    chains
}

/// First unused segment accepted by `accept`, preferring a natural-direction
/// match anywhere over a reversed one.
fn pick(
    segments: &[(Point3, Point3)],
    used: &[bool],
    accept: impl Fn(&Point3, &Point3) -> Option<bool>,
) -> Option<(usize, bool)> {
    let mut reversed = None;
    for (i, (s, e)) in segments.iter().enumerate() {
        if used[i] {
            continue;
        }
        match accept(s, e) {
            Some(true) => return Some((i, true)),
            Some(false) if reversed.is_none() => reversed = Some((i, false)),
            _ => {}
        }
    }
    reversed
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::add_line_edge;
    use crate::operations::creation::MakeFace;
    use crate::operations::query::FaceArea;
    use crate::topology::VertexData;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn loose_edge(store: &mut TopologyStore, a: Point3, b: Point3) -> EdgeId {
        let va = store.add_vertex(VertexData::new(a));
        let vb = store.add_vertex(VertexData::new(b));
        add_line_edge(store, va, vb).unwrap()
    }

    #[test]
    fn shuffled_square_closes() {
        let mut store = TopologyStore::new();
        // Out of order, one edge reversed, endpoints off by less than the tolerance.
        let edges = vec![
            loose_edge(&mut store, p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)),
            loose_edge(&mut store, p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)),
            loose_edge(&mut store, p(0.0, 0.0, 0.0), p(0.0, 1.000_001, 0.0)),
            loose_edge(&mut store, p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)),
        ];
        let wires = ConnectEdges::new(edges, DEFAULT_CONNECT_TOLERANCE)
            .execute(&mut store)
            .unwrap();
        assert_eq!(wires.closed.len(), 1);
        assert!(wires.open.is_empty());
        assert_eq!(store.wire(wires.closed[0]).unwrap().edges.len(), 4);

        let face = MakeFace::new(wires.closed[0], vec![]).execute(&mut store).unwrap();
        assert_relative_eq!(FaceArea::new(face).execute(&store).unwrap(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn backward_extension_completes_chain() {
        let segments = vec![
            (p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)),
            (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)),
            (p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0)),
        ];
        let chains = chain_segments(&segments, 1e-9);
        assert_eq!(chains.len(), 1);
        assert!(!chains[0].closed);
        assert_eq!(chains[0].links, vec![(1, true), (0, true), (2, true)]);
    }

    #[test]
    fn separate_loops_stay_separate() {
        let square = |x0: f64| {
            let c = [p(x0, 0.0, 0.0), p(x0 + 1.0, 0.0, 0.0), p(x0 + 1.0, 1.0, 0.0), p(x0, 1.0, 0.0)];
            (0..4).map(move |i| (c[i], c[(i + 1) % 4])).collect::<Vec<_>>()
        };
        let mut segments = square(0.0);
        segments.extend(square(5.0));
        let chains = chain_segments(&segments, 1e-9);
        assert_eq!(chains.len(), 2);
        assert!(chains.iter().all(|c| c.closed && c.links.len() == 4));
    }

    #[test]
    fn dangling_edge_is_open() {
        let mut store = TopologyStore::new();
        let edges = vec![
            loose_edge(&mut store, p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)),
            loose_edge(&mut store, p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)),
        ];
        let wires = ConnectEdges::new(edges, DEFAULT_CONNECT_TOLERANCE)
            .execute(&mut store)
            .unwrap();
        assert!(wires.closed.is_empty());
        assert_eq!(wires.open.len(), 1);
        assert!(!store.wire(wires.open[0]).unwrap().is_closed);
    }

    #[test]
    fn empty_input_gives_no_wires() {
        let mut store = TopologyStore::new();
        let wires = ConnectEdges::new(vec![], DEFAULT_CONNECT_TOLERANCE)
            .execute(&mut store)
            .unwrap();
        assert!(wires.closed.is_empty() && wires.open.is_empty());
    }
}
