use std::collections::HashMap;

use crate::math::Point3;
use crate::topology::{TopologyStore, VertexData, VertexId};

/// Spatial-hash vertex merger.
///
/// Points are bucketed on a grid of `tolerance`-sized cells; a query looks at
/// the 27 surrounding cells so a match is found regardless of where the
/// point falls inside its cell.
pub(crate) struct VertexMerger {
    tolerance: f64,
    cells: HashMap<(i64, i64, i64), Vec<(VertexId, Point3)>>,
}

impl VertexMerger {
    pub(crate) fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            cells: HashMap::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell(&self, p: &Point3) -> (i64, i64, i64) {
        let inv = 1.0 / self.tolerance;
        (
            (p.x * inv).floor() as i64,
            (p.y * inv).floor() as i64,
            (p.z * inv).floor() as i64,
        )
    }

    /// Returns an existing vertex within tolerance of `point`, or inserts one.
    pub(crate) fn get_or_create(&mut self, store: &mut TopologyStore, point: &Point3) -> VertexId {
        let (cx, cy, cz) = self.cell(point);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(entries) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    if let Some(&(id, _)) = entries
                        .iter()
                        .find(|(_, q)| (point - q).norm() < self.tolerance)
                    {
                        return id;
                    }
                }
            }
        }

        let id = store.add_vertex(VertexData::new(*point));
        self.cells.entry((cx, cy, cz)).or_default().push((id, *point));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_points_share_a_vertex() {
        let mut store = TopologyStore::new();
        let mut merger = VertexMerger::new(1e-6);
        let a = merger.get_or_create(&mut store, &Point3::new(1.0, 1.0, 1.0));
        let b = merger.get_or_create(&mut store, &Point3::new(1.0 + 4e-7, 1.0, 1.0 - 4e-7));
        let c = merger.get_or_create(&mut store, &Point3::new(1.0 + 1e-3, 1.0, 1.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
