use crate::error::Result;
use crate::math::polygon_3d::polygon_area;
use crate::topology::{FaceId, TopologyStore};

/// Computes the unsigned area of a face: outer boundary minus holes.
pub struct FaceArea {
    face: FaceId,
}

impl FaceArea {
    /// Creates a new `FaceArea` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or its boundary is missing.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        let loops = store.face_loops(self.face)?;
        let mut iter = loops.iter();
        let outer = iter.next().map_or(0.0, |lp| polygon_area(lp));
        let holes: f64 = iter.map(|lp| polygon_area(lp)).sum();
        Ok((outer - holes).max(0.0))
    }
}
