use crate::error::{OperationError, Result};
use crate::math::{Point2, Point3, TOLERANCE};
use crate::topology::{SolidId, TopologyStore};

use super::MakePrism;

/// Creates an axis-aligned box solid from two corner points.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Executes the operation, creating the box in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] unless `min_corner` is
    /// strictly below `max_corner` on every axis.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        let (lo, hi) = (self.min_corner, self.max_corner);
        if (0..3).any(|axis| hi[axis] - lo[axis] < TOLERANCE) {
            return Err(OperationError::InvalidInput(format!(
                "box corners {lo} .. {hi} do not span a volume"
            ))
            .into());
        }
        let footprint = vec![
            Point2::new(lo.x, lo.y),
            Point2::new(hi.x, lo.y),
            Point2::new(hi.x, hi.y),
            Point2::new(lo.x, hi.y),
        ];
        MakePrism::new(footprint, lo.z, hi.z - lo.z).execute(store)
    }
}
