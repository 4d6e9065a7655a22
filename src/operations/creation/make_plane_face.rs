use crate::error::{OperationError, Result};
use crate::geometry::surface::{Plane, Surface};
use crate::topology::{FaceId, TopologyStore};

use super::{MakeFace, MakeWire};

/// Creates a rectangular face on a plane, bounded in the plane's `(u, v)` frame.
///
/// The face normal equals the plane normal.
pub struct MakePlaneFace {
    plane: Plane,
    u_range: (f64, f64),
    v_range: (f64, f64),
}

impl MakePlaneFace {
    /// Creates a new `MakePlaneFace` operation.
    #[must_use]
    pub fn new(plane: Plane, u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            plane,
            u_range: (u_min, u_max),
            v_range: (v_min, v_max),
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for an empty parameter range.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        let (u0, u1) = self.u_range;
        let (v0, v1) = self.v_range;
        if u1 <= u0 || v1 <= v0 {
            return Err(OperationError::InvalidInput(format!(
                "empty face bounds u=[{u0}, {u1}] v=[{v0}, {v1}]"
            ))
            .into());
        }

        let corners = [(u0, v0), (u1, v0), (u1, v1), (u0, v1)]
            .iter()
            .map(|&(u, v)| self.plane.evaluate(u, v))
            .collect::<Result<Vec<_>>>()?;
        let wire = MakeWire::new(corners, true).execute(store)?;
        MakeFace::new(wire, vec![]).execute(store)
    }
}
