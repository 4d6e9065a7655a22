use crate::error::{AnalysisError, Result};
use crate::operations::query::{Aabb, BoundingBox};
use crate::topology::{SolidId, TopologyStore};

/// Union of the bounding boxes of `solids`.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptySolidSet`] if `solids` is empty, or an
/// error if a solid cannot be measured.
pub fn aggregate_bounds(store: &TopologyStore, solids: &[SolidId]) -> Result<Aabb> {
    let mut total: Option<Aabb> = None;
    for &solid in solids {
        let bounds = BoundingBox::solid(solid).execute(store)?;
        total = Some(match total {
            Some(acc) => acc.union(&bounds),
            None => bounds,
        });
    }
    total.ok_or_else(|| AnalysisError::EmptySolidSet.into())
}
