use tracing::{debug, info};

use crate::error::{AnalysisError, Result, SpaceError};
use crate::geometry::surface::Plane;
use crate::math::Point3;
use crate::operations::boolean::Common;
use crate::operations::creation::MakeHalfSpace;
use crate::operations::query::{IsValid, Volume};
use crate::topology::{SolidId, TopologyStore};

use super::events::{AnalysisEvent, Progress};

/// Smallest volume accepted for a reduced solid.
const MIN_VOLUME: f64 = 1e-9;

/// Intersects `initial` with the half-space of every plane that contains
/// `reference`, in order.
///
/// With no planes the initial solid is returned as is.
///
/// # Errors
///
/// Returns [`AnalysisError::DegenerateReduction`] naming the index of the
/// first plane whose half-space cannot be built, or whose application fails
/// or leaves an invalid or empty solid.
pub fn reduce_half_spaces(
    store: &mut TopologyStore,
    initial: SolidId,
    planes: &[Plane],
    reference: &Point3,
    progress: &mut impl Progress,
) -> Result<SolidId> {
    let mut current = initial;
    for (step, plane) in planes.iter().enumerate() {
        let degenerate = |reason: String| -> SpaceError {
            AnalysisError::DegenerateReduction { step, reason }.into()
        };

        let half_space = MakeHalfSpace::new(plane.clone(), *reference)
            .execute()
            .map_err(|e| degenerate(e.to_string()))?;
        let next = Common::new(current, half_space)
            .execute(store)
            .map_err(|e| degenerate(e.to_string()))?;
        if !IsValid::new(next).execute(store) {
            return Err(degenerate("result is not a closed solid".into()));
        }
        let volume = Volume::new(next).execute(store)?;
        if volume < MIN_VOLUME {
            return Err(degenerate(format!("result has no volume ({volume:.3e})")));
        }

        debug!(step, volume, "half-space applied");
        progress.on_event(&AnalysisEvent::HalfSpaceApplied { step, volume });
        current = next;
    }
    info!(half_spaces = planes.len(), "space reduced");
    Ok(current)
}

/// Volume of a reduced solid.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyVolume`] if the volume is not positive,
/// which means the solid is inside out or flat.
pub fn measure_volume(store: &TopologyStore, solid: SolidId) -> Result<f64> {
    let volume = Volume::new(solid).execute(store)?;
    if volume < MIN_VOLUME {
        return Err(AnalysisError::EmptyVolume { volume }.into());
    }
    Ok(volume)
}
