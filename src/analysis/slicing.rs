use crate::error::Result;
use crate::geometry::surface::Plane;
use crate::operations::creation::MakePlaneFace;
use crate::topology::{FaceId, TopologyStore};

use super::config::SectionSettings;

/// Slack on the upper bound so that `max` itself is reached despite rounding.
const HEIGHT_SLACK: f64 = 1e-9;

/// Section heights `start, start + step, ...` up to and including `max`.
///
/// Heights are computed from their index, so no rounding error accumulates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceHeights {
    start: f64,
    max: f64,
    step: f64,
}

impl SliceHeights {
    /// Heights described by validated section settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn new(settings: &SectionSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            start: settings.start,
            max: settings.max,
            step: settings.step,
        })
    }

    /// Iterates the heights in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0_u32..)
            .map(|i| self.start + f64::from(i) * self.step)
            .take_while(|&h| h <= self.max + HEIGHT_SLACK)
    }
}

/// Creates the square horizontal face `[-extent, extent]²` at `height`.
///
/// # Errors
///
/// Returns an error if `extent` is not positive.
pub fn slice_face(store: &mut TopologyStore, height: f64, extent: f64) -> Result<FaceId> {
    MakePlaneFace::new(Plane::horizontal(height), -extent, extent, -extent, extent).execute(store)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::{BoundingBox, FaceArea};
    use approx::assert_relative_eq;

    fn heights(start: f64, max: f64, step: f64) -> Vec<f64> {
        let settings = SectionSettings {
            start,
            max,
            step,
            ..SectionSettings::default()
        };
        SliceHeights::new(&settings).unwrap().iter().collect()
    }

    #[test]
    fn default_heights() {
        assert_eq!(heights(0.0, 1.5, 0.5), vec![0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn max_is_reached_despite_rounding() {
        let hs = heights(0.0, 0.3, 0.1);
        assert_eq!(hs.len(), 4);
        assert_relative_eq!(hs[3], 0.3, epsilon = 1e-12);
    }

    #[test]
    fn start_equal_to_max_gives_one_height() {
        assert_eq!(heights(2.0, 2.0, 0.5), vec![2.0]);
    }

    #[test]
    fn invalid_step_is_rejected() {
        let settings = SectionSettings {
            step: 0.0,
            ..SectionSettings::default()
        };
        assert!(SliceHeights::new(&settings).is_err());
    }

    #[test]
    fn slice_face_is_square_at_height() {
        let mut store = TopologyStore::new();
        let face = slice_face(&mut store, 1.25, 10.0).unwrap();
        assert_relative_eq!(FaceArea::new(face).execute(&store).unwrap(), 400.0, epsilon = 1e-9);
        let bounds = BoundingBox::face(face).execute(&store).unwrap();
        assert_relative_eq!(bounds.min.z, 1.25);
        assert_relative_eq!(bounds.max.z, 1.25);
        let normal = store.face(face).unwrap().plane().unwrap().plane_normal().z;
        assert_relative_eq!(normal, 1.0);
    }
}
