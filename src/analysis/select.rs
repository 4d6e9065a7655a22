use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::geometry::surface::Plane;
use crate::math::{Point3, TOLERANCE};
use crate::operations::query::BoundingBox;
use crate::topology::{SolidId, TopologyStore};

use super::config::VolumeSettings;

/// How an element contributes bounding planes to the interior volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRole {
    /// Vertical faces turned away from the scene center.
    Wall,
    /// Upward-facing faces.
    Roof,
}

/// Planes picked from one element's faces.
#[derive(Debug, Clone, Default)]
pub struct FaceSelection {
    /// Selected face planes, outward normals, in face order.
    pub planes: Vec<Plane>,
    /// Faces skipped because they are not planar.
    pub non_planar_faces: usize,
}

/// Picks the faces of `solid` that bound the interior space.
///
/// The thresholds apply to the material-side normal, the reverse of the
/// face's outward normal. For walls the selected faces are the vertical
/// faces whose material-side normal points away from `center`, measured
/// from the center of the face's bounding box: the inner wall faces. For
/// roofs they are the faces whose material-side normal points steeply up:
/// the roof undersides. Curved faces are counted and skipped.
///
/// # Errors
///
/// Returns an error if the solid's topology cannot be read.
pub fn select_bounding_planes(
    store: &TopologyStore,
    solid: SolidId,
    role: ElementRole,
    center: &Point3,
    settings: &VolumeSettings,
) -> Result<FaceSelection> {
    let mut selection = FaceSelection::default();
    for face in store.solid_faces(solid)? {
        let Some(plane) = store.face(face)?.plane() else {
            selection.non_planar_faces += 1;
            continue;
        };
        let inward = -plane.plane_normal();

        let selected = match role {
            ElementRole::Roof => inward.z > settings.roof_normal_z,
            ElementRole::Wall => {
                if inward.z.abs() > settings.horizontal_tolerance {
                    continue;
                }
                let face_center = BoundingBox::face(face).execute(store)?.center();
                let Some(to_center) = (center - face_center).try_normalize(TOLERANCE) else {
                    debug!(?face, "wall face centered on the scene center");
                    continue;
                };
                to_center.dot(&inward) < settings.wall_dot_threshold
            }
        };

        if selected {
            debug!(?face, ?role, normal = ?plane.plane_normal(), "face selected");
            selection.planes.push(plane.clone());
        }
    }
    Ok(selection)
}
