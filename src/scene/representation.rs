use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::{Point2, Point3};
use crate::operations::creation::{
    MakeBox, MakeCylinder, MakePolyhedron, MakePrism, PolygonFace,
};
use crate::topology::{SolidId, TopologyStore};

fn default_segments() -> usize {
    16
}

/// Geometry of a scene element, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Representation {
    /// Axis-aligned box between two corners.
    Box { min: [f64; 3], max: [f64; 3] },

    /// Horizontal footprint extruded upwards from `base` by `height`.
    Prism {
        footprint: Vec<[f64; 2]>,
        base: f64,
        height: f64,
    },

    /// Vertical faceted cylinder standing on `center`.
    Cylinder {
        center: [f64; 3],
        radius: f64,
        height: f64,
        #[serde(default = "default_segments")]
        segments: usize,
    },

    /// Closed polyhedron; each face is a loop counter-clockwise seen from outside.
    Polyhedron { faces: Vec<Vec<[f64; 3]>> },
}

impl Representation {
    /// Builds the solid in `store`.
    ///
    /// # Errors
    ///
    /// Returns the kernel error if the geometry does not describe a valid solid.
    pub fn to_solid(&self, store: &mut TopologyStore) -> Result<SolidId> {
        match self {
            Self::Box { min, max } => {
                MakeBox::new(Point3::from(*min), Point3::from(*max)).execute(store)
            }
            Self::Prism {
                footprint,
                base,
                height,
            } => {
                let footprint = footprint.iter().map(|&q| Point2::from(q)).collect();
                MakePrism::new(footprint, *base, *height).execute(store)
            }
            Self::Cylinder {
                center,
                radius,
                height,
                segments,
            } => MakeCylinder::new(Point3::from(*center), *radius, *height, *segments).execute(store),
            Self::Polyhedron { faces } => {
                let faces = faces
                    .iter()
                    .map(|lp| PolygonFace::planar(lp.iter().map(|&q| Point3::from(q)).collect()))
                    .collect();
                MakePolyhedron::new(faces).execute(store)
            }
        }
    }
}
