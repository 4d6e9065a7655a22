use crate::error::{GeometryError, Result};
use crate::math::Point3;
use crate::topology::{FaceId, SolidId, TopologyStore};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Box of a single point.
    #[must_use]
    pub fn at(point: Point3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Smallest box holding all points, or `None` for no points.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::at(*first), |acc, p| acc.include(p)))
    }

    /// The box grown to hold `point`.
    #[must_use]
    pub fn include(&self, point: &Point3) -> Self {
        Self {
            min: self.min.inf(point),
            max: self.max.sup(point),
        }
    }

    /// The smallest box holding both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Whether `other` lies inside this box (boundaries included).
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        (0..3).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }

    /// Enclosed volume (zero for flat boxes).
    #[must_use]
    pub fn volume(&self) -> f64 {
        let d = self.max - self.min;
        d.x * d.y * d.z
    }
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Solid(SolidId),
    Face(FaceId),
}

/// Computes the axis-aligned bounding box of a solid or a face from its
/// vertex positions. Exact for the faceted geometry this kernel stores.
pub struct BoundingBox {
    target: Target,
}

impl BoundingBox {
    /// Bounding box of a solid.
    #[must_use]
    pub fn solid(solid: SolidId) -> Self {
        Self {
            target: Target::Solid(solid),
        }
    }

    /// Bounding box of a single face.
    #[must_use]
    pub fn face(face: FaceId) -> Self {
        Self {
            target: Target::Face(face),
        }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if an entity is missing or the target has no vertices.
    pub fn execute(&self, store: &TopologyStore) -> Result<Aabb> {
        let points = match self.target {
            Target::Solid(id) => store.solid_points(id)?,
            Target::Face(id) => store.face_loops(id)?.into_iter().flatten().collect(),
        };
        Aabb::from_points(&points)
            .ok_or_else(|| GeometryError::Degenerate("bounding box of an empty shape".into()).into())
    }
}
