mod area;
mod bounding_box;
mod is_valid;
mod volume;

pub use area::FaceArea;
pub use bounding_box::{Aabb, BoundingBox};
pub use is_valid::IsValid;
pub use volume::Volume;
