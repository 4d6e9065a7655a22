pub mod curve;
pub mod half_space;
pub mod surface;

pub use curve::{Curve, CurveDomain, Line};
pub use half_space::HalfSpace;
pub use surface::{Cylinder, Plane, Surface, SurfaceDomain};
