mod make_box;
mod make_cylinder;
mod make_face;
mod make_half_space;
mod make_plane_face;
mod make_polyhedron;
mod make_prism;
mod make_solid;
mod make_wire;
mod vertex_merger;

pub use make_box::MakeBox;
pub use make_cylinder::MakeCylinder;
pub use make_face::MakeFace;
pub use make_half_space::MakeHalfSpace;
pub use make_plane_face::MakePlaneFace;
pub use make_polyhedron::{MakePolyhedron, PolygonFace};
pub use make_prism::MakePrism;
pub use make_solid::MakeSolid;
pub use make_wire::MakeWire;

pub(crate) use make_wire::add_line_edge;
pub(crate) use vertex_merger::VertexMerger;
