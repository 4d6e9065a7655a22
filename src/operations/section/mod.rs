mod connect;
pub(crate) mod plane_cut;
mod section;

pub use connect::{ConnectEdges, ConnectedWires, DEFAULT_CONNECT_TOLERANCE};
pub use section::Section;

pub(crate) use connect::chain_segments;
