pub mod analysis;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod report;
pub mod scene;
pub mod topology;

pub use error::{Result, SpaceError};
