//! The two building analyses and the stages they are made of.
//!
//! * [`interior_volume`]: bounding box of the walls, selection of the wall
//!   and roof faces that bound the interior, half-space reduction of an
//!   oversized box, volume of the result.
//! * [`story_sections`]: horizontal slices at a series of heights, section
//!   of every product, wire reconstruction and area sums.
//!
//! Both take the topology store and settings explicitly and report progress
//! through a [`Progress`] sink.

mod bounds;
mod config;
mod events;
mod interior;
mod reduce;
mod select;
mod slicing;
mod story;

pub use bounds::aggregate_bounds;
pub use config::{AnalysisConfig, SectionSettings, VolumeSettings};
pub use events::{AnalysisEvent, Progress, Silent, SkipReason, Stage};
pub use interior::interior_volume;
pub use reduce::{measure_volume, reduce_half_spaces};
pub use select::{select_bounding_planes, ElementRole, FaceSelection};
pub use slicing::{slice_face, SliceHeights};
pub use story::story_sections;
