mod common;

pub use common::Common;
