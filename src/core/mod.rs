pub mod geometry;
pub mod model;

pub use geometry::{Axis, Displacements, EdgeName, Point};
pub use model::WordBoxCore;
