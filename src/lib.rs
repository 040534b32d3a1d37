pub mod codec;
pub mod core;
pub mod ocr;
pub mod session;
pub mod view;

pub use crate::core::geometry::{Axis, Displacements, EdgeName, Point};
pub use crate::core::model::WordBoxCore;
pub use crate::session::{EditSession, WordBoxes};
pub use crate::view::Viewport;
