//! Rendered geometry: the scaled screen-space projection of word boxes.
//!
//! File coordinates put the origin bottom-left with y growing upward; the
//! screen puts it top-left with y growing downward. Horizontal values only
//! differ by the zoom scale, vertical values are additionally flipped against
//! the image height on the write path.

pub mod drag;

use crate::core::geometry::{Axis, Displacements, EdgeName, Point};

pub use drag::DragHandle;

/// The scale factor and image context shared by every projection.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// File-to-screen zoom factor.
    pub scale: f32,
    /// Pixel height of the buffered raster image, used for the vertical flip.
    pub image_height: u32,
}

impl Viewport {
    pub fn new(scale: f32, image_height: u32) -> Self {
        Self {
            scale,
            image_height,
        }
    }

    /// Rendered displacement of one edge: `round(scale * file_value)`.
    ///
    /// No flip happens on the read path; rendering draws in flipped image
    /// coordinates and the hit tests flip explicitly.
    pub fn rendered(&self, displacements: &Displacements, edge: EdgeName) -> i32 {
        (self.scale * displacements.edge(edge) as f32).round() as i32
    }

    /// Write path for a drag: store a new rendered value back into the file
    /// coordinates. Vertical edges are flipped against the image height
    /// first, then both axes divide out the scale.
    pub fn set_rendered(&self, displacements: &mut Displacements, edge: EdgeName, value: i32) {
        let value = match edge.axis() {
            Axis::Vertical => self.image_height as i32 - value,
            Axis::Horizontal => value,
        };
        displacements.set_edge(edge, (value as f32 / self.scale).round() as i32);
    }

    /// Centerline of a subgroup: the average of its two members' rendered
    /// displacements.
    pub fn centerline(&self, displacements: &Displacements, axis: Axis) -> i32 {
        let [a, b] = axis.edges();
        (self.rendered(displacements, a) + self.rendered(displacements, b)) / 2
    }

    /// Midpoint of an edge segment in 2-D rendered space: the edge's own
    /// displacement along its primary axis, the adjacent subgroup's
    /// centerline along the perpendicular one.
    pub fn edge_center(&self, displacements: &Displacements, edge: EdgeName) -> Point {
        let own = self.rendered(displacements, edge);
        let across = self.centerline(displacements, edge.axis().adjacent());
        match edge.axis() {
            Axis::Horizontal => Point::new(own, across),
            Axis::Vertical => Point::new(across, own),
        }
    }

    /// The whole box projected into rendered space (still unflipped).
    pub fn rendered_displacements(&self, displacements: &Displacements) -> Displacements {
        Displacements::new(
            self.rendered(displacements, EdgeName::Left),
            self.rendered(displacements, EdgeName::Top),
            self.rendered(displacements, EdgeName::Right),
            self.rendered(displacements, EdgeName::Bottom),
        )
    }

    /// Hit test for a word box: scale the rectangle, then flip and compare.
    pub fn contains(&self, displacements: &Displacements, point: Point) -> bool {
        contains_rendered(
            &self.rendered_displacements(displacements),
            self.image_height,
            point,
        )
    }
}

/// Inclusive containment over an already-rendered rectangle. The top/bottom
/// displacements are flipped against the image height so the comparison
/// happens in screen orientation.
pub fn contains_rendered(rendered: &Displacements, image_height: u32, point: Point) -> bool {
    let left = rendered.left;
    let right = rendered.right;
    let top = image_height as i32 - rendered.top;
    let bottom = image_height as i32 - rendered.bottom;
    (left <= point.x && point.x <= right) && (top <= point.y && point.y <= bottom)
}
