use crate::core::geometry::{Axis, Displacements, EdgeName, Point};
use crate::view::{contains_rendered, Viewport};

/// Half-width of a drag handle's hit square, in rendered units.
pub const DEFAULT_HANDLE_SIZE: i32 = 4;

/// A small square centered on an edge's midpoint. Purely a hit-test and drag
/// affordance; the rectangle it edits lives in the word box core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragHandle {
    pub edge: EdgeName,
    pub size: i32,
}

impl DragHandle {
    pub fn new(edge: EdgeName) -> Self {
        Self {
            edge,
            size: DEFAULT_HANDLE_SIZE,
        }
    }

    /// The four handles of one box, in activation order.
    pub fn for_box() -> [DragHandle; 4] {
        EdgeName::ALL.map(DragHandle::new)
    }

    /// Bounds of the hit square in rendered space, centered on the edge
    /// midpoint.
    pub fn bounds(&self, viewport: &Viewport, displacements: &Displacements) -> Displacements {
        let center = viewport.edge_center(displacements, self.edge);
        Displacements::new(
            center.x - self.size,
            center.y + self.size,
            center.x + self.size,
            center.y - self.size,
        )
    }

    pub fn contains(
        &self,
        viewport: &Viewport,
        displacements: &Displacements,
        point: Point,
    ) -> bool {
        contains_rendered(
            &self.bounds(viewport, displacements),
            viewport.image_height,
            point,
        )
    }

    /// Drag the handle to a new location: only the component along the
    /// edge's own axis takes effect, fed through the flip-aware write path.
    pub fn drag_to(
        &self,
        viewport: &Viewport,
        displacements: &mut Displacements,
        point: Point,
    ) {
        let value = match self.edge.axis() {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        };
        viewport.set_rendered(displacements, self.edge, value);
    }

    /// First handle (in activation order) of the given box that contains the
    /// point.
    pub fn activate(
        viewport: &Viewport,
        displacements: &Displacements,
        point: Point,
    ) -> Option<DragHandle> {
        Self::for_box()
            .into_iter()
            .find(|handle| handle.contains(viewport, displacements, point))
    }
}
