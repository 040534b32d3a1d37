use crate::core::geometry::{EdgeName, Point};
use crate::core::model::WordBoxCore;
use crate::view::Viewport;

/// Transient state for a drag-to-create interaction. Born from a click that
/// hit neither a drag handle nor an existing box; both corners start at the
/// click point and the second follows the cursor.
#[derive(Debug, Clone)]
pub struct NewBoxDraft {
    corners: [Point; 2],
    core: WordBoxCore,
}

impl NewBoxDraft {
    pub fn new(first_corner: Point) -> Self {
        Self {
            corners: [first_corner, first_corner],
            core: WordBoxCore::empty(),
        }
    }

    /// Move the second corner and push the normalized rectangle through the
    /// edge write path. `top` takes the smaller screen y (which the flip
    /// turns into the larger file y).
    pub fn adjust(&mut self, viewport: &Viewport, point: Point) {
        self.corners[1] = point;
        let [a, b] = self.corners;
        let edges = [
            (EdgeName::Left, a.x.min(b.x)),
            (EdgeName::Right, a.x.max(b.x)),
            (EdgeName::Top, a.y.min(b.y)),
            (EdgeName::Bottom, a.y.max(b.y)),
        ];
        for (edge, value) in edges {
            viewport.set_rendered(&mut self.core.displacements, edge, value);
        }
    }

    /// The in-progress rectangle, for preview rendering.
    pub fn core(&self) -> &WordBoxCore {
        &self.core
    }

    /// Finalize the draft. A click with no drag (identical corners) creates
    /// nothing; otherwise the core is handed back for membership in the
    /// collection. The draft is consumed either way.
    pub fn finish(self) -> Option<WordBoxCore> {
        if self.corners[0] == self.corners[1] {
            None
        } else {
            Some(self.core)
        }
    }
}
