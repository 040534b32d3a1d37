//! The editing session: the ordered box collection, the active selection,
//! and the event-level interaction flow (press, drag, release, delete,
//! edit text). One session corresponds to one open document.

pub mod draft;
pub mod prompt;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::codec::{self, ParseWarning};
use crate::core::geometry::Point;
use crate::core::model::WordBoxCore;
use crate::view::{DragHandle, Viewport};

pub use draft::NewBoxDraft;
pub use prompt::{launch_text_editor_dialog, TextPrompt};

/// Ordered collection of all word boxes in the document. Insertion order is
/// file order for loaded documents and append order for created boxes.
#[derive(Debug, Clone, Default)]
pub struct WordBoxes {
    items: Vec<WordBoxCore>,
}

impl WordBoxes {
    pub fn new(cores: Vec<WordBoxCore>) -> Self {
        Self { items: cores }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordBoxCore> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut WordBoxCore> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordBoxCore> {
        self.items.iter()
    }

    pub fn push(&mut self, core: WordBoxCore) {
        self.items.push(core);
    }

    /// Indices of every box whose rendered rectangle contains the point.
    pub fn containing<'a>(
        &'a self,
        viewport: &'a Viewport,
        point: Point,
    ) -> impl Iterator<Item = usize> + 'a {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, core)| viewport.contains(&core.displacements, point))
            .map(|(index, _)| index)
    }

    /// First hit in collection order, if any.
    pub fn select(&self, viewport: &Viewport, point: Point) -> Option<usize> {
        self.containing(viewport, point).next()
    }

    /// Remove the box at `index`, or `None` when the index is out of range.
    /// Deletion never panics on a stale index.
    pub fn remove(&mut self, index: usize) -> Option<WordBoxCore> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// The box-file text for the whole collection, in order.
    pub fn file_representation(&self) -> String {
        codec::serialize(&self.items)
    }
}

/// The interaction in flight, if any. The UI event sequence guarantees at
/// most one at a time.
#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    /// Dragging one edge of the active box.
    DraggingEdge(DragHandle),
    /// Rubber-banding a new box.
    Creating(NewBoxDraft),
}

/// Application context for one open document. All interaction state lives
/// here rather than in process-wide globals, so the whole flow runs and
/// tests headless.
#[derive(Debug)]
pub struct EditSession {
    pub viewport: Viewport,
    pub boxes: WordBoxes,
    active: Option<usize>,
    gesture: Gesture,
    path: PathBuf,
}

impl EditSession {
    pub fn new(boxes: WordBoxes, viewport: Viewport, path: PathBuf) -> Self {
        Self {
            viewport,
            boxes,
            active: None,
            gesture: Gesture::Idle,
            path,
        }
    }

    /// Load a box file into a fresh session. The path may name either the
    /// box file or the image it annotates; it is normalized to the `.box`
    /// sibling, which also becomes the save target. `image_height` comes
    /// from the decoded raster; this crate never decodes pixels itself.
    /// Parse defects are returned for the caller to report.
    pub fn load(path: &Path, scale: f32, image_height: u32) -> Result<(Self, Vec<ParseWarning>)> {
        let box_path = path.with_extension("box");
        let outcome = codec::load(&box_path)?;
        let session = Self::new(
            WordBoxes::new(outcome.cores),
            Viewport::new(scale, image_height),
            box_path,
        );
        Ok((session, outcome.warnings))
    }

    /// Write the corrected collection back to the active file.
    pub fn save(&self) -> Result<()> {
        std::fs::write(&self.path, self.boxes.file_representation())
            .with_context(|| format!("failed to write box file: {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index of the active box, if one is selected.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_core(&self) -> Option<&WordBoxCore> {
        self.active.and_then(|index| self.boxes.get(index))
    }

    /// Text of the active box, for the clipboard.
    pub fn active_text(&self) -> Option<&str> {
        self.active_core().map(|core| core.text.as_str())
    }

    /// The in-progress creation rectangle, for preview rendering.
    pub fn draft(&self) -> Option<&NewBoxDraft> {
        match &self.gesture {
            Gesture::Creating(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn dragging(&self) -> bool {
        matches!(self.gesture, Gesture::DraggingEdge(_))
    }

    /// Select the box at `point` and make it active. A miss leaves the
    /// previous selection in place.
    pub fn activate(&mut self, point: Point) -> Option<usize> {
        let hit = self.boxes.select(&self.viewport, point);
        if hit.is_some() {
            self.active = hit;
        }
        hit
    }

    /// Single click. Priority order: a drag handle of the active box, then
    /// an existing box, then the start of a new-box draft.
    pub fn press(&mut self, point: Point) {
        if let Some(core) = self.active_core() {
            if let Some(handle) = DragHandle::activate(&self.viewport, &core.displacements, point)
            {
                self.gesture = Gesture::DraggingEdge(handle);
                return;
            }
        }
        if self.activate(point).is_none() {
            self.gesture = Gesture::Creating(NewBoxDraft::new(point));
        }
    }

    /// Mouse motion with the button held: route to the active drag handle or
    /// the creation draft.
    pub fn drag_to(&mut self, point: Point) {
        match &mut self.gesture {
            Gesture::DraggingEdge(handle) => {
                let handle = *handle;
                let viewport = self.viewport;
                if let Some(core) = self.active.and_then(|index| self.boxes.get_mut(index)) {
                    handle.drag_to(&viewport, &mut core.displacements, point);
                }
            }
            Gesture::Creating(draft) => draft.adjust(&self.viewport, point),
            Gesture::Idle => {}
        }
    }

    /// Button release. Ends an edge drag; finalizes a creation draft, in
    /// which case the new box immediately receives its mandatory text
    /// through the prompt.
    pub fn release(&mut self, prompt: &mut dyn TextPrompt) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Creating(draft) => {
                if let Some(mut core) = draft.finish() {
                    launch_text_editor_dialog(&mut core, prompt);
                    self.boxes.push(core);
                }
            }
            Gesture::DraggingEdge(_) | Gesture::Idle => {}
        }
    }

    /// Delete the active box. A no-op returning `false` when nothing is
    /// selected; deletion always clears the selection.
    pub fn delete_active(&mut self) -> bool {
        match self.active.take() {
            Some(index) => self.boxes.remove(index).is_some(),
            None => false,
        }
    }

    /// Double click: activate the box under the cursor and run the text
    /// editor on it. Returns `false` when the click hit nothing.
    pub fn edit_text_at(&mut self, point: Point, prompt: &mut dyn TextPrompt) -> bool {
        let Some(index) = self.activate(point) else {
            return false;
        };
        if let Some(core) = self.boxes.get_mut(index) {
            launch_text_editor_dialog(core, prompt);
        }
        true
    }
}

/// Locate the raster image a box file annotates: same directory, same stem,
/// a `tif`-family extension.
pub fn find_sibling_image(box_path: &Path) -> Result<PathBuf> {
    let stem = box_path
        .file_stem()
        .ok_or_else(|| anyhow::anyhow!("box path has no file stem: {}", box_path.display()))?;
    let directory = box_path.parent().unwrap_or_else(|| Path::new("."));
    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("failed to list directory: {}", directory.display()))?;
    for entry in entries {
        let candidate = entry?.path();
        let matches_stem = candidate.file_stem() == Some(stem);
        let matches_ext = candidate
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.to_ascii_lowercase().starts_with("tif"));
        if matches_stem && matches_ext {
            return Ok(candidate);
        }
    }
    anyhow::bail!(
        "no image found next to box file: {}",
        box_path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::prompt::testing::ScriptedPrompt;
    use super::*;
    use crate::core::geometry::Displacements;
    use pretty_assertions::assert_eq;

    fn sample_session() -> EditSession {
        let boxes = WordBoxes::new(vec![
            WordBoxCore::new("Hello", Displacements::new(10, 80, 50, 20)),
            WordBoxCore::new("world", Displacements::new(60, 80, 90, 20)),
        ]);
        EditSession::new(boxes, Viewport::new(1.0, 100), PathBuf::from("sample.box"))
    }

    #[test]
    fn activate_selects_the_first_hit() {
        let mut session = sample_session();
        // Screen y for both boxes spans [20, 80].
        assert_eq!(session.activate(Point::new(30, 50)), Some(0));
        assert_eq!(session.active(), Some(0));
        assert_eq!(session.active_text(), Some("Hello"));
    }

    #[test]
    fn missed_activate_keeps_the_previous_selection() {
        let mut session = sample_session();
        session.activate(Point::new(70, 50));
        assert_eq!(session.activate(Point::new(0, 0)), None);
        assert_eq!(session.active(), Some(1));
    }

    #[test]
    fn press_on_empty_space_starts_a_draft() {
        let mut session = sample_session();
        session.press(Point::new(200, 200));
        assert!(session.draft().is_some());
        assert!(!session.dragging());
    }

    #[test]
    fn press_on_a_handle_of_the_active_box_starts_a_drag() {
        let mut session = sample_session();
        session.activate(Point::new(30, 50));
        // Left edge handle of box 0 sits at screen (10, 50).
        session.press(Point::new(10, 50));
        assert!(session.dragging());
        session.drag_to(Point::new(5, 50));
        assert_eq!(session.boxes.get(0).unwrap().displacements.left, 5);
        let mut prompt = ScriptedPrompt::new(vec![]);
        session.release(&mut prompt);
        assert!(!session.dragging());
    }

    #[test]
    fn handles_of_inactive_boxes_do_not_react() {
        let mut session = sample_session();
        session.activate(Point::new(70, 50));
        // Left handle of box 0; box 1 is active, and the point lies inside
        // box 0, so this press re-activates box 0 instead of dragging.
        session.press(Point::new(10, 50));
        assert!(!session.dragging());
        assert_eq!(session.active(), Some(0));
    }

    #[test]
    fn click_without_drag_creates_nothing() {
        let mut session = sample_session();
        session.press(Point::new(200, 200));
        let mut prompt = ScriptedPrompt::new(vec![]);
        session.release(&mut prompt);
        assert_eq!(session.boxes.len(), 2);
        assert!(session.draft().is_none());
    }

    #[test]
    fn drag_release_creates_a_box_with_mandatory_text() {
        let mut session = sample_session();
        session.press(Point::new(200, 90));
        session.drag_to(Point::new(240, 60));
        let mut prompt = ScriptedPrompt::new(vec![Some(""), Some("new")]);
        session.release(&mut prompt);
        assert_eq!(prompt.rejections, 1);
        assert_eq!(session.boxes.len(), 3);
        let created = session.boxes.get(2).unwrap();
        assert_eq!(created.text, "new");
        // Screen corners (200,90)-(240,60) flip to file space at scale 1.
        assert_eq!(created.displacements, Displacements::new(200, 40, 240, 10));
    }

    #[test]
    fn delete_clears_selection() {
        let mut session = sample_session();
        session.activate(Point::new(30, 50));
        assert!(session.delete_active());
        assert_eq!(session.active(), None);
        assert_eq!(session.boxes.len(), 1);
        assert_eq!(session.boxes.get(0).unwrap().text, "world");
    }

    #[test]
    fn remove_rejects_out_of_range_indices() {
        let mut boxes = sample_session().boxes;
        assert_eq!(boxes.remove(5), None);
        assert_eq!(boxes.len(), 2);
        let removed = boxes.remove(0).expect("index 0 is in range");
        assert_eq!(removed.text, "Hello");
        assert_eq!(boxes.len(), 1);
    }

    #[test]
    fn delete_without_selection_is_a_guarded_no_op() {
        let mut session = sample_session();
        assert!(!session.delete_active());
        assert_eq!(session.boxes.len(), 2);
    }

    #[test]
    fn edit_text_at_point_loops_until_non_empty() {
        let mut session = sample_session();
        let mut prompt = ScriptedPrompt::new(vec![None, Some("Goodbye")]);
        assert!(session.edit_text_at(Point::new(30, 50), &mut prompt));
        assert_eq!(prompt.rejections, 1);
        assert_eq!(session.boxes.get(0).unwrap().text, "Goodbye");
        assert_eq!(prompt.seen_initial[0], "Hello");
    }

    #[test]
    fn edit_text_misses_return_false() {
        let mut session = sample_session();
        let mut prompt = ScriptedPrompt::new(vec![]);
        assert!(!session.edit_text_at(Point::new(0, 0), &mut prompt));
    }

    #[test]
    fn collection_serialization_delegates_to_the_codec() {
        let session = sample_session();
        let text = session.boxes.file_representation();
        assert!(text.starts_with("H 10 20 50 80 0\n"));
        assert_eq!(text.lines().count(), "Hello".len() + "world".len() + 2);
    }
}
