use serde::{Deserialize, Serialize};

use crate::core::geometry::Displacements;

/// The authoritative data for one word box: the recognized (or edited) text
/// and its bounding rectangle in file coordinates.
///
/// During parsing a core transiently holds a single glyph as its text; after
/// word aggregation the text is the full word.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordBoxCore {
    pub text: String,
    pub displacements: Displacements,
}

impl WordBoxCore {
    pub fn new(text: impl Into<String>, displacements: Displacements) -> Self {
        Self {
            text: text.into(),
            displacements,
        }
    }

    /// Seed for an in-progress new box: no text, all-zero rectangle.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            displacements: Displacements::default(),
        }
    }

    /// The box-file rows for this word: one row per character plus the
    /// trailing tab row, all repeating the same word-level rectangle.
    pub fn file_representation(&self) -> String {
        let tail = self.displacements.file_representation();
        self.text
            .chars()
            .chain(std::iter::once('\t'))
            .map(|letter| format!("{letter} {tail}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_core_has_no_text_and_zero_rectangle() {
        let core = WordBoxCore::empty();
        assert_eq!(core.text, "");
        assert_eq!(core.displacements, Displacements::default());
    }

    #[test]
    fn repeats_rectangle_for_every_character_and_the_tab() {
        let core = WordBoxCore::new("Hi", Displacements::new(1, 9, 5, 2));
        assert_eq!(
            core.file_representation(),
            "H 1 2 5 9 0\ni 1 2 5 9 0\n\t 1 2 5 9 0\n"
        );
    }

    #[test]
    fn empty_word_still_emits_its_tab_row() {
        let core = WordBoxCore::new("", Displacements::new(0, 4, 3, 0));
        assert_eq!(core.file_representation(), "\t 0 0 3 4 0\n");
    }
}
