use crate::core::model::WordBoxCore;

/// Dialog collaborator for editing a word box's text. The UI shell implements
/// this; tests script it.
pub trait TextPrompt {
    /// Ask for a replacement text, pre-filled with the current value. `None`
    /// means the user cancelled.
    fn request_text(&mut self, current: &str) -> Option<String>;

    /// Tell the user an empty or cancelled value is not acceptable.
    fn notify_value_required(&mut self);
}

/// Loop the prompt until a non-empty value arrives, then store it. Every box
/// must end up with text; there is no cancel path out of this dialog.
pub fn launch_text_editor_dialog(core: &mut WordBoxCore, prompt: &mut dyn TextPrompt) {
    loop {
        match prompt.request_text(&core.text) {
            Some(value) if !value.is_empty() => {
                core.text = value;
                return;
            }
            _ => prompt.notify_value_required(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedPrompt;
    use super::*;
    use crate::core::geometry::Displacements;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_the_first_non_empty_value() {
        let mut core = WordBoxCore::new("old", Displacements::default());
        let mut prompt = ScriptedPrompt::new(vec![Some("new")]);
        launch_text_editor_dialog(&mut core, &mut prompt);
        assert_eq!(core.text, "new");
        assert_eq!(prompt.rejections, 0);
        assert_eq!(prompt.seen_initial, vec!["old".to_string()]);
    }

    #[test]
    fn reprompts_on_cancel_and_empty_until_valid() {
        let mut core = WordBoxCore::empty();
        let mut prompt = ScriptedPrompt::new(vec![None, Some(""), Some("word")]);
        launch_text_editor_dialog(&mut core, &mut prompt);
        assert_eq!(core.text, "word");
        assert_eq!(prompt.rejections, 2);
    }
}
