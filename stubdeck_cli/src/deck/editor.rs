//! Response editor: pretty view and raw draft of one row's response JSON

use serde_json::Value;
use stubdeck_common::pretty_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Read-only pretty-printed JSON
    Viewing,
    /// Raw text draft
    Editing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEditor {
    mode: EditMode,
    pretty: String,
    draft: String,
}

impl ResponseEditor {
    /// Start in viewing mode with both panes holding the rendered response
    pub fn new(response_json: &str) -> Self {
        Self {
            mode: EditMode::Viewing,
            pretty: response_json.to_string(),
            draft: response_json.to_string(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn pretty(&self) -> &str {
        &self.pretty
    }

    /// Pending, unsaved response text
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    #[cfg(test)]
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Switch between viewing and editing
    ///
    /// Leaving the editor pretty-prints the draft, or shows it verbatim when
    /// it does not parse. Entering it re-derives the draft from the pretty
    /// text when that parses, and keeps the current draft otherwise.
    pub fn toggle(&mut self) -> EditMode {
        match self.mode {
            EditMode::Editing => {
                self.pretty = match serde_json::from_str::<Value>(&self.draft) {
                    Ok(value) => pretty_json(&value),
                    Err(_) => self.draft.clone(),
                };
                self.mode = EditMode::Viewing;
            }
            EditMode::Viewing => {
                if let Ok(value) = serde_json::from_str::<Value>(&self.pretty) {
                    self.draft = pretty_json(&value);
                }
                self.mode = EditMode::Editing;
            }
        }
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = "{\n  \"status\": 200,\n  \"body\": \"ok\"\n}";

    #[test]
    fn test_round_trip_is_idempotent() {
        let mut editor = ResponseEditor::new(RESPONSE);
        assert_eq!(editor.toggle(), EditMode::Editing);
        assert_eq!(editor.toggle(), EditMode::Viewing);
        assert_eq!(editor.pretty(), RESPONSE);
    }

    #[test]
    fn test_compact_draft_is_pretty_printed() {
        let mut editor = ResponseEditor::new(RESPONSE);
        editor.toggle();
        editor.set_draft(r#"{"status":201,"body":"created"}"#);
        editor.toggle();
        assert_eq!(
            editor.pretty(),
            "{\n  \"status\": 201,\n  \"body\": \"created\"\n}"
        );
    }

    #[test]
    fn test_invalid_draft_shown_verbatim() {
        let mut editor = ResponseEditor::new(RESPONSE);
        editor.toggle();
        editor.set_draft("{ not json");
        assert_eq!(editor.toggle(), EditMode::Viewing);
        assert_eq!(editor.pretty(), "{ not json");
    }

    #[test]
    fn test_unparsable_pretty_keeps_draft() {
        let mut editor = ResponseEditor::new(RESPONSE);
        editor.toggle();
        editor.set_draft("{ broken");
        editor.toggle();

        // Pretty pane now holds the broken text; the draft must survive
        editor.toggle();
        assert!(editor.is_editing());
        assert_eq!(editor.draft(), "{ broken");
    }

    #[test]
    fn test_entering_editor_normalizes_draft() {
        let mut editor = ResponseEditor::new("{\"status\":200}");
        editor.toggle();
        assert_eq!(editor.draft(), "{\n  \"status\": 200\n}");
    }
}
