//! TUI application state and event handling

use crate::api::MappingApi;
use crate::deck::{delete_prompt, Console, FormField, PreferenceStore, View, RESET_PROMPT};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events that can be sent to the TUI
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Key event from terminal
    Key(KeyEvent),
    /// Tick for periodic updates
    Tick,
}

/// Console operations triggered from the keyboard, bound to explicit row ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(View),
    Refresh,
    ToggleSidebar,
    ToggleRequest(String),
    ToggleResponse(String),
    ToggleEdit(String),
    Update(String),
    Delete(String),
    Create,
    SaveToFiles,
    ResetAll,
}

/// An action waiting for a yes/no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub message: String,
    pub action: Action,
}

/// TUI application state
pub struct TuiApp<A, P> {
    pub console: Console<A, P>,
    pub selected_index: usize,
    pub form_field: FormField,
    pub prompt: Option<Prompt>,
    pub should_quit: bool,
}

impl<A: MappingApi, P: PreferenceStore> TuiApp<A, P> {
    pub fn new(console: Console<A, P>) -> Self {
        Self {
            console,
            selected_index: 0,
            form_field: FormField::Name,
            prompt: None,
            should_quit: false,
        }
    }

    /// Id of the highlighted mapping row
    pub fn selected_id(&self) -> Option<String> {
        let rows = self.console.rows()?;
        rows.get(self.selected_index)?.id().map(str::to_string)
    }

    fn row_count(&self) -> usize {
        self.console.rows().map_or(0, |rows| rows.len())
    }

    /// Whether the selected row's response draft is being typed into
    pub fn is_editing(&self) -> bool {
        self.console.route().is_visible(View::Mocks)
            && self
                .selected_id()
                .and_then(|id| self.console.row(&id).map(|r| r.editor.is_editing()))
                .unwrap_or(false)
    }

    fn in_form(&self) -> bool {
        self.console.route().is_visible(View::Create)
    }

    /// Handle key events
    ///
    /// Text input is applied directly; anything that talks to the backend is
    /// returned as an `Action` for `dispatch`.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if let Some(prompt) = self.prompt.take() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Some(prompt.action),
                _ => None,
            };
        }

        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                None
            }
            (KeyCode::Char('b'), KeyModifiers::CONTROL) => Some(Action::ToggleSidebar),
            (KeyCode::F(1), _) => Some(Action::Navigate(View::Home)),
            (KeyCode::F(2), _) => Some(Action::Navigate(View::Mocks)),
            (KeyCode::F(3), _) => Some(Action::Navigate(View::Create)),
            (KeyCode::F(5), _) => Some(Action::Refresh),
            (KeyCode::Char('s'), KeyModifiers::CONTROL) if self.is_editing() => {
                self.selected_id().map(Action::Update)
            }
            _ if self.is_editing() => {
                self.edit_draft(key);
                None
            }
            _ if self.in_form() => self.edit_form(key),
            _ => self.handle_command(key),
        }
    }

    fn handle_command(&mut self, key: KeyEvent) -> Option<Action> {
        let mocks = self.console.route().is_visible(View::Mocks);
        let selected = if mocks { self.selected_id() } else { None };

        match key.code {
            KeyCode::Char('1') => Some(Action::Navigate(View::Home)),
            KeyCode::Char('2') => Some(Action::Navigate(View::Mocks)),
            KeyCode::Char('3') => Some(Action::Navigate(View::Create)),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('S') => Some(Action::SaveToFiles),
            KeyCode::Char('R') => {
                self.prompt = Some(Prompt {
                    message: RESET_PROMPT.to_string(),
                    action: Action::ResetAll,
                });
                None
            }
            KeyCode::Up | KeyCode::Char('k') if mocks => {
                self.selected_index = self.selected_index.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') if mocks => {
                if self.selected_index + 1 < self.row_count() {
                    self.selected_index += 1;
                }
                None
            }
            KeyCode::Home if mocks => {
                self.selected_index = 0;
                None
            }
            KeyCode::End if mocks => {
                self.selected_index = self.row_count().saturating_sub(1);
                None
            }
            KeyCode::Char('q') => selected.map(Action::ToggleRequest),
            KeyCode::Enter | KeyCode::Char('o') => selected.map(Action::ToggleResponse),
            KeyCode::Char('e') => selected.map(Action::ToggleEdit),
            KeyCode::Char('s') => selected.map(Action::Update),
            KeyCode::Char('d') => {
                let id = selected?;
                self.prompt = Some(Prompt {
                    message: delete_prompt(&id),
                    action: Action::Delete(id),
                });
                None
            }
            _ => None,
        }
    }

    fn edit_draft(&mut self, key: KeyEvent) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if key.code == KeyCode::Esc {
            self.console.toggle_edit(&id);
            return;
        }
        if let Some(row) = self.console.row_mut(&id) {
            apply_text_key(row.editor.draft_mut(), key, true);
        }
    }

    fn edit_form(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form_field = self.form_field.next(),
            KeyCode::BackTab | KeyCode::Up => self.form_field = self.form_field.prev(),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.console.form.field_mut(self.form_field).push('\n');
            }
            KeyCode::Enter => return Some(Action::Create),
            KeyCode::Esc => return Some(Action::Navigate(View::Home)),
            _ => apply_text_key(self.console.form.field_mut(self.form_field), key, false),
        }
        None
    }

    /// Run an action against the console
    pub async fn dispatch(&mut self, action: Action) {
        tracing::debug!("dispatch {:?}", action);
        match action {
            Action::Navigate(view) => self.console.set_location(view.hash()).await,
            Action::Refresh => {
                self.console.refresh().await;
            }
            Action::ToggleSidebar => {
                self.console.toggle_sidebar();
            }
            Action::ToggleRequest(id) => self.console.toggle_request(&id),
            Action::ToggleResponse(id) => self.console.toggle_response(&id),
            Action::ToggleEdit(id) => {
                if let Some(row) = self.console.row_mut(&id) {
                    row.response_open = true;
                }
                self.console.toggle_edit(&id);
            }
            Action::Update(id) => {
                self.console.update_mapping(&id).await;
            }
            // Confirmation already happened in the prompt
            Action::Delete(id) => {
                self.console.delete_mapping(&id, &mut |_: &str| true).await;
            }
            Action::Create => {
                if self.console.create_mapping().await {
                    self.console.form = Default::default();
                    self.form_field = FormField::Name;
                }
            }
            Action::SaveToFiles => self.console.save_to_files().await,
            Action::ResetAll => {
                self.console.reset_all(&mut |_: &str| true).await;
            }
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.row_count().saturating_sub(1));
    }

    /// Handle TUI event
    pub async fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key) => {
                if let Some(action) = self.handle_key(key) {
                    self.dispatch(action).await;
                }
            }
            TuiEvent::Tick => {} // Just triggers a redraw
        }
    }
}

fn apply_text_key(text: &mut String, key: KeyEvent, multiline: bool) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => text.push(c),
        KeyCode::Enter if multiline => text.push('\n'),
        KeyCode::Tab if multiline => text.push_str("  "),
        KeyCode::Backspace => {
            text.pop();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::prefs::MemoryStore;
    use crate::deck::CreateForm;
    use crate::deck::testing::{Call, FakeApi};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn app_on_mocks() -> TuiApp<FakeApi, MemoryStore> {
        let api = FakeApi::with(vec![
            json!({ "id": "a", "request": { "url": "/a" }, "response": { "status": 200 } }),
            json!({ "id": "b", "request": { "url": "/b" }, "response": { "status": 404 } }),
        ]);
        let mut app = TuiApp::new(Console::new(api, MemoryStore::default()));
        app.handle_event(TuiEvent::Key(key(KeyCode::Char('2')))).await;
        app
    }

    async fn press(app: &mut TuiApp<FakeApi, MemoryStore>, event: KeyEvent) {
        app.handle_event(TuiEvent::Key(event)).await;
    }

    #[tokio::test]
    async fn test_navigation_keys() {
        let mut app = app_on_mocks().await;
        assert!(app.console.route().is_visible(View::Mocks));
        assert_eq!(app.console.rows().unwrap().len(), 2);

        press(&mut app, key(KeyCode::Down)).await;
        assert_eq!(app.selected_id().as_deref(), Some("b"));
        press(&mut app, key(KeyCode::Down)).await;
        assert_eq!(app.selected_index, 1);

        press(&mut app, key(KeyCode::F(1))).await;
        assert!(app.console.route().is_visible(View::Home));
    }

    #[tokio::test]
    async fn test_delete_requires_yes() {
        let mut app = app_on_mocks().await;

        press(&mut app, key(KeyCode::Char('d'))).await;
        assert_eq!(
            app.prompt.as_ref().map(|p| p.message.as_str()),
            Some("Delete mapping a?")
        );
        press(&mut app, key(KeyCode::Char('n'))).await;
        assert!(app.prompt.is_none());
        assert_eq!(app.console.api().count(|c| matches!(c, Call::Delete(_))), 0);

        press(&mut app, key(KeyCode::Char('d'))).await;
        press(&mut app, key(KeyCode::Char('y'))).await;
        assert_eq!(
            app.console.api().count(|c| *c == Call::Delete("a".to_string())),
            1
        );
        assert_eq!(app.console.rows().unwrap().len(), 1);
        assert_eq!(app.selected_index, 0);
    }

    #[tokio::test]
    async fn test_edit_and_save_response() {
        let mut app = app_on_mocks().await;

        press(&mut app, key(KeyCode::Char('e'))).await;
        assert!(app.is_editing());

        // Typed keys land in the draft, not in the command map
        app.console.row_mut("a").unwrap().editor.set_draft("");
        for c in r#"{"status":500}"#.chars() {
            press(&mut app, key(KeyCode::Char(c))).await;
        }
        assert_eq!(app.console.row("a").unwrap().editor.draft(), r#"{"status":500}"#);
        assert_eq!(app.console.api().count(|c| matches!(c, Call::Delete(_))), 0);

        press(&mut app, ctrl('s')).await;
        assert_eq!(app.console.status(), "Updated a");

        press(&mut app, key(KeyCode::Esc)).await;
        assert!(!app.is_editing());
        assert_eq!(
            app.console.row("a").unwrap().editor.pretty(),
            "{\n  \"status\": 500\n}"
        );
    }

    #[tokio::test]
    async fn test_create_form() {
        let mut app = app_on_mocks().await;
        press(&mut app, key(KeyCode::Char('3'))).await;

        for c in "hello".chars() {
            press(&mut app, key(KeyCode::Char(c))).await;
        }
        press(&mut app, key(KeyCode::Tab)).await;
        press(&mut app, key(KeyCode::Tab)).await;
        for c in "/hello".chars() {
            press(&mut app, key(KeyCode::Char(c))).await;
        }
        press(&mut app, key(KeyCode::Enter)).await;

        assert!(app.console.route().is_visible(View::Mocks));
        assert_eq!(app.console.rows().unwrap().len(), 3);
        assert_eq!(app.console.form, CreateForm::default());
    }

    #[tokio::test]
    async fn test_reset_prompt_and_sidebar() {
        let mut app = app_on_mocks().await;

        press(&mut app, key(KeyCode::Char('R'))).await;
        assert_eq!(
            app.prompt.as_ref().map(|p| p.message.as_str()),
            Some(RESET_PROMPT)
        );
        press(&mut app, key(KeyCode::Char('y'))).await;
        assert_eq!(app.console.status(), "Loaded 0 mappings");

        press(&mut app, ctrl('b')).await;
        assert!(app.console.sidebar().is_collapsed());

        press(&mut app, ctrl('c')).await;
        assert!(app.should_quit);
    }
}
