//! Console view model
//!
//! `Console` holds every piece of UI state explicitly: the current location
//! hash and its route, the status line, the rendered mapping rows with their
//! per-row disclosure and edit state, the sidebar preference and the creation
//! form. Hosts (the terminal UI, tests) drive it by calling the operations in
//! `ops` with explicit row ids, then draw whatever it exposes.

pub mod editor;
pub mod form;
mod ops;
pub mod prefs;
pub mod router;
pub mod sidebar;

pub use editor::{EditMode, ResponseEditor};
pub use form::{CreateForm, FormField};
pub use ops::{delete_prompt, replace_response, RESET_PROMPT, SAVED_STATUS};
pub use prefs::{FileStore, PreferenceStore};
pub use router::{Route, View};
pub use sidebar::Sidebar;

use crate::api::MappingApi;
use stubdeck_common::MappingRow;

/// Interactive yes/no confirmation
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A rendered mapping plus the state of its widgets
#[derive(Debug, Clone, PartialEq)]
pub struct RowState {
    pub row: MappingRow,
    pub request_open: bool,
    pub response_open: bool,
    pub editor: ResponseEditor,
}

impl RowState {
    pub fn new(row: MappingRow) -> Self {
        let editor = ResponseEditor::new(&row.response_json);
        Self {
            row,
            request_open: false,
            response_open: false,
            editor,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.row.id.as_deref()
    }
}

pub struct Console<A, P> {
    api: A,
    prefs: P,
    location: String,
    route: Route,
    status: String,
    rows: Option<Vec<RowState>>,
    sidebar: Sidebar,
    pub form: CreateForm,
}

impl<A: MappingApi, P: PreferenceStore> Console<A, P> {
    /// Build a console at the empty location with the persisted sidebar state
    ///
    /// Call `hash_changed` (or `set_location`) afterwards to run the initial
    /// routing.
    pub fn new(api: A, prefs: P) -> Self {
        let sidebar = Sidebar::restore(&prefs);
        Self {
            api,
            prefs,
            location: String::new(),
            route: Route::default(),
            status: String::new(),
            rows: None,
            sidebar,
            form: CreateForm::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        tracing::debug!("status: {}", self.status);
    }

    /// Rendered rows; `None` until the first successful refresh
    pub fn rows(&self) -> Option<&[RowState]> {
        self.rows.as_deref()
    }

    pub fn row(&self, id: &str) -> Option<&RowState> {
        self.rows.as_ref()?.iter().find(|r| r.id() == Some(id))
    }

    pub fn row_mut(&mut self, id: &str) -> Option<&mut RowState> {
        self.rows.as_mut()?.iter_mut().find(|r| r.id() == Some(id))
    }

    pub(crate) fn replace_rows(&mut self, rows: Vec<MappingRow>) {
        self.rows = Some(rows.into_iter().map(RowState::new).collect());
    }

    /// Route the current location, refreshing when it lands on the mocks view
    ///
    /// Every call is one hash-change event: repeated calls for the same hash
    /// refresh again.
    pub async fn hash_changed(&mut self) {
        self.route = Route::from_hash(&self.location);
        tracing::debug!("route {} -> {:?}", self.route.fragment(), self.route.view());
        if self.route.triggers_refresh() {
            self.refresh().await;
        }
    }

    /// Navigate; fires a hash change only when the hash actually differs
    pub async fn set_location(&mut self, hash: &str) {
        if self.location == hash {
            return;
        }
        self.location = hash.to_string();
        self.hash_changed().await;
    }

    pub fn sidebar(&self) -> Sidebar {
        self.sidebar
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar.toggle(&mut self.prefs)
    }

    pub fn toggle_request(&mut self, id: &str) {
        if let Some(row) = self.row_mut(id) {
            row.request_open = !row.request_open;
        }
    }

    pub fn toggle_response(&mut self, id: &str) {
        if let Some(row) = self.row_mut(id) {
            row.response_open = !row.response_open;
        }
    }

    /// Switch a row's response between pretty view and raw draft
    pub fn toggle_edit(&mut self, id: &str) -> Option<EditMode> {
        self.row_mut(id).map(|row| row.editor.toggle())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::api::{ApiError, MappingApi};
    use reqwest::StatusCode;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use stubdeck_common::{Mapping, MappingList, NewMapping};

    /// Calls seen by `FakeApi`, in order
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        List,
        Get(String),
        Create(Value),
        Update(String, Value),
        Delete(String),
        Save,
        Reset,
    }

    /// Scripted `MappingApi`
    ///
    /// `mappings` backs list/get. A queued failure is returned by the next
    /// call, whatever it is.
    #[derive(Default)]
    pub struct FakeApi {
        pub mappings: RefCell<Vec<Mapping>>,
        pub calls: RefCell<Vec<Call>>,
        pub failures: RefCell<VecDeque<ApiError>>,
    }

    impl FakeApi {
        pub fn with(mappings: Vec<Value>) -> Self {
            let api = Self::default();
            *api.mappings.borrow_mut() = mappings
                .into_iter()
                .map(|v| Mapping::from_value(v).unwrap())
                .collect();
            api
        }

        pub fn fail_next(&self, status: StatusCode, body: &str) {
            self.fail_next_with(ApiError::Status {
                status,
                body: body.to_string(),
            });
        }

        pub fn fail_next_with(&self, err: ApiError) {
            self.failures.borrow_mut().push_back(err);
        }
    }

    /// A `reqwest` error that never reached the network
    pub fn transport_error() -> ApiError {
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        ApiError::Transport(err)
    }

    impl FakeApi {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.borrow().iter().filter(|c| pred(c)).count()
        }

        fn record(&self, call: Call) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            match self.failures.borrow_mut().pop_front() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    impl MappingApi for FakeApi {
        async fn list(&self) -> Result<MappingList, ApiError> {
            self.record(Call::List)?;
            Ok(MappingList {
                mappings: self.mappings.borrow().clone(),
            })
        }

        async fn get(&self, id: &str) -> Result<Mapping, ApiError> {
            self.record(Call::Get(id.to_string()))?;
            self.mappings
                .borrow()
                .iter()
                .find(|m| m.id() == Some(id))
                .cloned()
                .ok_or_else(|| ApiError::Status {
                    status: StatusCode::NOT_FOUND,
                    body: format!("No mapping {}", id),
                })
        }

        async fn create(&self, mapping: &NewMapping) -> Result<(), ApiError> {
            let value = serde_json::to_value(mapping)?;
            self.record(Call::Create(value.clone()))?;
            let mut stored = value;
            stored["id"] = Value::String(format!("m{}", self.mappings.borrow().len() + 1));
            self.mappings.borrow_mut().push(Mapping::from_value(stored)?);
            Ok(())
        }

        async fn update(&self, id: &str, mapping: &Mapping) -> Result<(), ApiError> {
            self.record(Call::Update(id.to_string(), mapping.clone().into_value()))?;
            if let Some(slot) = self
                .mappings
                .borrow_mut()
                .iter_mut()
                .find(|m| m.id() == Some(id))
            {
                *slot = mapping.clone();
            }
            Ok(())
        }

        async fn delete(&self, id: &str) -> Result<(), ApiError> {
            self.record(Call::Delete(id.to_string()))?;
            self.mappings.borrow_mut().retain(|m| m.id() != Some(id));
            Ok(())
        }

        async fn save(&self) -> Result<(), ApiError> {
            self.record(Call::Save)
        }

        async fn reset(&self) -> Result<(), ApiError> {
            self.record(Call::Reset)?;
            self.mappings.borrow_mut().clear();
            Ok(())
        }
    }
}
