//! Console operations: list refresh and mapping mutations
//!
//! Each operation awaits its calls in sequence, then writes the outcome to
//! the status line. They return whether the backend accepted the change.

use super::{Confirm, Console, PreferenceStore, View};
use crate::api::{ApiError, MappingApi};
use serde_json::Value;
use stubdeck_common::ListView;

pub const LOADING_STATUS: &str = "Loading mappings…";
pub const SAVED_STATUS: &str = "Saved to files (mappings folder).";
pub const RESET_PROMPT: &str = "This will clear in-memory mappings. Continue?";

pub fn delete_prompt(id: &str) -> String {
    format!("Delete mapping {}?", id)
}

/// Fetch mapping `id`, swap its `response` for the parsed `draft` and put
/// the whole record back
pub async fn replace_response(
    api: &impl MappingApi,
    id: &str,
    draft: &str,
) -> Result<(), ApiError> {
    let response: Value = serde_json::from_str(draft)?;
    let mut current = api.get(id).await?;
    current.set_response(response);
    api.update(id, &current).await
}

impl<A: MappingApi, P: PreferenceStore> Console<A, P> {
    /// Reload every mapping and re-render the list
    ///
    /// On failure the rows already on screen are kept.
    pub async fn refresh(&mut self) -> bool {
        self.set_status(LOADING_STATUS);
        match self.api.list().await {
            Ok(list) => {
                let count = list.mappings.len();
                let rows = match ListView::from_mappings(&list.mappings) {
                    ListView::Empty => Vec::new(),
                    ListView::Table(rows) => rows,
                };
                self.replace_rows(rows);
                self.set_status(format!("Loaded {} mappings", count));
                true
            }
            Err(e) => {
                tracing::warn!("Failed to load mappings: {}", e);
                self.set_status(format!("Refresh failed: {}", e));
                false
            }
        }
    }

    /// Submit the creation form, then show the list
    pub async fn create_mapping(&mut self) -> bool {
        let result = match self.form.to_payload() {
            Ok(payload) => self.api.create(&payload).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(()) => {
                self.set_status("Created mapping");
                self.set_location(View::Mocks.hash()).await;
                self.refresh().await;
                true
            }
            Err(detail) => {
                self.set_status(format!("Create failed: {}", detail));
                false
            }
        }
    }

    /// Save the row's draft as the mapping's response
    pub async fn update_mapping(&mut self, id: &str) -> bool {
        let draft = match self.row(id) {
            Some(row) => row.editor.draft().to_string(),
            None => {
                self.set_status(format!("Update failed: no mapping {} on screen", id));
                return false;
            }
        };
        self.update_response(id, &draft).await
    }

    /// Replace only the `response` of mapping `id` with `draft`
    ///
    /// The mapping is fetched, patched and put back. A change made elsewhere
    /// between the fetch and the put is overwritten.
    pub async fn update_response(&mut self, id: &str, draft: &str) -> bool {
        match replace_response(&self.api, id, draft).await {
            Ok(()) => {
                self.set_status(format!("Updated {}", id));
                true
            }
            Err(e) => {
                self.set_status(format!("Update failed: {}", e));
                false
            }
        }
    }

    pub async fn delete_mapping(&mut self, id: &str, confirm: &mut impl Confirm) -> bool {
        if !confirm.confirm(&delete_prompt(id)) {
            return false;
        }

        match self.api.delete(id).await {
            Ok(()) => {
                self.set_status(format!("Deleted {}", id));
                self.refresh().await;
                true
            }
            Err(e) => {
                self.set_status(format!("Delete failed: {}", e));
                false
            }
        }
    }

    /// Ask the backend to persist mappings; always reports success
    pub async fn save_to_files(&mut self) {
        if let Err(e) = self.api.save().await {
            tracing::debug!("Save request failed: {}", e);
        }
        self.set_status(SAVED_STATUS);
    }

    pub async fn reset_all(&mut self, confirm: &mut impl Confirm) -> bool {
        if !confirm.confirm(RESET_PROMPT) {
            return false;
        }

        match self.api.reset().await {
            Ok(()) => {
                self.set_status("Reset complete.");
                self.refresh().await;
                true
            }
            Err(e) => {
                self.set_status(format!("Reset failed: {}", e));
                false
            }
        }
    }
}
