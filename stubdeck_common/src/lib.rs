//! Stubdeck Common - Shared library for the mock mapping console
//!
//! This crate contains the mapping model, the creation payload and the
//! HTML rendering helpers used by both the server and the CLI.

use std::borrow::Cow;

pub mod dom;
pub mod escape;
pub mod listing;
pub mod mapping;

pub use escape::escape_html;
pub use listing::{pretty_json, ListView, MappingRow};
pub use mapping::{
    Mapping, MappingError, MappingList, NewMapping, NewRequest, NewResponse, RequestSummary,
    UrlMatch,
};

/// Percent-encode a mapping id as one URL path segment
///
/// Returns `None` for ids that would resolve to the collection itself
/// (empty, `.` and `..`).
pub fn id_segment(id: &str) -> Option<Cow<'_, str>> {
    match id {
        "" | "." | ".." => None,
        _ => Some(urlencoding::encode(id)),
    }
}

/// Path of a single mapping on the console API
pub fn mapping_path(id: &str) -> Option<String> {
    id_segment(id).map(|segment| format!("{}/{}", constants::MAPPINGS_PATH, segment))
}

/// Constants shared by server and console
pub mod constants {
    /// Collection endpoint of the console API
    pub const MAPPINGS_PATH: &str = "/api/mappings";

    /// Persist in-memory mappings to files
    pub const SAVE_PATH: &str = "/api/mappings/save";

    /// Drop every in-memory mapping
    pub const RESET_PATH: &str = "/api/mappings/reset";

    /// Plain-text health check
    pub const HEALTH_PATH: &str = "/health";

    /// Server-rendered mappings page
    pub const PAGE_PATH: &str = "/index.html";

    /// URL input prefix selecting a regex match instead of an exact one
    pub const REGEX_PREFIX: &str = "regex:";

    /// Placeholder for a request field that matches anything
    pub const ANY: &str = "(any)";

    /// Preference key for the collapsed sidebar
    pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";
}
