//! Mock mapping records and the creation payload

use crate::constants::{ANY, REGEX_PREFIX};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Mapping model errors
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Mapping must be a JSON object")]
    NotAnObject,
}

/// A mapping as the backend returns it
///
/// The record is owned by the backend and kept verbatim: unknown fields
/// and key order survive a read-modify-write cycle. Known fields are read
/// through accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping(Map<String, Value>);

/// Response of the list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mappings: Vec<Mapping>,
}

/// A `null` mapping list reads as no mappings
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Mapping>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Mapping>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Method and url of a mapping's request, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub method: String,
    pub url: String,
}

impl Mapping {
    /// Wrap a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self, MappingError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(MappingError::NotAnObject),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Backend-assigned identifier
    pub fn id(&self) -> Option<&str> {
        non_empty_str(self.0.get("id"))
    }

    /// Free-text name, if one was given
    pub fn name(&self) -> Option<&str> {
        non_empty_str(self.0.get("name"))
    }

    pub fn request(&self) -> Option<&Value> {
        self.0.get("request")
    }

    pub fn response(&self) -> Option<&Value> {
        self.0.get("response")
    }

    /// Replace the response wholesale, leaving every other field alone
    pub fn set_response(&mut self, response: Value) {
        self.0.insert("response".to_string(), response);
    }

    /// Summarize the request matcher
    ///
    /// An exact `url` wins over `urlPattern`; a pattern is shown with the
    /// `regex:` prefix the creation form accepts.
    pub fn summary(&self) -> RequestSummary {
        let request = self.request();
        let field = |key: &str| non_empty_str(request.and_then(|r| r.get(key)));

        let method = field("method").unwrap_or(ANY).to_string();
        let url = match (field("url"), field("urlPattern")) {
            (Some(url), _) => url.to_string(),
            (None, Some(pattern)) => format!("{}{}", REGEX_PREFIX, pattern),
            (None, None) => ANY.to_string(),
        };

        RequestSummary { method, url }
    }

    /// Name to show in listings, falling back to `"<method> <url>"`
    pub fn display_name(&self) -> String {
        match self.name() {
            Some(name) => name.to_string(),
            None => {
                let summary = self.summary();
                format!("{} {}", summary.method, summary.url)
            }
        }
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        mapping.into_value()
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Mapping built by the console's creation form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub request: NewRequest,
    pub response: NewResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRequest {
    pub method: String,
    #[serde(flatten)]
    pub url: UrlMatch,
}

/// Exact url or regex pattern; a request never carries both
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UrlMatch {
    #[serde(rename = "url")]
    Exact(String),
    #[serde(rename = "urlPattern")]
    Pattern(String),
}

impl UrlMatch {
    /// Parse form input: `regex:<pattern>` selects a pattern match
    pub fn parse(input: &str) -> Self {
        match input.strip_prefix(REGEX_PREFIX) {
            Some(pattern) => UrlMatch::Pattern(pattern.to_string()),
            None => UrlMatch::Exact(input.to_string()),
        }
    }
}

impl fmt::Display for UrlMatch {
    /// Same form the list summary uses
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlMatch::Exact(url) => f.write_str(url),
            UrlMatch::Pattern(pattern) => write!(f, "{}{}", REGEX_PREFIX, pattern),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewResponse {
    pub status: u16,
    pub headers: Map<String, Value>,
    pub body: String,
}
