//! Console API client
//!
//! `MappingApi` is the seam between the console and the backend; `HttpApi`
//! implements it over the server's `/api/mappings` surface.

use anyhow::{Context, Result};
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use stubdeck_common::{
    constants::{MAPPINGS_PATH, RESET_PATH, SAVE_PATH},
    mapping_path, Mapping, MappingError, MappingList, NewMapping,
};
use thiserror::Error;

/// Errors from a console API call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status; displays the response body text
    #[error("{}", status_detail(.status, .body))]
    Status { status: StatusCode, body: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("Invalid mapping id {0:?}")]
    InvalidId(String),
}

fn status_detail(status: &StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}

/// Operations the console performs against the mapping store
#[allow(async_fn_in_trait)]
pub trait MappingApi {
    async fn list(&self) -> Result<MappingList, ApiError>;
    async fn get(&self, id: &str) -> Result<Mapping, ApiError>;
    async fn create(&self, mapping: &NewMapping) -> Result<(), ApiError>;
    async fn update(&self, id: &str, mapping: &Mapping) -> Result<(), ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
    async fn save(&self) -> Result<(), ApiError>;
    async fn reset(&self) -> Result<(), ApiError>;
}

/// HTTP implementation of `MappingApi`
#[derive(Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    /// Create a client for a server such as `http://localhost:9090`
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// JSON-accepting request against the console API
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header(header::ACCEPT, "application/json")
    }

    fn item_path(id: &str) -> Result<String, ApiError> {
        mapping_path(id).ok_or_else(|| ApiError::InvalidId(id.to_string()))
    }

    /// Send and turn a non-success status into `ApiError::Status`
    async fn send(req: RequestBuilder) -> Result<Response, ApiError> {
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(response)
    }
}

impl MappingApi for HttpApi {
    async fn list(&self) -> Result<MappingList, ApiError> {
        let response = Self::send(self.request(Method::GET, MAPPINGS_PATH)).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn get(&self, id: &str) -> Result<Mapping, ApiError> {
        let path = Self::item_path(id)?;
        let response = Self::send(self.request(Method::GET, &path)).await?;
        let text = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        Ok(Mapping::from_value(value)?)
    }

    async fn create(&self, mapping: &NewMapping) -> Result<(), ApiError> {
        Self::send(self.request(Method::POST, MAPPINGS_PATH).json(mapping)).await?;
        Ok(())
    }

    async fn update(&self, id: &str, mapping: &Mapping) -> Result<(), ApiError> {
        Self::send(self.request(Method::PUT, &Self::item_path(id)?).json(mapping)).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        Self::send(self.request(Method::DELETE, &Self::item_path(id)?)).await?;
        Ok(())
    }

    async fn save(&self) -> Result<(), ApiError> {
        Self::send(self.request(Method::POST, SAVE_PATH)).await?;
        Ok(())
    }

    async fn reset(&self) -> Result<(), ApiError> {
        Self::send(self.request(Method::POST, RESET_PATH)).await?;
        Ok(())
    }
}
