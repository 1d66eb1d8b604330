//! Client for the WireMock admin API

use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use stubdeck_common::id_segment;

/// Errors talking to WireMock
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Non-success status; `detail` is the status line plus the body, if any
    #[error("HTTP {detail}")]
    Status { detail: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON from WireMock: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid mapping id {0:?}")]
    InvalidId(String),
}

/// Thin client over `{admin_base}/mappings`
#[derive(Clone)]
pub struct WireMockClient {
    admin_base: String,
    client: Client,
}

impl WireMockClient {
    /// Create a client for an admin base such as `http://localhost:8089/__admin`
    pub fn new(admin_base: &str) -> Self {
        Self {
            admin_base: admin_base.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn admin_base(&self) -> &str {
        &self.admin_base
    }

    pub async fn list_mappings(&self) -> Result<Value, UpstreamError> {
        self.exec_to_value(self.request(Method::GET, "/mappings")).await
    }

    pub async fn get_mapping(&self, id: &str) -> Result<Value, UpstreamError> {
        let path = mapping_path(id)?;
        self.exec_to_value(self.request(Method::GET, &path)).await
    }

    pub async fn create_mapping(&self, body: &Value) -> Result<Value, UpstreamError> {
        let req = self.request(Method::POST, "/mappings").json(body);
        self.exec_to_value(req).await
    }

    pub async fn update_mapping(&self, id: &str, body: &Value) -> Result<Value, UpstreamError> {
        let path = mapping_path(id)?;
        let req = self.request(Method::PUT, &path).json(body);
        self.exec_to_value(req).await
    }

    pub async fn delete_mapping(&self, id: &str) -> Result<(), UpstreamError> {
        let path = mapping_path(id)?;
        self.exec(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    /// Persist stubs to files (WireMock needs a root dir for this)
    pub async fn save_to_files(&self) -> Result<Value, UpstreamError> {
        self.exec_to_value(self.request(Method::POST, "/mappings/save"))
            .await
    }

    /// Drop every in-memory stub
    pub async fn reset_all(&self) -> Result<(), UpstreamError> {
        self.exec(self.request(Method::POST, "/mappings/reset"))
            .await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.admin_base, path);
        tracing::debug!("WireMock {} {}", method, url);
        self.client.request(method, url)
    }

    /// Send the request and return the body of a successful response
    async fn exec(&self, req: RequestBuilder) -> Result<String, UpstreamError> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = if body.trim().is_empty() {
                status.to_string()
            } else {
                format!("{}\n{}", status, body)
            };
            return Err(UpstreamError::Status { detail });
        }

        Ok(body)
    }

    async fn exec_to_value(&self, req: RequestBuilder) -> Result<Value, UpstreamError> {
        let body = self.exec(req).await?;
        if body.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Admin path of one mapping, with the id as a single encoded segment
fn mapping_path(id: &str) -> Result<String, UpstreamError> {
    id_segment(id)
        .map(|segment| format!("/mappings/{}", segment))
        .ok_or_else(|| UpstreamError::InvalidId(id.to_string()))
}
