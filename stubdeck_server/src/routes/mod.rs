//! Route handlers for the Stubdeck server

pub mod mappings;
pub mod pages;

use crate::config::Config;
use crate::wiremock::{UpstreamError, WireMockClient};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub wiremock: Arc<WireMockClient>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            wiremock: Arc::new(WireMockClient::new(&config.admin_base)),
        }
    }
}

/// Build the application router (without middleware layers)
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(pages::router())
        .merge(mappings::router())
        .with_state(state)
}

/// Error returned by API handlers
///
/// Upstream failures surface as a plain-text 500 so the console can show
/// the detail verbatim.
pub enum ApiError {
    Upstream(UpstreamError),
    BadRequest(&'static str),
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Upstream(err @ UpstreamError::InvalidId(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            ApiError::Upstream(err) => {
                tracing::warn!("WireMock call failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        }
    }
}
