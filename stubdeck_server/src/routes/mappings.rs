//! Mapping API: pass-through to the WireMock admin API

use super::{ApiError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use stubdeck_common::constants::{MAPPINGS_PATH, RESET_PATH, SAVE_PATH};

/// Build the mapping API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route(MAPPINGS_PATH, get(list_mappings).post(create_mapping))
        .route(SAVE_PATH, post(save_to_files))
        .route(RESET_PATH, post(reset_all))
        .route(
            &format!("{}/{{id}}", MAPPINGS_PATH),
            get(get_mapping).put(update_mapping).delete(delete_mapping),
        )
}

async fn list_mappings(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.wiremock.list_mappings().await?))
}

async fn get_mapping(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.wiremock.get_mapping(&id).await?))
}

async fn create_mapping(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    require_object(&body)?;
    Ok(Json(state.wiremock.create_mapping(&body).await?))
}

async fn update_mapping(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    require_object(&body)?;
    Ok(Json(state.wiremock.update_mapping(&id, &body).await?))
}

async fn delete_mapping(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.wiremock.delete_mapping(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Persist current in-memory mappings to files
async fn save_to_files(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.wiremock.save_to_files().await?))
}

/// Reset mappings (drops every in-memory stub)
async fn reset_all(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.wiremock.reset_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

fn require_object(body: &Value) -> Result<(), ApiError> {
    if body.is_object() {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Mapping must be a JSON object"))
    }
}
