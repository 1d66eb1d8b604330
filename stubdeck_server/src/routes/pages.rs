//! Health check and the server-rendered mappings page

use super::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use stubdeck_common::{
    constants::{HEALTH_PATH, PAGE_PATH},
    listing::render_page,
    ListView, MappingList,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route("/", get(home))
        .route(PAGE_PATH, get(mappings_page))
}

async fn health() -> &'static str {
    "OK"
}

async fn home() -> Redirect {
    Redirect::to(PAGE_PATH)
}

/// Render the current mappings as HTML
async fn mappings_page(State(state): State<AppState>) -> Response {
    let list = match state.wiremock.list_mappings().await {
        Ok(value) => serde_json::from_value::<MappingList>(value).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match list {
        Ok(list) => {
            let status = format!("Loaded {} mappings", list.mappings.len());
            let view = ListView::from_mappings(&list.mappings);
            Html(render_page(&view, &status)).into_response()
        }
        Err(e) => {
            tracing::warn!("Failed to load mappings for page: {}", e);
            let status = format!("Failed to load mappings: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Html(render_page(&ListView::Empty, &status)),
            )
                .into_response()
        }
    }
}
