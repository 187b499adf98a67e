//! Request handlers. Engine work is blocking, so every search runs on the
//! blocking pool and a failure there only costs the request that hit it.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::Response;
use tracing::{debug, warn};

use docbridge_engine::search_or_empty;

use crate::response::{json_response, not_found, preflight};
use crate::AppState;

/// `q` counts as present only with a non-empty value, so `?q=` routes the
/// same way as a missing parameter.
fn query_param(params: &HashMap<String, String>) -> Option<String> {
    params.get("q").filter(|q| !q.is_empty()).cloned()
}

/// GET /search?q=...
pub async fn search(State(state): State<AppState>, Query(params): Query<HashMap<String, String>>) -> Response {
    let Some(query) = query_param(&params) else {
        return not_found();
    };
    debug!(query = %query, "search request");
    let backend = state.backend();
    let hits = tokio::task::spawn_blocking(move || search_or_empty(backend.as_ref(), &query)).await.unwrap_or_else(|err| {
        warn!(error = %err, "search task did not complete");
        Vec::new()
    });
    json_response(StatusCode::OK, &hits)
}

/// GET /suggest?q=...
pub async fn suggest(State(state): State<AppState>, Query(params): Query<HashMap<String, String>>) -> Response {
    let Some(prefix) = query_param(&params) else {
        return not_found();
    };
    debug!(prefix = %prefix, "suggest request");
    let deriver = state.suggestions().clone();
    let words = tokio::task::spawn_blocking(move || deriver.suggest(&prefix)).await.unwrap_or_else(|err| {
        warn!(error = %err, "suggest task did not complete");
        Vec::new()
    });
    json_response(StatusCode::OK, &words)
}

/// Everything not routed above: preflight for OPTIONS, the JSON 404 otherwise.
pub async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        preflight()
    } else {
        not_found()
    }
}
