use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

pub const JSON_UTF8: &str = "application/json; charset=utf-8";
pub const NOT_FOUND_MESSAGE: &str = "Invalid API path; supported paths are /search and /suggest";

/// Serialize `body` with the service's JSON content type.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))], bytes).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize response body");
            let fallback = json!({ "error": "internal serialization error" }).to_string();
            (StatusCode::INTERNAL_SERVER_ERROR, [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))], fallback).into_response()
        }
    }
}

pub fn not_found() -> Response {
    json_response(StatusCode::NOT_FOUND, &json!({ "error": NOT_FOUND_MESSAGE }))
}

/// Preflight answer: an empty JSON object.
pub fn preflight() -> Response {
    json_response(StatusCode::OK, &json!({}))
}
