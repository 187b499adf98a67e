//! docbridge-server
//!
//! The JSON HTTP front-end:
//!
//! | Method  | Path       | Answer                                   |
//! |---------|------------|------------------------------------------|
//! | GET     | `/search`  | array of `{doc_path, score, preview}`    |
//! | GET     | `/suggest` | array of at most five completions        |
//! | OPTIONS | any        | `{}`                                     |
//! | other   | any        | 404 `{"error": ...}`                     |
//!
//! A missing or empty `q` is answered exactly like an unknown path. Every
//! response allows any origin. Engine failures never surface as HTTP errors:
//! the request just gets an empty array.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use docbridge_core::config::{Settings, SuggestSettings};
use docbridge_core::error::ConfigError;
use docbridge_core::traits::SearchBackend;
use docbridge_engine::{EngineSearch, SuggestionDeriver};

pub mod handlers;
pub mod response;

/// Collaborators handed to every request. Immutable once built.
#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn SearchBackend>,
    suggestions: SuggestionDeriver,
}

impl AppState {
    pub fn new(backend: Arc<dyn SearchBackend>, suggest: &SuggestSettings) -> Self {
        let suggestions = SuggestionDeriver::new(backend.clone(), suggest);
        Self { backend, suggestions }
    }

    /// Wire up the real engine. Fails when the engine binary is missing.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let backend = Arc::new(EngineSearch::from_settings(settings)?);
        Ok(Self::new(backend, &settings.suggest))
    }

    pub fn backend(&self) -> Arc<dyn SearchBackend> { self.backend.clone() }

    pub fn suggestions(&self) -> &SuggestionDeriver { &self.suggestions }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(handlers::search).fallback(handlers::fallback))
        .route("/suggest", get(handlers::suggest).fallback(handlers::fallback))
        .fallback(handlers::fallback)
        .layer(SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")))
        .layer(SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET, OPTIONS")))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl+C. In-flight requests are allowed to finish.
pub async fn serve(addr: impl tokio::net::ToSocketAddrs, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("docbridge listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await?;
    info!("docbridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "could not listen for Ctrl+C; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested, draining connections");
}
