//! HTTP front end for gleaner-core.
//!
//! Exposes `/extract`, `/metadata` and `/health`. Pages are obtained through
//! an [`HtmlSource`], so tests can drive the router without a network.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use gleaner_core::{Extractor, HtmlSource};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::ApiError;

/// Shared handler state.
pub struct AppState<S> {
    pub source: Arc<S>,
    pub extractor: Extractor,
}

impl<S> AppState<S> {
    pub fn new(source: S, extractor: Extractor) -> Self {
        Self { source: Arc::new(source), extractor }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self { source: Arc::clone(&self.source), extractor: self.extractor.clone() }
    }
}

/// Builds the router with tracing, CORS, compression and a request timeout.
pub fn app<S: HtmlSource>(state: AppState<S>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/extract", get(routes::extract::<S>))
        .route("/metadata", get(routes::metadata::<S>))
        .layer(TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, request_timeout))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
