//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gleaner_core::GleanError;
use serde_json::json;
use thiserror::Error;

/// Errors a handler can answer with.
///
/// Every variant renders as a JSON body `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required query parameter: url")]
    MissingUrl,

    /// Fetching the page failed, including URL and allow-list checks.
    #[error(transparent)]
    Fetch(#[from] GleanError),

    #[error("no content could be extracted from {0}")]
    ExtractionFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingUrl | Self::Fetch(GleanError::InvalidUrl(_)) => StatusCode::BAD_REQUEST,
            Self::Fetch(GleanError::DomainNotAllowed(_)) => StatusCode::FORBIDDEN,
            Self::Fetch(_) => StatusCode::BAD_GATEWAY,
            Self::ExtractionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %message, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
