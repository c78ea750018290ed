//! API error taxonomy and JSON error responses.
//!
//! Two classes only: Not-Found for a missing form, Internal for anything the
//! store rejects. Internal causes are logged and replaced by a generic
//! message; the client sees `{"error": "..."}` either way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Requested resource does not exist.
    #[error("{0}")]
    NotFound(&'static str),
    /// Store or encoding failure, reported generically.
    #[error("{message}")]
    Internal {
        /// Caller-facing message.
        message: &'static str,
        /// Underlying cause, logged but never echoed.
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    /// Not-Found for a missing form.
    #[must_use]
    pub fn form_not_found() -> Self {
        Self::NotFound("Form not found")
    }

    /// Wrap a failure under a caller-facing message.
    #[must_use]
    pub fn internal(message: &'static str, source: anyhow::Error) -> Self {
        Self::Internal { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Internal { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
