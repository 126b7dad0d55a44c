//! HTTP Error Mapping
//!
//! Domain errors become plain-text responses. Client errors carry their
//! reason; server errors are logged under the operation tag and answered
//! with a generic body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use companion::DomainError;

pub const INTERNAL_ERROR: &str = "Internal Error";

/// Domain error raised while serving `operation` (e.g. `COMPANION_PATCH`)
#[derive(Debug, thiserror::Error)]
#[error("[{operation}] {source}")]
pub struct ApiError {
    pub operation: &'static str,
    #[source]
    pub source: DomainError,
}

impl ApiError {
    /// Error mapper for `map_err` that tags errors with `operation`
    pub fn tagged(operation: &'static str) -> impl Fn(DomainError) -> Self {
        move |source| Self { operation, source }
    }

    pub fn status(&self) -> StatusCode {
        match &self.source {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Repository(_)
            | DomainError::ExternalService(_)
            | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(operation = self.operation, error = %self.source, "{}", self);
            return (status, INTERNAL_ERROR).into_response();
        }

        (status, self.source.to_string()).into_response()
    }
}
