use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vows_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vows_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable, please retry";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error to status, error code and a caller-facing message.
///
/// User-correctable classes carry their reason verbatim so the builder can
/// show it; internal and transient failures are sanitized.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::InvalidSubdomain(msg) => {
            (StatusCode::BAD_REQUEST, "INVALID_SUBDOMAIN", msg.clone())
        }
        CoreError::SubdomainUnavailable(msg) => {
            (StatusCode::CONFLICT, "SUBDOMAIN_UNAVAILABLE", msg.clone())
        }
        CoreError::UnknownLayout(id) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "UNKNOWN_LAYOUT",
            format!("Layout '{id}' is not registered"),
        ),
        CoreError::RenderFailure(msg) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "RENDER_FAILED", msg.clone())
        }
        CoreError::VersionConflict { subdomain, version } => {
            tracing::error!(subdomain = %subdomain, version, "Version conflict on publish");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "VERSION_CONFLICT",
                err.to_string(),
            )
        }
        CoreError::UnknownVersion { .. } => {
            (StatusCode::NOT_FOUND, "UNKNOWN_VERSION", err.to_string())
        }
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unavailable(msg) => {
            tracing::warn!(error = %msg, "Dependency unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                UNAVAILABLE_MESSAGE.to_string(),
            )
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
