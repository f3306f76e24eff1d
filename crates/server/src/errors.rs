use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use labelcheck::VerifyError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// Any error that escapes a handler is converted here into the structured
/// 500 response; nothing propagates past the handler boundary unwrapped.
pub enum AppError {
    /// Request-resolution errors from the `labelcheck` core.
    Verify(VerifyError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<VerifyError> for AppError {
    fn from(err: VerifyError) -> Self {
        AppError::Verify(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Verify(err) => {
                error!("VerifyError: {err}");
                err.to_string()
            }
            AppError::Internal(err) => {
                error!("Internal server error: {err:?}");
                err.to_string()
            }
        };

        let body = Json(json!({
            "error": format!("Internal server error: {message}"),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
