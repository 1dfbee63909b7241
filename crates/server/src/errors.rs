use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::auth::errors::AuthError;

/// Maps business errors onto HTTP responses with a `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AuthError::Validation(_)
            | AuthError::DuplicateEmail
            | AuthError::DuplicateUsername
            | AuthError::WeakPassword
            | AuthError::MissingFields
            | AuthError::PasswordMismatch => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidPassword | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::Hash(_) | AuthError::Token(_) | AuthError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            // internal categories stay undifferentiated for callers
            error!(code = self.0.code(), error = %self.0, "internal error");
            return (status, Json(serde_json::json!({"error": "internal error"}))).into_response();
        }
        (status, Json(serde_json::json!({"error": self.0.to_string()}))).into_response()
    }
}
