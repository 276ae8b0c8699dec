// HTTP API error types
use axum::extract::rejection::JsonRejection;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// API error with the status code and client-safe message it maps to.
///
/// Every handler failure funnels through this type; the real cause is
/// logged server-side and only the generic message leaves the process.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request - missing or blank required field
    Validation(String),

    // 400 Bad Request - duplicate unique key (the signup route reports
    // duplicates as a plain client error, not 409)
    Conflict(String),

    // 401 Unauthorized - missing or invalid session
    Auth(String),

    // 404 Not Found - absent, or owned by someone else (indistinguishable)
    NotFound(String),

    // 500 Internal Server Error - anything unanticipated
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Conflict(msg)
            | ApiError::Auth(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        ApiError::Auth(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Convert other error types to ApiError
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // Log the real error but return a generic message
        tracing::error!("database error: {}", err);
        ApiError::internal("an error occurred while processing your request")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        tracing::debug!("request body rejected: {}", err);
        ApiError::validation("request body must be valid JSON")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum. All error bodies share the
// `{error: string}` shape.
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(ApiError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::conflict("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::auth("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn sqlx_errors_become_generic_internal() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        match err {
            ApiError::Internal(msg) => {
                // Nothing about sqlx or SQL may leak to the caller
                assert!(!msg.to_lowercase().contains("sql"));
                assert!(!msg.to_lowercase().contains("row"));
            }
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    #[test]
    fn message_survives_display() {
        let err = ApiError::not_found("memo not found");
        assert_eq!(err.to_string(), "memo not found");
    }
}
