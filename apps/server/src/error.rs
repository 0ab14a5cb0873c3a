//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Mealcart                               │
//! │                                                                         │
//! │  Handler returns Result<T, ApiError>                                   │
//! │         │                                                               │
//! │         ├── CoreError::CartNotFound ──► 404, empty body                │
//! │         │                                                               │
//! │         ├── CoreError::RecipeNotFound ──► 400, "Recipe not found"      │
//! │         │                                                               │
//! │         └── DbError (any) ──► 500, generic message                     │
//! │                               (details logged, never leaked)           │
//! │                                                                         │
//! │  The two domain failures are terminal caller errors; storage failures  │
//! │  propagate unmodified from the db layer — no local recovery.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use mealcart_core::CoreError;
use mealcart_db::DbError;

/// Machine-readable error category, mapped to an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Resource not found (404, empty body)
    NotFound,

    /// Bad input from the caller (400, message in the body)
    BadRequest,

    /// Internal/storage failure (500, generic message)
    Internal,
}

/// API error returned from handlers.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Machine-readable error code for status mapping
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error (404, empty body on the wire).
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// Creates a bad request error (400, message in the body).
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error (500, generic message).
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts domain errors to API errors.
///
/// The recipe-missing body is the literal `Recipe not found` — callers match
/// on it, so the string is part of the contract.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CartNotFound(id) => ApiError::not_found(format!("Cart not found: {}", id)),
            CoreError::RecipeNotFound(_) => ApiError::bad_request("Recipe not found"),
        }
    }
}

/// Converts database errors to API errors.
///
/// All storage failures surface as a generic 500; the underlying error is
/// logged, never leaked to the caller.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        tracing::error!(error = %err, "Storage operation failed");
        ApiError::internal("Storage operation failed")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.code {
            // Empty body: the id in the message is for logs, not the wire.
            ErrorCode::NotFound => StatusCode::NOT_FOUND.into_response(),
            ErrorCode::BadRequest => (StatusCode::BAD_REQUEST, self.message).into_response(),
            ErrorCode::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.message).into_response()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_cart_not_found_maps_to_404_with_empty_body() {
        let err: ApiError = CoreError::CartNotFound("cart-1".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_recipe_not_found_maps_to_400_with_literal_body() {
        let err: ApiError = CoreError::RecipeNotFound("recipe-1".to_string()).into();
        assert_eq!(err.code, ErrorCode::BadRequest);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "Recipe not found");
    }

    #[tokio::test]
    async fn test_db_error_maps_to_500_generic_message() {
        let err: ApiError = DbError::QueryFailed("secret detail".to_string()).into();
        assert_eq!(err.code, ErrorCode::Internal);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(!body.contains("secret detail"));
    }
}
