//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to
//! Sentry before responding to the client. All route handlers should
//! return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog collaborator operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Order log operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Catalog(CatalogError::NotFound(id)) => {
                (StatusCode::NOT_FOUND, format!("Product not found: {id}"))
            }
            // Retryable collaborator failures; cart and order state are
            // unaffected, the client simply re-issues the request.
            Self::Catalog(_) => (StatusCode::BAD_GATEWAY, "External service error".to_string()),
            Self::Checkout(CheckoutError::Validation(e)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            Self::Checkout(CheckoutError::EmptyCart) => {
                (StatusCode::CONFLICT, "Cart is empty".to_string())
            }
            Self::Checkout(CheckoutError::Storage(_)) | Self::Storage(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            Self::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {what}")),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
