//! Error types for the film API
//!
//! Provides unified error handling using thiserror. Every variant renders as
//! the `{ "error", "detail" }` envelope.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Detail shown to clients for any infrastructure failure.
pub const INTERNAL_DETAIL: &str = "Internal server error";

// == Api Error Enum ==
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed, missing or out-of-range input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced film does not exist
    #[error("Film not found: {0}")]
    NotFound(String),

    /// The store failed unexpectedly
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    /// No route matches the request path
    #[error("No route for {0}")]
    UnknownRoute(String),

    /// The path exists but not for this method
    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),
}

impl ApiError {
    pub fn film_not_found(film_id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("Film with ID {} does not exist", film_id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::UnknownRoute(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(detail) => ErrorResponse::new("Validation error", detail),
            ApiError::NotFound(detail) => ErrorResponse::new("Film not found", detail),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "store failure");
                ErrorResponse::new("Internal server error", INTERNAL_DETAIL)
            }
            ApiError::UnknownRoute(path) => {
                ErrorResponse::new("Not found", format!("No endpoint at {}", path))
            }
            ApiError::MethodNotAllowed(method) => ErrorResponse::new(
                "Method not allowed",
                format!("Method {} is not allowed on this endpoint", method),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, ApiError>;
