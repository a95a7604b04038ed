use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};
use utoipa::ToSchema;

#[derive(Debug)]
pub enum ApiError {
    Validation(validator::ValidationErrors),
    BadRequest(String),
    MethodNotAllowed,
    Signature(String),
    Payment(String),
    Webhook(String),
    Config(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::BadRequest(e) => write!(f, "Bad request: {}", e),
            ApiError::MethodNotAllowed => write!(f, "Method not allowed"),
            ApiError::Signature(e) => write!(f, "Signature verification error: {}", e),
            ApiError::Payment(e) => write!(f, "Payment provider error: {}", e),
            ApiError::Webhook(e) => write!(f, "Webhook error: {}", e),
            ApiError::Config(e) => write!(f, "Configuration error: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

/// Body shape for every error response: a machine-readable `error`
/// string plus an optional short human-facing `message`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }
}

impl From<ApiError> for (StatusCode, ApiErrorResponse) {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse::new(format!("Validation error: {}", errors)),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiErrorResponse::new(msg)),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ApiErrorResponse::new("Method not allowed"),
            ),
            // The verification detail stays server-side; the caller only
            // learns that the signature did not check out.
            ApiError::Signature(_) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse::new("Webhook signature verification failed"),
            ),
            ApiError::Payment(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorResponse::with_message("Failed to create checkout session", msg),
            ),
            ApiError::Webhook(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorResponse::new("Webhook processing failed"),
            ),
            ApiError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorResponse::new("Service misconfigured"),
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorResponse::new("Internal server error"),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        let (status, body): (StatusCode, ApiErrorResponse) = self.into();
        if status.is_server_error() {
            error!(status = status.as_u16(), detail = %detail, "Request failed");
        } else {
            warn!(status = status.as_u16(), detail = %detail, "Request rejected");
        }
        (status, Json(body)).into_response()
    }
}
