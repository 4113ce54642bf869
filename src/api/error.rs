//! API error handling.
//!
//! Every failure on the provisioning endpoint is reported the same way:
//! HTTP 400 with `{"error": "<message>"}` and the CORS headers. Clients only
//! get the free-text message; there are no per-failure codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::cors;
use crate::provisioning::ProvisionError;

/// The error response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Bad request error (400)
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
        };

        (self.status, cors::headers(), Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ProvisionError> for ApiError {
    fn from(err: ProvisionError) -> Self {
        match &err {
            ProvisionError::InvalidBody(_) | ProvisionError::MissingFullName => {
                tracing::info!("Rejected provisioning request: {}", err);
            }
            ProvisionError::Identity(source) => {
                tracing::warn!(status = ?source.status(), "Identity creation failed: {}", err);
            }
            ProvisionError::Profile { user_id, source } => {
                tracing::error!(
                    user_id = %user_id,
                    status = ?source.status(),
                    "Profile creation failed: {}",
                    err
                );
            }
        }

        ApiError::bad_request(err.to_string())
    }
}
