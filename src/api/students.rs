use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::cors;
use super::error::ApiError;
use crate::provisioning::Provisioner;
use crate::AppState;

/// Provision a student account and return the one-time credentials.
///
/// The body is parsed here rather than through the `Json` extractor so that a
/// malformed body, or one over the default 2 MB limit, is reported as
/// `400 {"error": ...}` like every other failure.
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let body = body.map_err(|rejection| {
        tracing::info!("Rejected provisioning request body: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    })?;
    let request = Provisioner::parse_request(&body)?;
    let result = state.provisioner.provision(request).await?;

    Ok((cors::headers(), Json(result)).into_response())
}

/// CORS pre-flight.
pub async fn preflight() -> impl IntoResponse {
    (cors::headers(), "ok")
}
