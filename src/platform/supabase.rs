//! HTTP client for a Supabase-compatible platform.
//!
//! Talks to the admin auth API (`/auth/v1/admin/users`) and the REST data
//! API (`/rest/v1/{table}`) with the service-role key. The client keeps no
//! session and never refreshes tokens: every request carries the key.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Response;

use super::{IdentityService, PlatformError, ProfileStore};
use crate::config::PlatformConfig;
use crate::provisioning::{CreatedUser, NewUser, Profile};

/// Fields checked, in order, for a human-readable message in an error body.
const ERROR_MESSAGE_FIELDS: [&str; 4] = ["msg", "message", "error_description", "error"];

pub struct SupabaseClient {
    base_url: String,
    auth_headers: HeaderMap,
    client: reqwest::Client,
}

impl SupabaseClient {
    /// Build the client. Fails up front when the key cannot be sent as a header.
    pub fn new(config: &PlatformConfig) -> Result<Self, PlatformError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            "student-provisioner/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            auth_headers: auth_headers(&config.service_role_key)?,
            client: builder.build()?,
        })
    }
}

fn auth_headers(service_role_key: &str) -> Result<HeaderMap, PlatformError> {
    let invalid = |_: InvalidHeaderValue| {
        PlatformError::InvalidKey("must contain only visible ASCII characters".to_string())
    };
    let apikey = HeaderValue::from_str(service_role_key).map_err(invalid)?;
    let bearer = HeaderValue::from_str(&format!("Bearer {}", service_role_key)).map_err(invalid)?;

    let mut headers = HeaderMap::new();
    headers.insert("apikey", apikey);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[async_trait]
impl IdentityService for SupabaseClient {
    async fn create_user(&self, user: &NewUser) -> Result<CreatedUser, PlatformError> {
        let url = format!("{}/auth/v1/admin/users", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers.clone())
            .json(user)
            .send()
            .await?;

        let response = error_for_status(response).await?;
        response
            .json::<CreatedUser>()
            .await
            .map_err(|e| PlatformError::Decode(format!("user object: {}", e)))
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn insert_row(&self, table: &str, record: &Profile) -> Result<(), PlatformError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers.clone())
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        error_for_status(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `PlatformError::Api` carrying the platform's message.
async fn error_for_status(response: Response) -> Result<Response, PlatformError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string())
    });

    tracing::debug!(status = status.as_u16(), body = %body, "Platform request failed");

    Err(PlatformError::Api {
        status: status.as_u16(),
        message,
    })
}

fn extract_error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ERROR_MESSAGE_FIELDS {
            if let Some(serde_json::Value::String(message)) = map.get(field) {
                if !message.is_empty() {
                    return Some(message.clone());
                }
            }
        }
    }

    Some(body.to_string())
}
