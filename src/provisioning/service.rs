use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::models::{NewUser, Profile, ProvisionRequest, ProvisionResult, UserMetadata, STUDENT_ROLE};
use super::{generate_password, generate_username};
use crate::platform::{IdentityService, PlatformError, ProfileStore};

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("{0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("fullName is required")]
    MissingFullName,

    #[error("{0}")]
    Identity(#[source] PlatformError),

    /// The identity exists but its profile row does not.
    #[error("{source}")]
    Profile {
        user_id: String,
        #[source]
        source: PlatformError,
    },
}

/// Creates a student's auth identity and profile row.
///
/// The two remote calls are not transactional. When the profile insert fails
/// the identity is left in place and the error names the orphaned user id.
pub struct Provisioner {
    identity: Arc<dyn IdentityService>,
    profiles: Arc<dyn ProfileStore>,
    profiles_table: String,
}

impl Provisioner {
    pub fn new(
        identity: Arc<dyn IdentityService>,
        profiles: Arc<dyn ProfileStore>,
        profiles_table: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            profiles,
            profiles_table: profiles_table.into(),
        }
    }

    pub fn parse_request(body: &[u8]) -> Result<ProvisionRequest, ProvisionError> {
        serde_json::from_slice(body).map_err(ProvisionError::InvalidBody)
    }

    pub async fn provision(&self, request: ProvisionRequest) -> Result<ProvisionResult, ProvisionError> {
        let full_name = request
            .full_name
            .clone()
            .ok_or(ProvisionError::MissingFullName)?;

        let username = generate_username(&full_name);
        let password = generate_password();

        let new_user = NewUser {
            email: request.email.clone(),
            password: password.clone(),
            email_confirm: true,
            user_metadata: UserMetadata {
                full_name,
                role: STUDENT_ROLE.to_string(),
            },
        };

        let user = self
            .identity
            .create_user(&new_user)
            .await
            .map_err(ProvisionError::Identity)?;

        info!(user_id = %user.id, email = ?request.email, "Created auth identity");

        let profile = Profile::for_student(user.id.clone(), username.clone(), request);

        if let Err(source) = self.profiles.insert_row(&self.profiles_table, &profile).await {
            warn!(
                user_id = %user.id,
                table = %self.profiles_table,
                error = %source,
                "Profile insert failed; auth identity left without a profile"
            );
            return Err(ProvisionError::Profile {
                user_id: user.id,
                source,
            });
        }

        info!(user_id = %user.id, username = %username, "Provisioned student account");

        Ok(ProvisionResult {
            success: true,
            user_id: user.id,
            username,
            password,
        })
    }
}
