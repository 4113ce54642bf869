//! Collaborators on the managed platform.
//!
//! The provisioning flow only needs two capabilities: creating an auth
//! identity and inserting a row. Both are expressed as narrow traits so the
//! orchestrator can run against the real HTTP client or an in-memory double.

mod supabase;

pub use supabase::SupabaseClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::provisioning::{CreatedUser, NewUser, Profile};

#[derive(Debug, Error)]
pub enum PlatformError {
    /// The platform answered with a non-success status; `message` is what it said.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to reach platform: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected platform response: {0}")]
    Decode(String),

    #[error("Invalid service role key: {0}")]
    InvalidKey(String),
}

impl PlatformError {
    pub fn status(&self) -> Option<u16> {
        match self {
            PlatformError::Api { status, .. } => Some(*status),
            PlatformError::Transport(e) => e.status().map(|s| s.as_u16()),
            PlatformError::Decode(_) | PlatformError::InvalidKey(_) => None,
        }
    }
}

/// Identity-management service: issues auth users.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create an auth user, already email-confirmed, returning its identifier.
    async fn create_user(&self, user: &NewUser) -> Result<CreatedUser, PlatformError>;
}

/// Tabular data store.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn insert_row(&self, table: &str, record: &Profile) -> Result<(), PlatformError>;
}
