//! Student account provisioning: username and password derivation plus the
//! two-step identity/profile creation flow.

mod models;
mod password;
mod service;
mod username;

pub use models::{
    CreatedUser, NewUser, Profile, ProvisionRequest, ProvisionResult, UserMetadata, STUDENT_ROLE,
};
pub use password::{generate_password, PASSWORD_RANGE};
pub use service::{ProvisionError, Provisioner};
pub use username::{generate_username, transliterate, FALLBACK_USERNAME};

#[cfg(test)]
pub(crate) use service::tests::{FakeIdentity, FakeStore};
