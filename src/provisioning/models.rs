use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role stamped on every identity and profile this service creates.
pub const STUDENT_ROLE: &str = "student";

/// Incoming provisioning request.
///
/// Only `full_name` is typed, since the username is derived from it. The other
/// fields are carried to the platform as the client sent them; absent values
/// are left out of the payloads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequest {
    pub full_name: Option<String>,
    pub email: Option<Value>,
    pub group: Option<Value>,
    pub speciality: Option<Value>,
    pub iin: Option<Value>,
    pub category: Option<Value>,
    pub phone: Option<Value>,
    pub date_of_birth: Option<Value>,
}

/// Success payload. The password is returned here once and nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionResult {
    pub success: bool,
    pub user_id: String,
    pub username: String,
    pub password: String,
}

/// Payload for the identity service's admin create-user call.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    pub password: String,
    pub email_confirm: bool,
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserMetadata {
    pub full_name: String,
    pub role: String,
}

/// The part of the identity service's user object we rely on.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedUser {
    pub id: String,
}

/// Profile row inserted into the data store, keyed by the identity id.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    pub username: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_group: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_speciality: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iin: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Value>,
    pub verified_for_food: bool,
    pub balance: f64,
}

impl Profile {
    /// Build a fresh student profile: unverified for food, zero balance.
    pub fn for_student(user_id: String, username: String, request: ProvisionRequest) -> Self {
        Self {
            id: user_id,
            full_name: request.full_name.unwrap_or_default(),
            email: request.email,
            username,
            role: STUDENT_ROLE.to_string(),
            student_group: request.group,
            student_speciality: request.speciality,
            iin: request.iin,
            category: request.category,
            phone: request.phone,
            date_of_birth: request.date_of_birth,
            verified_for_food: false,
            balance: 0.0,
        }
    }
}
