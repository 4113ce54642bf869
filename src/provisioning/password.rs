use rand::Rng;
use std::ops::RangeInclusive;

pub const PASSWORD_RANGE: RangeInclusive<u32> = 100_000..=999_999;

/// Generate a six-digit numeric initial password.
///
/// This is a first-login credential that the student is expected to change.
/// Six digits is far too little entropy to act as a lasting secret.
pub fn generate_password() -> String {
    let mut rng = rand::rng();
    rng.random_range(PASSWORD_RANGE).to_string()
}
