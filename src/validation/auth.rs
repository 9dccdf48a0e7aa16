use garde::Validate;

use crate::error::{AppError, Result};
use crate::models::user::RegisterProfile;

/// Validates a registration profile before any network call is made.
///
/// # Arguments
///
/// * `profile` - The profile the user submitted.
///
/// # Returns
///
/// A `Result<()>` indicating whether the profile is valid.
pub fn validate_profile(profile: &RegisterProfile) -> Result<()> {
    profile.validate().map_err(|report| {
        let message = report
            .iter()
            .map(|(path, error)| format!("{}: {}", path, error))
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(message)
    })
}
