use serde::Serialize;

use crate::api::client::{ApiClient, rejection_message};
use crate::error::{AppError, Result};
use crate::models::session::Session;
use crate::models::user::{RegisterProfile, ServerUser};

/// A partial profile update. `None` fields are left untouched server-side;
/// the caller preserves the role explicitly so an update never demotes.
#[derive(Debug, Serialize, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Submits a registration profile.
pub async fn register(client: &ApiClient, profile: &RegisterProfile) -> Result<ServerUser> {
    // Debug on RegisterProfile redacts the password.
    tracing::debug!("Sending registration request: {:?}", profile);

    let response = client
        .http()
        .post(client.url("/api/users/register"))
        .json(profile)
        .send()
        .await?;

    if response.status().is_success() {
        let user = response.json::<ServerUser>().await.unwrap_or_default();
        tracing::info!("✅ Registration accepted");
        return Ok(user);
    }

    let message = rejection_message(response)
        .await
        .unwrap_or_else(|| "Registration failed. Please try again.".to_string());
    Err(AppError::Registration(message))
}

/// Fetches the authenticated user's profile.
pub async fn get_profile(client: &ApiClient, session: &Session) -> Result<ServerUser> {
    let response = client
        .authorized(client.http().get(client.url("/api/users/profile")), Some(session))
        .send()
        .await?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(AppError::NotFound);
    }
    if !response.status().is_success() {
        let message = rejection_message(response)
            .await
            .unwrap_or_else(|| "Failed to load profile.".to_string());
        return Err(AppError::Internal(message));
    }
    Ok(response.json::<ServerUser>().await?)
}

/// Updates the authenticated user's profile.
pub async fn update_profile(
    client: &ApiClient,
    session: &Session,
    update: &ProfileUpdate,
) -> Result<ServerUser> {
    let response = client
        .authorized(client.http().put(client.url("/api/users/profile")), Some(session))
        .json(update)
        .send()
        .await?;

    if !response.status().is_success() {
        let message = rejection_message(response)
            .await
            .unwrap_or_else(|| "Failed to update profile.".to_string());
        return Err(AppError::Validation(message));
    }
    Ok(response.json::<ServerUser>().await?)
}
