use reqwest::StatusCode;
use serde_json::json;

use crate::api::client::{ApiClient, rejection_message};
use crate::error::{AppError, Result};
use crate::models::user::ServerUser;

/// Exchanges a Basic credential for the authenticated user's payload.
///
/// The credential is the full `Authorization` header value; the request body
/// is empty by contract.
pub async fn login(client: &ApiClient, credential: &str) -> Result<ServerUser> {
    tracing::debug!("Sending login request");

    let response = client
        .http()
        .post(client.url("/api/auth/login"))
        .header(reqwest::header::AUTHORIZATION, credential)
        .json(&json!({}))
        .send()
        .await?;

    match response.status() {
        status if status.is_success() => response
            .json::<ServerUser>()
            .await
            .map_err(|_| AppError::Authentication("Invalid response from server".to_string())),
        StatusCode::UNAUTHORIZED => Err(AppError::Authentication(
            "Invalid username or password".to_string(),
        )),
        _ => {
            let message = rejection_message(response)
                .await
                .unwrap_or_else(|| "Login failed. Please try again.".to_string());
            Err(AppError::Authentication(message))
        }
    }
}
