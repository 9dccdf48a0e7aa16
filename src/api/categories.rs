use reqwest::StatusCode;
use serde_json::Value;

use crate::api::client::{ApiClient, rejection_message};
use crate::error::{AppError, Result};
use crate::models::event::Category;
use crate::models::session::Session;

/// Lists all categories.
pub async fn list_categories(client: &ApiClient) -> Result<Vec<Category>> {
    let response = client
        .http()
        .get(client.url("/api/categories"))
        .send()
        .await?;

    if !response.status().is_success() {
        let message = rejection_message(response)
            .await
            .unwrap_or_else(|| "Failed to load categories.".to_string());
        return Err(AppError::Internal(message));
    }
    Ok(response.json::<Vec<Category>>().await?)
}

/// Fetches one category by id.
pub async fn get_category(client: &ApiClient, id: i64) -> Result<Category> {
    let response = client
        .http()
        .get(client.url(&format!("/api/categories/{}", id)))
        .send()
        .await?;

    match response.status() {
        status if status.is_success() => Ok(response.json::<Category>().await?),
        StatusCode::NOT_FOUND => Err(AppError::NotFound),
        _ => {
            let message = rejection_message(response)
                .await
                .unwrap_or_else(|| "Failed to load category.".to_string());
            Err(AppError::Internal(message))
        }
    }
}

/// Creates a category. Admin surface; requires an authorized session.
pub async fn create_category(
    client: &ApiClient,
    session: &Session,
    draft: &Value,
) -> Result<Category> {
    let response = client
        .authorized(client.http().post(client.url("/api/categories")), Some(session))
        .json(draft)
        .send()
        .await?;
    category_from_mutation(response).await
}

/// Updates a category. Admin surface; requires an authorized session.
pub async fn update_category(
    client: &ApiClient,
    session: &Session,
    id: i64,
    draft: &Value,
) -> Result<Category> {
    let response = client
        .authorized(
            client.http().put(client.url(&format!("/api/categories/{}", id))),
            Some(session),
        )
        .json(draft)
        .send()
        .await?;
    category_from_mutation(response).await
}

/// Deletes a category. Admin surface; requires an authorized session.
pub async fn delete_category(client: &ApiClient, session: &Session, id: i64) -> Result<()> {
    let response = client
        .authorized(
            client.http().delete(client.url(&format!("/api/categories/{}", id))),
            Some(session),
        )
        .send()
        .await?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound);
    }
    if !response.status().is_success() {
        let message = rejection_message(response)
            .await
            .unwrap_or_else(|| "Failed to delete category.".to_string());
        return Err(AppError::Internal(message));
    }
    Ok(())
}

async fn category_from_mutation(response: reqwest::Response) -> Result<Category> {
    if !response.status().is_success() {
        let message = rejection_message(response)
            .await
            .unwrap_or_else(|| "Failed to save category.".to_string());
        return Err(AppError::Validation(message));
    }
    Ok(response.json::<Category>().await?)
}
