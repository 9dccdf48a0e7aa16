use reqwest::StatusCode;
use serde_json::Value;

use crate::api::client::{ApiClient, rejection_message};
use crate::error::{AppError, Result};
use crate::models::event::Event;
use crate::models::session::Session;

/// Lists all events visible to the caller.
pub async fn list_events(client: &ApiClient, session: Option<&Session>) -> Result<Vec<Event>> {
    fetch_event_list(client, session, "/api/events").await
}

/// Lists upcoming events.
pub async fn upcoming_events(client: &ApiClient, session: Option<&Session>) -> Result<Vec<Event>> {
    fetch_event_list(client, session, "/api/events/upcoming").await
}

/// Fetches one event by id.
///
/// This call backs the booking form, so it carries the configured deadline:
/// on expiry the in-flight request is aborted and `Timeout` surfaces with no
/// state touched.
pub async fn get_event(client: &ApiClient, id: i64, session: Option<&Session>) -> Result<Event> {
    let response = client
        .authorized(
            client.http().get(client.url(&format!("/api/events/{}", id))),
            session,
        )
        .timeout(client.event_fetch_timeout())
        .send()
        .await?;

    match response.status() {
        status if status.is_success() => {
            let raw = response.json::<Value>().await?;
            Ok(Event::from_value(&raw))
        }
        StatusCode::NOT_FOUND => Err(AppError::NotFound),
        _ => {
            let message = rejection_message(response)
                .await
                .unwrap_or_else(|| "Server error occurred.".to_string());
            Err(AppError::Internal(message))
        }
    }
}

/// Creates an event. Requires an authorized session.
pub async fn create_event(client: &ApiClient, session: &Session, draft: &Value) -> Result<Event> {
    let response = client
        .authorized(client.http().post(client.url("/api/events")), Some(session))
        .json(draft)
        .send()
        .await?;
    event_from_mutation(response).await
}

/// Updates an event. Requires an authorized session.
pub async fn update_event(
    client: &ApiClient,
    session: &Session,
    id: i64,
    draft: &Value,
) -> Result<Event> {
    let response = client
        .authorized(
            client.http().put(client.url(&format!("/api/events/{}", id))),
            Some(session),
        )
        .json(draft)
        .send()
        .await?;
    event_from_mutation(response).await
}

/// Deletes an event. Requires an authorized session.
pub async fn delete_event(client: &ApiClient, session: &Session, id: i64) -> Result<()> {
    let response = client
        .authorized(
            client.http().delete(client.url(&format!("/api/events/{}", id))),
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
            .unwrap_or_else(|| "Failed to delete event.".to_string());
        return Err(AppError::Internal(message));
    }
    Ok(())
}

async fn fetch_event_list(
    client: &ApiClient,
    session: Option<&Session>,
    path: &str,
) -> Result<Vec<Event>> {
    let response = client
        .authorized(client.http().get(client.url(path)), session)
        .send()
        .await?;

    if !response.status().is_success() {
        let message = rejection_message(response)
            .await
            .unwrap_or_else(|| "Failed to load events.".to_string());
        return Err(AppError::Internal(message));
    }

    let raw = response.json::<Value>().await?;
    Ok(project_event_list(&raw))
}

async fn event_from_mutation(response: reqwest::Response) -> Result<Event> {
    if !response.status().is_success() {
        let message = rejection_message(response)
            .await
            .unwrap_or_else(|| "Failed to save event.".to_string());
        return Err(AppError::Validation(message));
    }
    let raw = response.json::<Value>().await?;
    Ok(Event::from_value(&raw))
}

/// Projects a list response onto events, tolerating the shapes the backend
/// has been seen returning: a bare array, a `{ "data": [...] }` wrapper, or
/// a single object.
pub(crate) fn project_event_list(raw: &Value) -> Vec<Event> {
    match raw {
        Value::Array(items) => items.iter().map(Event::from_value).collect(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.iter().map(Event::from_value).collect(),
            _ => vec![Event::from_value(raw)],
        },
        _ => Vec::new(),
    }
}
