use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::{ApiClient, rejection_message};
use crate::error::{AppError, Result};
use crate::models::booking::Booking;
use crate::models::session::Session;

/// The creation payload for `POST /api/bookings`.
#[derive(Debug, Serialize)]
pub struct BookingRequest {
    /// The authenticated identity; numeric where the identity is numeric.
    #[serde(rename = "userId")]
    pub user_id: Value,
    #[serde(rename = "eventId")]
    pub event_id: i64,
    pub quantity: i64,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    #[serde(rename = "eventName")]
    pub event_name: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
}

/// The status-only view of a booking.
#[derive(Clone, Debug, Deserialize)]
pub struct BookingStatusResponse {
    pub status: Option<String>,
    pub message: Option<String>,
}

/// Creates a booking; the response body is the bare server-assigned id.
pub async fn create_booking(
    client: &ApiClient,
    session: &Session,
    request: &BookingRequest,
) -> Result<i64> {
    let response = client
        .authorized(client.http().post(client.url("/api/bookings")), Some(session))
        .json(request)
        .send()
        .await?;

    if !response.status().is_success() {
        let message = rejection_message(response)
            .await
            .unwrap_or_else(|| "Booking failed. Try again.".to_string());
        return Err(AppError::Booking(message));
    }

    let raw = response.json::<Value>().await?;
    booking_id_from_response(&raw)
        .ok_or_else(|| AppError::Booking("Server returned no booking id".to_string()))
}

/// Fetches the full booking record.
pub async fn get_booking(client: &ApiClient, session: &Session, id: i64) -> Result<Booking> {
    let response = client
        .authorized(
            client.http().get(client.url(&format!("/api/bookings/{}", id))),
            Some(session),
        )
        .send()
        .await?;

    match response.status() {
        status if status.is_success() => {
            let raw = response.json::<Value>().await?;
            Booking::from_value(&raw).ok_or(AppError::NotFound)
        }
        StatusCode::NOT_FOUND => Err(AppError::NotFound),
        _ => {
            let message = rejection_message(response)
                .await
                .unwrap_or_else(|| "Failed to load booking.".to_string());
            Err(AppError::Internal(message))
        }
    }
}

/// Fetches the status-only view of a booking.
pub async fn get_booking_status(
    client: &ApiClient,
    session: &Session,
    id: i64,
) -> Result<BookingStatusResponse> {
    let response = client
        .authorized(
            client
                .http()
                .get(client.url(&format!("/api/bookings/{}/status", id))),
            Some(session),
        )
        .send()
        .await?;

    match response.status() {
        status if status.is_success() => Ok(response.json::<BookingStatusResponse>().await?),
        StatusCode::NOT_FOUND => Err(AppError::NotFound),
        _ => {
            let message = rejection_message(response)
                .await
                .unwrap_or_else(|| "Failed to load booking status.".to_string());
            Err(AppError::Internal(message))
        }
    }
}

/// Lists the bookings owned by an identity.
pub async fn list_user_bookings(
    client: &ApiClient,
    session: &Session,
    identity: &Value,
) -> Result<Vec<Booking>> {
    let path = match identity {
        Value::String(s) => format!("/api/bookings/user/{}", s),
        other => format!("/api/bookings/user/{}", other),
    };

    let response = client
        .authorized(client.http().get(client.url(&path)), Some(session))
        .send()
        .await?;

    if !response.status().is_success() {
        let message = rejection_message(response)
            .await
            .unwrap_or_else(|| "Failed to load your bookings.".to_string());
        return Err(AppError::Internal(message));
    }

    let raw = response.json::<Value>().await?;
    let bookings = match raw {
        Value::Array(items) => items.iter().filter_map(Booking::from_value).collect(),
        _ => Vec::new(),
    };
    Ok(bookings)
}

/// Issues the cancellation request. A booking the server no longer knows
/// about counts as cancelled, which keeps the operation idempotent for the
/// caller.
pub async fn delete_booking(client: &ApiClient, session: &Session, id: i64) -> Result<()> {
    let response = client
        .authorized(
            client
                .http()
                .delete(client.url(&format!("/api/bookings/{}", id))),
            Some(session),
        )
        .send()
        .await?;

    match response.status() {
        status if status.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Ok(()),
        _ => {
            let message = rejection_message(response)
                .await
                .unwrap_or_else(|| "Failed to cancel booking. Please try again.".to_string());
            Err(AppError::Booking(message))
        }
    }
}

/// Reads the created id out of the response body: a bare number, a numeric
/// string, or an object carrying an `id`.
fn booking_id_from_response(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => map.get("id").and_then(Value::as_i64),
        _ => None,
    }
}
