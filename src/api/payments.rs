use reqwest::StatusCode;

use crate::api::client::{ApiClient, rejection_message};
use crate::error::{AppError, Result};
use crate::models::payment::{PaymentRequest, Receipt};
use crate::models::session::Session;

/// Submits a payment for a booking.
///
/// The payload carries only the booking id, the amount, and the method
/// classification; card data never reaches this function.
pub async fn submit_payment(
    client: &ApiClient,
    session: &Session,
    request: &PaymentRequest,
) -> Result<Receipt> {
    tracing::debug!(booking_id = request.booking_id, "Submitting payment");

    let response = client
        .authorized(client.http().post(client.url("/api/payments")), Some(session))
        .json(request)
        .send()
        .await?;

    if response.status().is_success() {
        // An empty acknowledgement body is still an accepted payment.
        return Ok(response.json::<Receipt>().await.unwrap_or_default());
    }

    let message = rejection_message(response)
        .await
        .unwrap_or_else(|| "Payment was rejected.".to_string());
    Err(AppError::Payment(message))
}

/// Fetches the status of a submitted payment.
pub async fn payment_status(client: &ApiClient, session: &Session, id: i64) -> Result<Receipt> {
    let response = client
        .authorized(
            client
                .http()
                .get(client.url(&format!("/api/payments/{}/status", id))),
            Some(session),
        )
        .send()
        .await?;

    match response.status() {
        status if status.is_success() => Ok(response.json::<Receipt>().await?),
        StatusCode::NOT_FOUND => Err(AppError::NotFound),
        _ => {
            let message = rejection_message(response)
                .await
                .unwrap_or_else(|| "Failed to load payment status.".to_string());
            Err(AppError::Internal(message))
        }
    }
}
