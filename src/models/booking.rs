use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::util::money;

/// The lifecycle state of a booking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Created on the server, awaiting confirmation (or payment).
    #[serde(rename = "PENDING")]
    Pending,
    /// Terminal success state.
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    /// Terminal state after user cancellation.
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

/// Whether a booking has been paid for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// No successful payment has been recorded.
    #[serde(rename = "NOT_PAID")]
    NotPaid,
    /// A payment was accepted for this booking.
    #[serde(rename = "PAID")]
    Paid,
}

/// A reservation of seats at an event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Booking {
    /// The server-assigned booking id.
    pub id: i64,
    /// The booked event.
    pub event_id: Option<i64>,
    /// The booked event's name.
    pub event_name: String,
    /// The number of seats reserved.
    pub quantity: i64,
    /// The total charge, computed as unit price times quantity.
    pub total_amount: f64,
    /// The lifecycle state.
    pub status: BookingStatus,
    /// The payment state.
    pub payment_status: PaymentStatus,
}

impl Booking {
    /// A freshly created booking in its initial server-assigned state.
    pub fn pending(id: i64, event_id: i64, event_name: String, quantity: i64, total_amount: f64) -> Booking {
        Booking {
            id,
            event_id: Some(event_id),
            event_name,
            quantity,
            total_amount,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::NotPaid,
        }
    }

    /// Projects a raw server record onto the fields the client depends on.
    ///
    /// A record without a parseable status is treated as pending; a missing
    /// total coerces to 0.
    pub fn from_value(raw: &Value) -> Option<Booking> {
        let id = raw.get("id").and_then(Value::as_i64)?;
        Some(Booking {
            id,
            event_id: raw.get("eventId").and_then(Value::as_i64),
            event_name: raw
                .get("eventName")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            quantity: raw.get("quantity").and_then(Value::as_i64).unwrap_or(1),
            total_amount: money::coerce(raw.get("totalAmount")),
            status: parse_status(raw.get("status")),
            payment_status: parse_payment_status(raw.get("paymentStatus")),
        })
    }

    /// Whether this booking carries a positive charge.
    pub fn requires_payment(&self) -> bool {
        self.total_amount > 0.0 && self.payment_status != PaymentStatus::Paid
    }

    /// Confirms a free booking. Only a pending booking with a zero total may
    /// confirm without a payment step.
    pub fn confirm_free(&mut self) -> Result<()> {
        if self.status != BookingStatus::Pending {
            return Err(AppError::Booking(format!(
                "Cannot confirm booking {} in state {:?}",
                self.id, self.status
            )));
        }
        if self.total_amount > 0.0 {
            return Err(AppError::Booking(format!(
                "Booking {} requires payment before confirmation",
                self.id
            )));
        }
        self.status = BookingStatus::Confirmed;
        Ok(())
    }

    /// Records an accepted payment: the booking becomes confirmed and paid.
    pub fn mark_paid(&mut self) -> Result<()> {
        if self.status == BookingStatus::Cancelled {
            return Err(AppError::Booking(format!(
                "Booking {} is cancelled and cannot be paid",
                self.id
            )));
        }
        self.status = BookingStatus::Confirmed;
        self.payment_status = PaymentStatus::Paid;
        Ok(())
    }

    /// Moves the booking to its terminal cancelled state. Cancelling an
    /// already-cancelled booking is a no-op.
    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }
}

fn parse_status(raw: Option<&Value>) -> BookingStatus {
    match raw.and_then(Value::as_str) {
        Some("CONFIRMED") => BookingStatus::Confirmed,
        Some("CANCELLED") => BookingStatus::Cancelled,
        _ => BookingStatus::Pending,
    }
}

fn parse_payment_status(raw: Option<&Value>) -> PaymentStatus {
    match raw.and_then(Value::as_str) {
        Some("PAID") => PaymentStatus::Paid,
        _ => PaymentStatus::NotPaid,
    }
}
