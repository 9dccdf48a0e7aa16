use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The payment method classification sent to the server.
///
/// This is the only payment detail that ever leaves the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "CREDIT_CARD")]
    CreditCard,
}

/// The payment submission payload for `POST /api/payments`.
#[derive(Debug, Serialize)]
pub struct PaymentRequest {
    /// The booking being paid for.
    #[serde(rename = "bookingId")]
    pub booking_id: i64,
    /// The charge, as computed for the booking.
    pub amount: f64,
    /// The method classification. No card field exists on this type.
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
}

/// The server's acknowledgement of an accepted payment.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct Receipt {
    /// The server-assigned payment id.
    pub id: Option<i64>,
    /// The payment state reported by the server.
    pub status: Option<String>,
    /// An optional human-readable note.
    pub message: Option<String>,
}

/// Card details collected by the payment form.
///
/// Deliberately not `Serialize` and zeroized on drop: raw card data is never
/// transmitted, persisted, or logged.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct CardDetails {
    /// The cardholder name.
    pub card_name: String,
    /// The primary account number.
    pub card_number: String,
    /// The expiry in MM/YY form.
    pub expiry: String,
    /// The card verification value.
    pub cvv: String,
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CardDetails([REDACTED])")
    }
}
