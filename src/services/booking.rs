use crate::api::bookings::{self as bookings_api, BookingRequest};
use crate::api::client::ApiClient;
use crate::api::{events as events_api, payments as payments_api};
use crate::error::{AppError, Result};
use crate::models::booking::{Booking, BookingStatus};
use crate::models::payment::{PaymentMethod, PaymentRequest, Receipt};
use crate::models::session::Session;
use crate::validation::booking::validate_quantity;

/// Where the flow goes after a booking is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextStep {
    /// A positive total: the payment step comes next.
    Payment,
    /// A zero total: the booking confirmed with no payment step.
    Confirmation,
}

/// The result of a successful booking submission.
#[derive(Clone, Debug)]
pub struct BookingCreated {
    /// The booking in its post-creation local state.
    pub booking: Booking,
    /// The stage the caller should route to.
    pub next: NextStep,
}

/// The user's answer to the cancellation prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelDecision {
    /// The user confirmed; the cancellation request is issued.
    Confirmed,
    /// The user dismissed the prompt; nothing happens.
    Declined,
}

/// Drives one booking from seat selection through optional payment to its
/// terminal state.
///
/// Submissions are single-flight: while one is in progress the controller
/// rejects a second trigger, which is what disables the form button in the
/// original flow. Local state is only mutated after a response has been
/// received and validated, so an aborted request leaves nothing half-updated.
pub struct BookingLifecycle {
    api: ApiClient,
    submitting: bool,
}

impl BookingLifecycle {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            submitting: false,
        }
    }

    /// Creates a booking for `quantity` seats at an event.
    ///
    /// Requires a valid session (there is no anonymous fallback identity);
    /// fetches the event under the configured deadline, validates the
    /// quantity against `min(10, available seats)`, computes the total from
    /// the coerced unit price, and submits. Returns the created booking and
    /// the step to route to next.
    pub async fn create_booking(
        &mut self,
        event_id: i64,
        quantity: i64,
        session: &Session,
    ) -> Result<BookingCreated> {
        self.begin_submission()?;
        let result = self.create_booking_inner(event_id, quantity, session).await;
        self.submitting = false;
        result
    }

    async fn create_booking_inner(
        &self,
        event_id: i64,
        quantity: i64,
        session: &Session,
    ) -> Result<BookingCreated> {
        require_session(session)?;

        let event = events_api::get_event(&self.api, event_id, Some(session)).await?;
        validate_quantity(quantity, event.available_seats())?;

        let total_amount = event.price * quantity as f64;
        tracing::debug!(
            event_id,
            quantity,
            total_amount,
            "Submitting booking"
        );

        let request = BookingRequest {
            user_id: session.identity_value(),
            event_id,
            quantity,
            total_amount,
            event_name: if event.name.is_empty() {
                "Event".to_string()
            } else {
                event.name.clone()
            },
            customer_name: session
                .name
                .clone()
                .unwrap_or_else(|| session.username.clone()),
        };

        let id = bookings_api::create_booking(&self.api, session, &request).await?;
        let mut booking = Booking::pending(id, event_id, request.event_name, quantity, total_amount);

        let next = if booking.requires_payment() {
            NextStep::Payment
        } else {
            booking.confirm_free()?;
            NextStep::Confirmation
        };

        tracing::info!("✅ Booking {} created, next step: {:?}", id, next);
        Ok(BookingCreated { booking, next })
    }

    /// Fetches a booking, trying each lookup strategy in turn.
    ///
    /// Direct lookup first; when that fails, the status-only endpoint; when
    /// the full record still cannot be assembled, the identity's booking
    /// list is scanned for a matching id. `NotFound` only after all three.
    pub async fn fetch_booking(&self, booking_id: i64, session: &Session) -> Result<Booking> {
        require_session(session)?;

        match bookings_api::get_booking(&self.api, session, booking_id).await {
            Ok(booking) => return Ok(booking),
            Err(e) => {
                tracing::warn!("Direct booking fetch failed, trying status endpoint: {}", e);
            }
        }

        if let Err(e) = bookings_api::get_booking_status(&self.api, session, booking_id).await {
            tracing::warn!("Status lookup failed as well: {}", e);
        }

        let bookings = self.list_bookings(session).await.unwrap_or_default();
        bookings
            .into_iter()
            .find(|b| b.id == booking_id)
            .ok_or(AppError::NotFound)
    }

    /// Lists the session identity's bookings.
    pub async fn list_bookings(&self, session: &Session) -> Result<Vec<Booking>> {
        require_session(session)?;
        bookings_api::list_user_bookings(&self.api, session, &session.identity_value()).await
    }

    /// Submits the payment for a pending booking.
    ///
    /// Only the method classification travels; card data never enters this
    /// path. On acceptance the booking becomes CONFIRMED/PAID; on rejection
    /// it stays PENDING/NOT_PAID and the user may resubmit.
    pub async fn submit_payment(
        &mut self,
        booking: &mut Booking,
        session: &Session,
    ) -> Result<Receipt> {
        self.begin_submission()?;
        let result = self.submit_payment_inner(booking, session).await;
        self.submitting = false;
        result
    }

    async fn submit_payment_inner(
        &self,
        booking: &mut Booking,
        session: &Session,
    ) -> Result<Receipt> {
        require_session(session)?;

        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::Booking(
                "This booking has been cancelled".to_string(),
            ));
        }
        if booking.total_amount <= 0.0 {
            return Err(AppError::Validation(
                "This booking does not require payment".to_string(),
            ));
        }

        let request = PaymentRequest {
            booking_id: booking.id,
            amount: booking.total_amount,
            payment_method: PaymentMethod::CreditCard,
        };

        let receipt = payments_api::submit_payment(&self.api, session, &request).await?;

        // The response is in hand and validated; only now does local state move.
        booking.mark_paid()?;
        tracing::info!("✅ Payment accepted for booking {}", booking.id);
        Ok(receipt)
    }

    /// Cancels a booking, gated on the user's explicit confirmation.
    ///
    /// A declined prompt is a local no-op. Returns whether a cancellation
    /// was actually issued; cancelling an already-gone booking succeeds.
    pub async fn cancel_booking(
        &self,
        booking_id: i64,
        decision: CancelDecision,
        session: &Session,
    ) -> Result<bool> {
        if decision == CancelDecision::Declined {
            return Ok(false);
        }
        require_session(session)?;

        bookings_api::delete_booking(&self.api, session, booking_id).await?;
        tracing::info!("Booking {} cancelled", booking_id);
        Ok(true)
    }

    fn begin_submission(&mut self) -> Result<()> {
        if self.submitting {
            return Err(AppError::Validation(
                "A submission is already in progress".to_string(),
            ));
        }
        self.submitting = true;
        Ok(())
    }
}

/// Booking operations fail closed: no valid session, no request.
fn require_session(session: &Session) -> Result<()> {
    if !session.is_valid() {
        return Err(AppError::Authentication(
            "Please log in to manage bookings".to_string(),
        ));
    }
    Ok(())
}
