//! Client SDK for the event-management REST service: session handling,
//! booking lifecycle control, and thin typed wrappers over the remote API.
//!
//! The two stateful pieces are [`services::session::SessionManager`], which
//! owns the authenticated identity and its persisted record, and
//! [`services::booking::BookingLifecycle`], which drives a booking from seat
//! selection through optional payment to a terminal state. Everything else
//! is glue: request wrappers, projections of server payloads, and display
//! helpers.

pub mod config;
pub mod error;
pub mod storage;

pub mod models {
    pub mod booking;
    pub mod event;
    pub mod payment;
    pub mod session;
    pub mod user;
}

pub mod api {
    pub mod auth;
    pub mod bookings;
    pub mod categories;
    pub mod client;
    pub mod events;
    pub mod payments;
    pub mod users;
}

pub mod services {
    pub mod booking;
    pub mod session;
}

pub mod validation {
    pub mod auth;
    pub mod booking;
}

pub mod util {
    pub mod dates;
    pub mod money;
}
