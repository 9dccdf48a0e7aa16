use thiserror::Error;

/// The crate's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// An authentication error (invalid credentials).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A registration rejection from the server.
    #[error("Registration failed: {0}")]
    Registration(String),

    /// A local validation error (no network call was made).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A server-side booking rejection.
    #[error("Booking failed: {0}")]
    Booking(String),

    /// A payment rejection.
    #[error("Payment failed: {0}")]
    Payment(String),

    /// A resource not found error.
    #[error("Resource not found")]
    NotFound,

    /// A network/transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// A request that exceeded its deadline and was aborted.
    #[error("Request timed out")]
    Timeout,

    /// An I/O error (session store).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Translates the error into the inline-alert message shown to the user.
    ///
    /// Prefers the server-supplied message where one was captured, otherwise
    /// falls back to a fixed human-readable text.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Authentication(msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                msg.clone()
            }

            AppError::Registration(msg) => {
                tracing::warn!("Registration failed: {}", msg);
                msg.clone()
            }

            AppError::Validation(msg) => {
                tracing::debug!("Validation error: {}", msg);
                msg.clone()
            }

            AppError::Booking(msg) => {
                tracing::warn!("Booking failed: {}", msg);
                msg.clone()
            }

            AppError::Payment(msg) => {
                tracing::warn!("Payment rejected: {}", msg);
                "Payment failed. Please check your card details and try again.".to_string()
            }

            AppError::NotFound => {
                tracing::debug!("Resource not found");
                "Booking not found or has been removed.".to_string()
            }

            AppError::Network(msg) => {
                tracing::error!("Network error: {}", msg);
                "An unexpected error occurred. Please try again later.".to_string()
            }

            AppError::Timeout => {
                tracing::warn!("Request timed out");
                "Request timed out. Please try again later.".to_string()
            }

            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                "An unexpected error occurred. Please try again later.".to_string()
            }

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An unexpected error occurred. Please try again later.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Timeout
        } else {
            AppError::Network(e.to_string())
        }
    }
}
