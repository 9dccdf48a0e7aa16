use std::time::Duration;

use reqwest::RequestBuilder;
use serde_json::Value;

use crate::config::Config;
use crate::error::Result;
use crate::models::session::Session;

/// The shared HTTP client for the event-management API.
///
/// Holds the single configured base URL; every wrapper builds its request
/// through this type so authentication headers and timeouts are applied in
/// one place.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    event_fetch_timeout: Duration,
}

impl ApiClient {
    /// Creates a client from the resolved configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(crate::error::AppError::from)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            event_fetch_timeout: Duration::from_secs(config.event_fetch_timeout_secs),
        })
    }

    /// Creates a client against an explicit base URL with default settings.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            event_fetch_timeout: Duration::from_secs(10),
        }
    }

    /// Resolves an API path against the configured origin.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The deadline applied to the event-detail fetch.
    pub(crate) fn event_fetch_timeout(&self) -> Duration {
        self.event_fetch_timeout
    }

    /// Attaches the session's credential to a request, when one is present.
    pub(crate) fn authorized(
        &self,
        builder: RequestBuilder,
        session: Option<&Session>,
    ) -> RequestBuilder {
        match session {
            Some(session) => builder.header(
                reqwest::header::AUTHORIZATION,
                session.authorization_header(),
            ),
            None => builder,
        }
    }
}

/// Extracts the server-supplied message from a rejected response body.
///
/// The backend answers rejections either with a bare string or with an
/// object carrying a `message` field; both are accepted. Anything else
/// yields `None` and the caller falls back to its fixed text.
pub(crate) async fn rejection_message(response: reqwest::Response) -> Option<String> {
    let text = response.text().await.ok()?;
    if let Ok(value) = serde_json::from_str::<Value>(&text) {
        return match value {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };
    }
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
