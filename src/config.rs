use std::env;
use std::path::PathBuf;
use anyhow::{Context, Result};

/// The default timeout for the event-detail fetch, in seconds.
const DEFAULT_EVENT_FETCH_TIMEOUT_SECS: u64 = 10;

/// The client's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The base URL of the event-management API, resolved once at startup.
    ///
    /// Every service uses this single origin; per-service absolute URLs are
    /// not supported.
    pub api_base_url: String,
    /// The timeout applied to the event-detail fetch, in seconds.
    pub event_fetch_timeout_secs: u64,
    /// The path of the persisted session record.
    pub session_file: PathBuf,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        // A trailing slash would produce `//api/...` paths.
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let event_fetch_timeout_secs = match env::var("EVENT_FETCH_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().context("Invalid EVENT_FETCH_TIMEOUT_SECS")?,
            Err(_) => DEFAULT_EVENT_FETCH_TIMEOUT_SECS,
        };

        let session_file = match env::var("SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_file(),
        };

        Ok(Self {
            api_base_url,
            event_fetch_timeout_secs,
            session_file,
        })
    }
}

/// Resolves the default session file location: `~/.eventdesk/session.json`,
/// falling back to the working directory when HOME is unset.
fn default_session_file() -> PathBuf {
    let base = env::var("HOME").map(PathBuf::from).unwrap_or_default();
    base.join(".eventdesk").join("session.json")
}
