//! Client configuration.

use std::fmt;
use std::time::Duration;

/// Production host of the provider API.
pub const DEFAULT_BASE_URL: &str = "https://api.jowi.club";

/// Credentials and endpoint for a `JowiClient`.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_secret: String,
    /// Host without the version prefix, e.g. `https://api.jowi.club`.
    pub base_url: String,
    /// Whole-request timeout for the bundled transport.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Point the client at another host, e.g. a staging or mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
