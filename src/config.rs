//! Process-wide configuration for the Compass gateway.
//!
//! Built once at startup from CLI flags and environment (after `.env` has been
//! loaded) and shared read-only by every tool invocation.

use std::fmt;
use std::time::Duration;

/// Environment variable holding the OSS Compass access token.
pub const ACCESS_TOKEN_ENV: &str = "GITEE_ACCESS_TOKEN";

/// Default upstream API root.
pub const DEFAULT_BASE_URL: &str = "https://compass.gitee.com";

/// Default per-call timeout for upstream requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable gateway configuration.
#[derive(Clone)]
pub struct ServerConfig {
    access_token: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl ServerConfig {
    /// Create a configuration. Empty tokens are treated as absent.
    pub fn new(access_token: Option<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            access_token: access_token.filter(|token| !token.is_empty()),
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join the base URL and an endpoint path with exactly one `/` at the seam.
    ///
    /// No escaping is applied beyond plain concatenation.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(
            None,
            DEFAULT_BASE_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }
}

// Never print the token itself.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
