//! API client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default base URL of the web API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the web API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ApiClientConfig {
    /// Base URL of the web API (e.g., "https://bikeroutes.example")
    #[cfg_attr(
        feature = "config",
        arg(long = "api-base-url", env = "API_BASE_URL", default_value = DEFAULT_API_BASE_URL)
    )]
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for HTTP requests in seconds (0 uses the default)
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_http_timeout")]
    pub http_timeout: u64,

    /// User-Agent header sent with every request
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    pub user_agent: Option<String>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_http_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            http_timeout: default_http_timeout(),
            user_agent: None,
        }
    }
}

impl ApiClientConfig {
    /// Creates a configuration for the API at `api_base_url`.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout.as_secs();
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            DEFAULT_TIMEOUT
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if unset or empty.
    pub fn effective_user_agent(&self) -> String {
        match &self.user_agent {
            Some(user_agent) if !user_agent.trim().is_empty() => user_agent.clone(),
            _ => format!("bikeroutes/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Parses the base URL so that relative endpoints resolve beneath it.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let mut base = self.api_base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
    }
}
