//! Reqwest-based HTTP client for the web API.

use std::sync::Arc;

use bikeroutes_core::{RouteService, SnapService, VoteService};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use super::ApiClientConfig;
use crate::error::{Error, Result};

/// Tracing target for API client operations.
pub const TRACING_TARGET: &str = "bikeroutes_reqwest::client";

/// Longest response body kept in a status error.
const MAX_ERROR_BODY: usize = 512;

/// Inner client that holds the HTTP client and configuration.
struct ApiClientInner {
    http: Client,
    base_url: Url,
    config: ApiClientConfig,
}

/// HTTP client for the bikeroutes web API.
///
/// Implements [`RouteProvider`], [`SnapProvider`] and [`VoteProvider`].
/// Cheap to clone.
///
/// [`RouteProvider`]: bikeroutes_core::RouteProvider
/// [`SnapProvider`]: bikeroutes_core::SnapProvider
/// [`VoteProvider`]: bikeroutes_core::VoteProvider
///
/// # Examples
///
/// ```rust,ignore
/// use bikeroutes_core::RouteProvider;
/// use bikeroutes_reqwest::{ApiClient, ApiClientConfig};
///
/// let client = ApiClient::new(ApiClientConfig::new("http://localhost:3000"))?;
/// let routes = client.load_routes().await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a new API client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.api_base_url,
            timeout_ms = timeout.as_millis(),
            "Creating API client"
        );

        let base_url = config.base_url()?;
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()?;

        let inner = ApiClientInner {
            http,
            base_url,
            config,
        };
        let client = Self {
            inner: Arc::new(inner),
        };

        tracing::info!(
            target: TRACING_TARGET,
            base_url = %client.inner.base_url,
            "API client created successfully"
        );

        Ok(client)
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ApiClientConfig {
        &self.inner.config
    }

    /// Resolves an API path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Converts this client into the services the workflow is built from.
    pub fn into_services(self) -> (RouteService, SnapService, VoteService) {
        (
            RouteService::new(self.clone()),
            SnapService::new(self.clone()),
            VoteService::new(self),
        )
    }

    /// Sends a request and decodes a JSON response body.
    pub(crate) async fn fetch_json<T>(&self, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.send(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Sends a request, failing on non-success statuses.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let mut text = String::from_utf8_lossy(&body).into_owned();
            if text.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|index| text.is_char_boundary(*index))
                    .unwrap_or(0);
                text.truncate(cut);
            }

            tracing::warn!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                "API request failed"
            );
            return Err(Error::Status { status, body: text });
        }

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(ApiClientConfig::default()).unwrap();
        assert!(client.config().user_agent.is_none());
        assert_eq!(
            client.endpoint("/api/routes").unwrap().as_str(),
            "http://localhost:3000/api/routes"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let error = ApiClient::new(ApiClientConfig::new("::not a url")).unwrap_err();
        assert!(matches!(error, Error::Url(_)));
    }
}
