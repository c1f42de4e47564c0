//! HTTP client for the remote store provider.
//!
//! Only transport concerns live here: status and JSON validity. The provider
//! envelope is decoded by `storemap_core::transform_api_response`.

use std::time::Duration;

use reqwest::Client;
use storemap_widget::StoreFetcher;

use crate::error::FetchError;

pub const DEFAULT_USER_AGENT: &str = "storemap/0.1 (store-locator)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches provider JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStoreFetcher {
    client: Client,
}

impl HttpStoreFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        Self::with_user_agent(timeout_secs, DEFAULT_USER_AGENT)
    }

    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_user_agent(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] on network failure.
    /// - [`FetchError::UnexpectedStatus`] on a non-2xx response.
    /// - [`FetchError::Deserialize`] if the body is not JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "store provider returned error status");
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "received store provider response");
        serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

impl StoreFetcher for HttpStoreFetcher {
    type Error = FetchError;

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        self.fetch_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_settings() {
        assert!(HttpStoreFetcher::new(DEFAULT_TIMEOUT_SECS).is_ok());
    }

    #[test]
    fn status_error_names_url() {
        let err = FetchError::UnexpectedStatus {
            status: 503,
            url: "https://api.example.com/stores".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected HTTP status 503 from https://api.example.com/stores"
        );
    }
}
