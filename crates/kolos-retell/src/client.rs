//! HTTP client for the Retell REST API.
//!
//! Wraps `reqwest` with bearer auth and typed response handling for the two
//! endpoints the service uses: creating a browser web call and fetching a
//! call's details after it ends.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::RetellError;
use crate::types::{CreateWebCallRequest, WebCall};

const DEFAULT_BASE_URL: &str = "https://api.retellai.com/";

/// Client for the Retell REST API.
///
/// Use [`RetellClient::new`] for production or [`RetellClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct RetellClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl RetellClient {
    /// Creates a new client pointed at the production Retell API.
    ///
    /// # Errors
    ///
    /// Returns [`RetellError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, RetellError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`RetellError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`RetellError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, RetellError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("kolos/0.1 (voice-intake)")
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| RetellError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Registers a browser web call for `agent_id`.
    ///
    /// # Errors
    ///
    /// - [`RetellError::Http`] on network failure.
    /// - [`RetellError::Status`] if Retell rejects the request; the body is
    ///   preserved for the caller.
    /// - [`RetellError::Deserialize`] if the response lacks a token or call id.
    pub async fn create_web_call(&self, agent_id: &str) -> Result<WebCall, RetellError> {
        let url = self.endpoint(&["v2", "create-web-call"])?;
        let request = self
            .client
            .post(url)
            .json(&CreateWebCallRequest { agent_id });
        let call: WebCall = self.send_json(request, "create-web-call").await?;

        tracing::info!(call_id = %call.call_id, "retell web call created");
        Ok(call)
    }

    /// Fetches the full call object for `call_id`.
    ///
    /// The payload is returned untyped; callers relay it rather than
    /// interpret it.
    ///
    /// # Errors
    ///
    /// - [`RetellError::Http`] on network failure.
    /// - [`RetellError::Status`] on a non-2xx status.
    /// - [`RetellError::Deserialize`] if the body is not JSON.
    pub async fn get_call(&self, call_id: &str) -> Result<serde_json::Value, RetellError> {
        let url = self.endpoint(&["v2", "get-call", call_id])?;
        self.send_json(self.client.get(url), &format!("get-call({call_id})"))
            .await
    }

    /// Builds `{base}/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RetellError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RetellError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends an authorized request, asserts a 2xx status, and parses the body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T, RetellError> {
        let response = request.bearer_auth(&self.api_key).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), context, "retell request failed");
            return Err(RetellError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| RetellError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
