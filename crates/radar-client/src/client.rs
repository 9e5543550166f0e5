//! HTTP client for the metrics API, reached through the forwarding gateway.
//!
//! Wraps `reqwest` with credential handling, query normalization, and typed
//! envelope decoding. Non-2xx answers surface as [`MetricsError::Upstream`]
//! with the upstream-supplied message when one is available.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::MetricsError;
use crate::query::normalize_params;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "llm-radar/0.1 (brand-visibility)";

/// Client for the metrics API.
///
/// Owns its bearer token, so concurrent runs with different credentials each
/// use their own instance. There is no overall request timeout here: callers
/// that need a deadline wrap individual calls.
pub struct MetricsClient {
    client: Client,
    token: String,
    base_url: Url,
}

impl std::fmt::Debug for MetricsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &(!self.token.is_empty()).then_some("[redacted]"))
            .finish_non_exhaustive()
    }
}

impl MetricsClient {
    /// Creates a client for the gateway at `base_url` with default settings.
    ///
    /// An empty `token` is accepted here; every operation then fails with
    /// [`MetricsError::MissingCredential`] without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MetricsError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(token: &str, base_url: &str) -> Result<Self, MetricsError> {
        Self::with_settings(token, base_url, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_USER_AGENT)
    }

    /// Creates a client with an explicit connect timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Same as [`MetricsClient::new`].
    pub fn with_settings(
        token: &str,
        base_url: &str,
        connect_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, MetricsError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so endpoint paths are joined
        // under the gateway prefix instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| MetricsError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: token.trim().to_owned(),
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        !self.token.is_empty()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fails fast when no credential is configured.
    pub(crate) fn ensure_credential(&self) -> Result<(), MetricsError> {
        if self.has_credential() {
            Ok(())
        } else {
            Err(MetricsError::MissingCredential)
        }
    }

    /// Builds the request URL for `endpoint` with normalized query parameters.
    pub(crate) fn build_url(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, MetricsError> {
        let mut url = self
            .base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| MetricsError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join endpoint '{endpoint}': {e}"),
            })?;

        let normalized = normalize_params(params);
        if !normalized.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &normalized {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Checks the credential, issues one GET, and decodes a 2xx body as `T`.
    ///
    /// # Errors
    ///
    /// - [`MetricsError::MissingCredential`] before any request when no token is set.
    /// - [`MetricsError::Upstream`] on a non-2xx status.
    /// - [`MetricsError::Transport`] on network failure.
    /// - [`MetricsError::Deserialize`] if a 2xx body does not match `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, MetricsError> {
        self.ensure_credential()?;
        let url = self.build_url(endpoint, params)?;

        tracing::debug!(endpoint, "metrics request");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = upstream_error(status, &body);
            tracing::debug!(endpoint, status = status.as_u16(), error = %err, "metrics request failed");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| MetricsError::Deserialize {
            context: endpoint.to_owned(),
            source: e,
        })
    }
}

/// Maps a non-2xx response to [`MetricsError::Upstream`].
///
/// A JSON body's `error` string wins; JSON without one yields
/// `API Error: <status>`; a non-JSON body falls back to the reason phrase.
fn upstream_error(status: StatusCode, body: &str) -> MetricsError {
    let generic = || format!("API Error: {}", status.as_u16());

    let message = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => json
            .get("error")
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.is_empty())
            .map_or_else(generic, ToOwned::to_owned),
        Err(_) => status
            .canonical_reason()
            .map_or_else(generic, ToOwned::to_owned),
    };

    MetricsError::Upstream {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
