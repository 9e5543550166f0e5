use std::time::Duration;

use thiserror::Error;

/// Errors returned by the metrics client.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The client was built without a bearer token. Raised before any
    /// network call.
    #[error("API key not set")]
    MissingCredential,

    /// A required input was empty.
    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    /// The gateway or upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Network or TLS failure reaching the gateway.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A call did not complete within its deadline.
    #[error("{context} timed out after {after:?}")]
    Timeout { context: String, after: Duration },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl MetricsError {
    /// HTTP status carried by an [`MetricsError::Upstream`] error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            MetricsError::Upstream { status, .. } => Some(*status),
            MetricsError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
