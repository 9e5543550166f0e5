//! Site-explorer endpoint: organic and paid search metrics for a domain.

use chrono::NaiveDate;

use crate::client::MetricsClient;
use crate::error::MetricsError;
use crate::types::{SiteMetrics, SiteMetricsEnvelope};

impl MetricsClient {
    /// Search metrics for `target` (a domain, all subdomains included) on `date`.
    ///
    /// Returns `Ok(None)` when the upstream answers 2xx without a `metrics`
    /// object.
    ///
    /// # Errors
    ///
    /// - [`MetricsError::MissingCredential`] if no token is configured.
    /// - [`MetricsError::MissingInput`] if `target` is empty.
    /// - [`MetricsError::Upstream`] on a non-2xx status.
    /// - [`MetricsError::Transport`] on network failure.
    /// - [`MetricsError::Deserialize`] if the response shape is unexpected.
    pub async fn site_metrics(
        &self,
        target: &str,
        date: NaiveDate,
        country: &str,
    ) -> Result<Option<SiteMetrics>, MetricsError> {
        self.ensure_credential()?;
        if target.is_empty() {
            return Err(MetricsError::MissingInput("target"));
        }

        let date = date.to_string();
        let envelope: SiteMetricsEnvelope = self
            .get_json(
                "site-explorer/metrics",
                &[
                    ("target", target),
                    ("date", date.as_str()),
                    ("mode", "subdomains"),
                    ("country", country),
                ],
            )
            .await?;
        Ok(envelope.metrics)
    }
}
