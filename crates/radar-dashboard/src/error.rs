use radar_client::MetricsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("API key not set")]
    MissingCredential,

    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    /// A mandatory call failed; the run produced no data.
    #[error("{call} failed: {source}")]
    Fetch {
        call: &'static str,
        #[source]
        source: MetricsError,
    },
}
