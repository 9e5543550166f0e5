//! Typed client for the brand-radar and site-explorer metrics endpoints.
//!
//! Every call goes through the forwarding gateway with the credential owned
//! by the [`MetricsClient`] instance. Parameters are normalized (empty values
//! dropped, `country` lower-cased) and response envelopes are unwrapped before
//! results reach the caller.

mod brand_radar;
mod client;
mod error;
mod query;
mod site_explorer;
pub mod types;

pub use client::{MetricsClient, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use error::MetricsError;
pub use query::BrandFilter;
pub use types::{
    AiResponse, AiResponseLink, ImpressionsOverview, MentionsHistoryPoint, MentionsOverview,
    ShareOfVoice, ShareOfVoiceHistoryPoint, SiteMetrics,
};
