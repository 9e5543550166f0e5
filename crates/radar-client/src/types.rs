//! Wire types for the metrics endpoints.
//!
//! Brand-radar responses wrap their rows in a `{"metrics": [...]}` envelope
//! (`{"ai_responses": [...]}` for the answer sample). A missing or `null`
//! envelope field decodes to an empty sequence; callers never see the
//! envelope itself.

use serde::{Deserialize, Serialize};

/// Envelope around a list payload.
#[derive(Debug, Deserialize)]
pub(crate) struct MetricsEnvelope<T> {
    #[serde(default = "Option::default")]
    metrics: Option<Vec<T>>,
}

impl<T> MetricsEnvelope<T> {
    pub(crate) fn into_rows(self) -> Vec<T> {
        self.metrics.unwrap_or_default()
    }
}

/// Envelope around the single-object site-explorer payload.
#[derive(Debug, Deserialize)]
pub(crate) struct SiteMetricsEnvelope {
    #[serde(default)]
    pub(crate) metrics: Option<SiteMetrics>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AiResponsesEnvelope {
    #[serde(default)]
    ai_responses: Option<Vec<AiResponse>>,
}

impl AiResponsesEnvelope {
    pub(crate) fn into_rows(self) -> Vec<AiResponse> {
        self.ai_responses.unwrap_or_default()
    }
}

/// Per-brand mention snapshot.
///
/// The decomposition counts are reported as-is; they are not required to sum
/// to `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionsOverview {
    pub brand: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub only_target_brand: u64,
    #[serde(default)]
    pub only_competitors_brands: u64,
    #[serde(default)]
    pub target_and_competitors_brands: u64,
    #[serde(default)]
    pub no_tracked_brands: u64,
}

/// Impressions share the mentions-overview row shape.
pub type ImpressionsOverview = MentionsOverview;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionsHistoryPoint {
    /// ISO-8601 calendar date as sent by the upstream.
    pub date: String,
    #[serde(default)]
    pub mentions: u64,
}

/// A brand's share of all tracked mentions, as a fraction in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareOfVoice {
    pub brand: String,
    #[serde(default)]
    pub share_of_voice: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareOfVoiceHistoryPoint {
    pub date: String,
    #[serde(default)]
    pub share_of_voice: Vec<ShareOfVoice>,
}

/// Organic and paid search snapshot for one domain. Costs are in minor
/// currency units (cents).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteMetrics {
    #[serde(default)]
    pub org_keywords: u64,
    #[serde(default)]
    pub org_traffic: u64,
    #[serde(default)]
    pub org_cost: u64,
    #[serde(default)]
    pub paid_keywords: u64,
    #[serde(default)]
    pub paid_traffic: u64,
    #[serde(default)]
    pub paid_cost: u64,
}

/// One sampled AI answer that mentions a tracked brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResponse {
    pub question: String,
    pub response: String,
    #[serde(default)]
    pub volume: u64,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub links: Vec<AiResponseLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResponseLink {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}
