//! Brand-radar endpoints: mention, share-of-voice, and impression metrics
//! sampled from AI answers.

use radar_core::{DataSource, DateRange};

use crate::client::MetricsClient;
use crate::error::MetricsError;
use crate::query::BrandFilter;
use crate::types::{
    AiResponse, AiResponsesEnvelope, ImpressionsOverview, MentionsHistoryPoint, MentionsOverview,
    MetricsEnvelope, ShareOfVoice, ShareOfVoiceHistoryPoint,
};

const OVERVIEW_SELECT: &str = "brand,total,only_target_brand,only_competitors_brands,target_and_competitors_brands,no_tracked_brands";
const SOV_OVERVIEW_SELECT: &str = "brand,share_of_voice";
const AI_RESPONSES_SELECT: &str = "question,response,volume,country,links";
const DEFAULT_AI_RESPONSES_LIMIT: u32 = 20;

impl MetricsClient {
    /// Mention counts for the target and competitor groups.
    ///
    /// `market` is an optional upstream market filter; pass `""` to omit it.
    ///
    /// # Errors
    ///
    /// - [`MetricsError::MissingCredential`] if no token is configured.
    /// - [`MetricsError::Upstream`] on a non-2xx status.
    /// - [`MetricsError::Transport`] on network failure.
    /// - [`MetricsError::Deserialize`] if the response shape is unexpected.
    pub async fn mentions_overview(
        &self,
        filter: &BrandFilter<'_>,
        market: &str,
    ) -> Result<Vec<MentionsOverview>, MetricsError> {
        let envelope: MetricsEnvelope<MentionsOverview> = self
            .get_json(
                "brand-radar/mentions-overview",
                &[
                    ("select", OVERVIEW_SELECT),
                    ("data_source", filter.data_source.as_str()),
                    ("brand", filter.brand),
                    ("competitors", filter.competitors),
                    ("country", filter.country),
                    ("market", market),
                ],
            )
            .await?;
        Ok(envelope.into_rows())
    }

    /// Daily mention counts for a single brand over `range`.
    ///
    /// # Errors
    ///
    /// - [`MetricsError::MissingCredential`] if no token is configured.
    /// - [`MetricsError::MissingInput`] if `brand` is empty.
    /// - [`MetricsError::Upstream`] on a non-2xx status.
    /// - [`MetricsError::Transport`] on network failure.
    /// - [`MetricsError::Deserialize`] if the response shape is unexpected.
    pub async fn mentions_history(
        &self,
        data_source: DataSource,
        brand: &str,
        range: DateRange,
        country: &str,
    ) -> Result<Vec<MentionsHistoryPoint>, MetricsError> {
        self.ensure_credential()?;
        if brand.is_empty() {
            return Err(MetricsError::MissingInput("brand"));
        }

        let date_from = range.from.to_string();
        let date_to = range.to.to_string();
        let envelope: MetricsEnvelope<MentionsHistoryPoint> = self
            .get_json(
                "brand-radar/mentions-history",
                &[
                    ("data_source", data_source.as_str()),
                    ("brand", brand),
                    ("date_from", date_from.as_str()),
                    ("date_to", date_to.as_str()),
                    ("country", country),
                ],
            )
            .await?;
        Ok(envelope.into_rows())
    }

    /// Share of voice for the target and competitor groups.
    ///
    /// # Errors
    ///
    /// Same as [`MetricsClient::mentions_overview`].
    pub async fn sov_overview(
        &self,
        filter: &BrandFilter<'_>,
    ) -> Result<Vec<ShareOfVoice>, MetricsError> {
        let envelope: MetricsEnvelope<ShareOfVoice> = self
            .get_json(
                "brand-radar/sov-overview",
                &[
                    ("select", SOV_OVERVIEW_SELECT),
                    ("data_source", filter.data_source.as_str()),
                    ("brand", filter.brand),
                    ("competitors", filter.competitors),
                    ("country", filter.country),
                ],
            )
            .await?;
        Ok(envelope.into_rows())
    }

    /// Dated share-of-voice breakdowns for the target and competitor groups.
    ///
    /// # Errors
    ///
    /// Same as [`MetricsClient::mentions_overview`].
    pub async fn sov_history(
        &self,
        filter: &BrandFilter<'_>,
        range: DateRange,
    ) -> Result<Vec<ShareOfVoiceHistoryPoint>, MetricsError> {
        let date_from = range.from.to_string();
        let date_to = range.to.to_string();
        let envelope: MetricsEnvelope<ShareOfVoiceHistoryPoint> = self
            .get_json(
                "brand-radar/sov-history",
                &[
                    ("data_source", filter.data_source.as_str()),
                    ("brand", filter.brand),
                    ("competitors", filter.competitors),
                    ("date_from", date_from.as_str()),
                    ("date_to", date_to.as_str()),
                    ("country", filter.country),
                ],
            )
            .await?;
        Ok(envelope.into_rows())
    }

    /// Impression counts for the target and competitor groups.
    ///
    /// # Errors
    ///
    /// Same as [`MetricsClient::mentions_overview`].
    pub async fn impressions_overview(
        &self,
        filter: &BrandFilter<'_>,
    ) -> Result<Vec<ImpressionsOverview>, MetricsError> {
        let envelope: MetricsEnvelope<ImpressionsOverview> = self
            .get_json(
                "brand-radar/impressions-overview",
                &[
                    ("select", OVERVIEW_SELECT),
                    ("data_source", filter.data_source.as_str()),
                    ("brand", filter.brand),
                    ("competitors", filter.competitors),
                    ("country", filter.country),
                ],
            )
            .await?;
        Ok(envelope.into_rows())
    }

    /// A sample of AI answers mentioning the tracked brands.
    ///
    /// `limit` defaults to 20 when `None`.
    ///
    /// # Errors
    ///
    /// Same as [`MetricsClient::mentions_overview`].
    pub async fn ai_responses(
        &self,
        filter: &BrandFilter<'_>,
        limit: Option<u32>,
    ) -> Result<Vec<AiResponse>, MetricsError> {
        let limit = limit.unwrap_or(DEFAULT_AI_RESPONSES_LIMIT).to_string();
        let envelope: AiResponsesEnvelope = self
            .get_json(
                "brand-radar/ai-responses",
                &[
                    ("select", AI_RESPONSES_SELECT),
                    ("data_source", filter.data_source.as_str()),
                    ("brand", filter.brand),
                    ("competitors", filter.competitors),
                    ("country", filter.country),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;
        Ok(envelope.into_rows())
    }
}
