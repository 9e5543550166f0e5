//! Cross-views over a finished [`DashboardData`]: SEO vs LLM visibility and
//! the share-of-voice ranking.

use std::cmp::Ordering;

use radar_client::ShareOfVoice;
use serde::Serialize;

use crate::types::DashboardData;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoComparisonRow {
    pub brand: String,
    pub organic_traffic: u64,
    /// Organic traffic value in major currency units.
    pub traffic_value: f64,
    pub llm_mentions: u64,
    pub organic_keywords: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeoComparison {
    pub rows: Vec<SeoComparisonRow>,
    pub total_traffic: u64,
    pub total_value: f64,
    pub total_mentions: u64,
}

/// One row per brand with site metrics, joined to that brand's mentions
/// overview by case-insensitive name. A brand missing from the overview
/// counts zero mentions.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn seo_comparison(data: &DashboardData) -> SeoComparison {
    let rows: Vec<SeoComparisonRow> = data
        .seo
        .iter()
        .map(|(brand, seo)| {
            let llm_mentions = data
                .mentions
                .iter()
                .find(|m| m.brand.to_lowercase() == brand.to_lowercase())
                .map_or(0, |m| m.total);
            SeoComparisonRow {
                brand: brand.clone(),
                organic_traffic: seo.org_traffic,
                traffic_value: seo.org_cost as f64 / 100.0,
                llm_mentions,
                organic_keywords: seo.org_keywords,
            }
        })
        .collect();

    SeoComparison {
        total_traffic: rows.iter().map(|r| r.organic_traffic).sum(),
        total_value: rows.iter().map(|r| r.traffic_value).sum(),
        total_mentions: rows.iter().map(|r| r.llm_mentions).sum(),
        rows,
    }
}

/// Share-of-voice entries sorted by fraction, largest first. Ties keep their
/// upstream order.
#[must_use]
pub fn rank_share_of_voice(entries: &[ShareOfVoice]) -> Vec<ShareOfVoice> {
    let mut ranked = entries.to_vec();
    ranked.sort_by(|a, b| {
        b.share_of_voice
            .partial_cmp(&a.share_of_voice)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}
