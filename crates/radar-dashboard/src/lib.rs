//! Dashboard aggregation for LLM Radar.
//!
//! Fans one dashboard configuration out into concurrent metrics calls,
//! classifies each outcome as mandatory or supplementary, and assembles the
//! result into [`DashboardData`]. Dated series are aligned into brand-by-date
//! matrices for charting and export.

pub mod align;
pub mod compare;
pub mod error;
pub mod orchestrator;
pub mod types;

pub use align::{align_mentions, align_series, align_share_of_voice, SeriesMatrix, SeriesRow};
pub use compare::{rank_share_of_voice, seo_comparison, SeoComparison, SeoComparisonRow};
pub use error::DashboardError;
pub use orchestrator::{fetch_dashboard, Criticality, FetchPolicy};
pub use types::DashboardData;
