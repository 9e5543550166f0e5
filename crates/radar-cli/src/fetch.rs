//! `fetch` command: one dashboard aggregation over the configured brands.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use radar_client::{MetricsClient, ShareOfVoice};
use radar_core::{AppConfig, DashboardConfig, DataSource, DateRange};
use radar_dashboard::{
    align_mentions, align_share_of_voice, fetch_dashboard, rank_share_of_voice, seo_comparison,
    DashboardData, FetchPolicy, SeoComparison, SeriesMatrix,
};
use serde::Serialize;

use crate::report;

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// LLM surface to sample mentions from
    #[arg(long, default_value = "chatgpt")]
    pub data_source: DataSource,

    /// Two-letter country code; omit for all countries
    #[arg(long, default_value = "")]
    pub country: String,

    /// First day of the window (YYYY-MM-DD); defaults to three months before --to
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Brands file to read instead of RADAR_BRANDS_PATH
    #[arg(long)]
    pub brands: Option<PathBuf>,

    /// Bearer token to use instead of RADAR_API_KEY
    #[arg(long)]
    pub api_key: Option<String>,

    /// Print JSON instead of text tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FetchOutput<'a> {
    config: &'a DashboardConfig,
    dashboard: &'a DashboardData,
    mentions_matrix: SeriesMatrix,
    sov_matrix: SeriesMatrix,
    sov_ranking: Vec<ShareOfVoice>,
    seo_comparison: SeoComparison,
}

/// Fills in the window from whichever bounds were given.
pub(crate) fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> DateRange {
    match (from, to) {
        (Some(from), Some(to)) => DateRange::new(from, to),
        (Some(from), None) => DateRange::new(from, today),
        (None, Some(to)) => DateRange::last_three_months(to),
        (None, None) => DateRange::last_three_months(today),
    }
}

/// Run one aggregation and print the result.
///
/// # Errors
///
/// Returns an error if the brands file cannot be loaded, the client cannot
/// be built, or a mandatory metrics call fails. Nothing is printed to stdout
/// in that case.
pub(crate) async fn run_fetch(config: &AppConfig, args: FetchArgs) -> anyhow::Result<()> {
    let brands_path = args.brands.unwrap_or_else(|| config.brands_path.clone());
    let brands = radar_core::load_brands(&brands_path)
        .and_then(radar_core::BrandsFile::into_brands)
        .with_context(|| format!("loading brands from {}", brands_path.display()))?;

    let today = chrono::Local::now().date_naive();
    let dashboard_config = DashboardConfig {
        brands,
        data_source: args.data_source,
        country: args.country,
        date_range: resolve_range(args.from, args.to, today),
    };

    let token = args
        .api_key
        .as_deref()
        .or(config.api_key.as_deref())
        .unwrap_or_default();
    let client = MetricsClient::with_settings(
        token,
        config.gateway_url()?,
        config.connect_timeout_secs,
        &config.user_agent,
    )?;
    let policy = FetchPolicy::from_app_config(config);

    tracing::debug!(?client, ?policy, "running dashboard fetch");

    let data = fetch_dashboard(&client, &dashboard_config, &policy)
        .await
        .context("dashboard fetch failed")?;

    if args.json {
        let output = FetchOutput {
            config: &dashboard_config,
            dashboard: &data,
            mentions_matrix: align_mentions(&data.mentions_history),
            sov_matrix: align_share_of_voice(&data.sov_history),
            sov_ranking: rank_share_of_voice(&data.share_of_voice),
            seo_comparison: seo_comparison(&data),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", report::render(&dashboard_config, &data));
    }

    Ok(())
}
