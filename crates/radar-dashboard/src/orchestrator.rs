//! Dashboard aggregation run.
//!
//! Every call of a run is launched at once and awaited together; nothing
//! short-circuits. Outcomes are then settled according to their
//! [`Criticality`]: a mandatory failure fails the run, a supplementary
//! failure is logged and leaves an empty or absent value behind.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use radar_client::{BrandFilter, MetricsClient, MetricsError};
use radar_core::{AppConfig, DashboardConfig};

use crate::error::DashboardError;
use crate::types::DashboardData;

const MENTIONS_OVERVIEW: &str = "mentions overview";
const SOV_OVERVIEW: &str = "share of voice overview";
const MENTIONS_HISTORY: &str = "mentions history";
const SOV_HISTORY: &str = "share of voice history";
const SITE_METRICS: &str = "site metrics";

/// Per-call deadlines. `None` waits indefinitely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    pub branch_timeout: Option<Duration>,
    pub mandatory_timeout: Option<Duration>,
}

impl FetchPolicy {
    /// Reads the deadlines from application config; `0` seconds means none.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        let secs = |s: u64| (s > 0).then(|| Duration::from_secs(s));
        Self {
            branch_timeout: secs(config.branch_timeout_secs),
            mandatory_timeout: secs(config.mandatory_timeout_secs),
        }
    }

    #[must_use]
    pub fn deadline(&self, criticality: Criticality) -> Option<Duration> {
        match criticality {
            Criticality::Mandatory => self.mandatory_timeout,
            Criticality::Supplementary => self.branch_timeout,
        }
    }
}

/// How a failed call affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Failure fails the whole run.
    Mandatory,
    /// Failure is logged and replaced by an empty or absent value.
    Supplementary,
}

impl Criticality {
    /// Applies the failure policy to one call outcome.
    ///
    /// `Ok(None)` means a supplementary call failed and was absorbed.
    fn settle<T>(
        self,
        call: &'static str,
        subject: &str,
        outcome: Result<T, MetricsError>,
    ) -> Result<Option<T>, DashboardError> {
        match outcome {
            Ok(value) => {
                tracing::debug!(call, subject, "call succeeded");
                Ok(Some(value))
            }
            Err(source) => match self {
                Criticality::Mandatory => {
                    tracing::error!(call, subject, error = %source, "mandatory call failed");
                    Err(DashboardError::Fetch { call, source })
                }
                Criticality::Supplementary => {
                    tracing::warn!(call, subject, error = %source, "supplementary call failed; continuing without it");
                    Ok(None)
                }
            },
        }
    }
}

/// Runs `call` under an optional deadline, mapping expiry to
/// [`MetricsError::Timeout`].
async fn with_deadline<T, F>(
    call: &'static str,
    deadline: Option<Duration>,
    fut: F,
) -> Result<T, MetricsError>
where
    F: Future<Output = Result<T, MetricsError>>,
{
    match deadline {
        Some(after) => tokio::time::timeout(after, fut)
            .await
            .unwrap_or_else(|_| {
                Err(MetricsError::Timeout {
                    context: call.to_owned(),
                    after,
                })
            }),
        None => fut.await,
    }
}

/// Fetch every dashboard metric for `config` in one concurrent run.
///
/// Mandatory: group mentions overview and group share-of-voice overview.
/// Supplementary: per-brand mentions history, group share-of-voice history,
/// and per-brand site metrics for brands with a domain (sampled at
/// `date_range.to`).
///
/// # Errors
///
/// - [`DashboardError::MissingCredential`] if `client` has no token.
/// - [`DashboardError::MissingInput`] if `config` has no brands.
/// - [`DashboardError::Fetch`] if a mandatory call fails or times out.
///
/// No request is issued when either precondition fails.
pub async fn fetch_dashboard(
    client: &MetricsClient,
    config: &DashboardConfig,
    policy: &FetchPolicy,
) -> Result<DashboardData, DashboardError> {
    if !client.has_credential() {
        return Err(DashboardError::MissingCredential);
    }
    if config.brands.is_empty() {
        return Err(DashboardError::MissingInput("brands"));
    }

    let targets = config.target_names();
    let competitors = config.competitor_names();
    let filter = BrandFilter::new(config.data_source)
        .brand(&targets)
        .competitors(&competitors)
        .country(&config.country);

    let mandatory = policy.deadline(Criticality::Mandatory);
    let supplementary = policy.deadline(Criticality::Supplementary);

    let history_calls = config.brands.iter().map(|brand| {
        let name = brand.name.as_str();
        async move {
            let outcome = with_deadline(
                MENTIONS_HISTORY,
                supplementary,
                client.mentions_history(config.data_source, name, config.date_range, &config.country),
            )
            .await;
            (name, outcome)
        }
    });

    let seo_calls = config.brands.iter().filter_map(|brand| {
        let domain = brand.seo_target()?;
        let name = brand.name.as_str();
        Some(async move {
            let outcome = with_deadline(
                SITE_METRICS,
                supplementary,
                client.site_metrics(domain, config.date_range.to, &config.country),
            )
            .await;
            (name, outcome)
        })
    });

    tracing::info!(
        data_source = %config.data_source,
        brands = config.brands.len(),
        targets = %targets,
        competitors = %competitors,
        "starting dashboard fetch"
    );

    let (mentions, share_of_voice, sov_history, histories, seo_results) = tokio::join!(
        with_deadline(MENTIONS_OVERVIEW, mandatory, client.mentions_overview(&filter, "")),
        with_deadline(SOV_OVERVIEW, mandatory, client.sov_overview(&filter)),
        with_deadline(SOV_HISTORY, supplementary, client.sov_history(&filter, config.date_range)),
        join_all(history_calls),
        join_all(seo_calls),
    );

    // Both mandatory outcomes are settled only after every call has finished.
    let mentions = Criticality::Mandatory
        .settle(MENTIONS_OVERVIEW, &targets, mentions)?
        .unwrap_or_default();
    let share_of_voice = Criticality::Mandatory
        .settle(SOV_OVERVIEW, &targets, share_of_voice)?
        .unwrap_or_default();

    let sov_history = Criticality::Supplementary
        .settle(SOV_HISTORY, &targets, sov_history)?
        .unwrap_or_default();

    let mut mentions_history = BTreeMap::new();
    for (name, outcome) in histories {
        let points = Criticality::Supplementary
            .settle(MENTIONS_HISTORY, name, outcome)?
            .unwrap_or_default();
        mentions_history.insert(name.to_owned(), points);
    }

    let mut seo = BTreeMap::new();
    for (name, outcome) in seo_results {
        match Criticality::Supplementary.settle(SITE_METRICS, name, outcome)? {
            Some(Some(metrics)) => {
                seo.insert(name.to_owned(), metrics);
            }
            Some(None) => tracing::debug!(brand = name, "no site metrics returned"),
            None => {}
        }
    }

    tracing::info!(
        mentions = mentions.len(),
        share_of_voice = share_of_voice.len(),
        sov_history = sov_history.len(),
        seo = seo.len(),
        "dashboard fetch complete"
    );

    Ok(DashboardData {
        mentions,
        share_of_voice,
        mentions_history,
        sov_history,
        seo,
    })
}
