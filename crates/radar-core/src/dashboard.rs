//! Dashboard input: the brand set, data source, market, and date window of
//! one aggregation run.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::brands::Brand;

/// LLM or search surface that mention data is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Chatgpt,
    Gemini,
    Perplexity,
    Copilot,
    GoogleAiOverviews,
    GoogleAiMode,
}

impl DataSource {
    pub const ALL: [DataSource; 6] = [
        DataSource::Chatgpt,
        DataSource::Gemini,
        DataSource::Perplexity,
        DataSource::Copilot,
        DataSource::GoogleAiOverviews,
        DataSource::GoogleAiMode,
    ];

    /// Wire value sent as the `data_source` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::Chatgpt => "chatgpt",
            DataSource::Gemini => "gemini",
            DataSource::Perplexity => "perplexity",
            DataSource::Copilot => "copilot",
            DataSource::GoogleAiOverviews => "google_ai_overviews",
            DataSource::GoogleAiMode => "google_ai_mode",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DataSource::Chatgpt => "ChatGPT",
            DataSource::Gemini => "Gemini",
            DataSource::Perplexity => "Perplexity",
            DataSource::Copilot => "Copilot",
            DataSource::GoogleAiOverviews => "Google AI Overviews",
            DataSource::GoogleAiMode => "Google AI Mode",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown data source '{0}'")]
pub struct ParseDataSourceError(pub String);

impl std::str::FromStr for DataSource {
    type Err = ParseDataSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataSource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| ParseDataSourceError(s.to_owned()))
    }
}

/// Inclusive calendar window `[from, to]`.
///
/// `from <= to` is not checked; an inverted range is sent upstream as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// The three months ending at `today`, the dashboard's default window.
    #[must_use]
    pub fn last_three_months(today: NaiveDate) -> Self {
        let from = today.checked_sub_months(Months::new(3)).unwrap_or(today);
        Self { from, to: today }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub brands: Vec<Brand>,
    pub data_source: DataSource,
    /// ISO two-letter code in any case; empty means all countries.
    #[serde(default)]
    pub country: String,
    pub date_range: DateRange,
}

impl DashboardConfig {
    pub fn targets(&self) -> impl Iterator<Item = &Brand> {
        self.brands.iter().filter(|b| !b.is_competitor)
    }

    pub fn competitors(&self) -> impl Iterator<Item = &Brand> {
        self.brands.iter().filter(|b| b.is_competitor)
    }

    /// Comma-joined names of the non-competitor brands.
    #[must_use]
    pub fn target_names(&self) -> String {
        join_names(self.targets())
    }

    /// Comma-joined names of the competitor brands.
    #[must_use]
    pub fn competitor_names(&self) -> String {
        join_names(self.competitors())
    }

    /// Returns a copy of the config with the brand `id` removed.
    #[must_use]
    pub fn without_brand(&self, id: Uuid) -> Self {
        Self {
            brands: self.brands.iter().filter(|b| b.id != id).cloned().collect(),
            ..self.clone()
        }
    }
}

fn join_names<'a>(brands: impl Iterator<Item = &'a Brand>) -> String {
    brands
        .map(|b| b.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
