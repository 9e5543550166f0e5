//! Text rendering of a dashboard run.
//!
//! Every number is formatted here and nowhere else: share-of-voice stays a
//! raw fraction in the data model and only becomes a percentage on output.

use std::fmt::Write as _;

use radar_core::DashboardConfig;
use radar_dashboard::{
    align_mentions, align_share_of_voice, rank_share_of_voice, seo_comparison, DashboardData,
    SeriesMatrix,
};

/// `1.2M`, `3.4K`, or the plain integer below one thousand.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Currency from major units, compacted the same way as [`format_number`].
#[must_use]
pub(crate) fn format_currency(dollars: f64) -> String {
    if dollars >= 1_000_000.0 {
        format!("${:.1}M", dollars / 1_000_000.0)
    } else if dollars >= 1_000.0 {
        format!("${:.1}K", dollars / 1_000.0)
    } else {
        format!("${dollars:.0}")
    }
}

/// Currency from minor units (cents).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn format_cents(cents: u64) -> String {
    format_currency(cents as f64 / 100.0)
}

/// A `[0, 1]` fraction as a percentage with one decimal.
#[must_use]
pub(crate) fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Renders every section of the dashboard as plain-text tables.
pub(crate) fn render(config: &DashboardConfig, data: &DashboardData) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "LLM visibility: {} | country: {} | {} to {}",
        config.data_source.label(),
        if config.country.is_empty() {
            "all"
        } else {
            config.country.as_str()
        },
        config.date_range.from,
        config.date_range.to
    );
    out.push('\n');

    render_mentions(&mut out, data);
    render_share_of_voice(&mut out, data);
    render_mentions_history(&mut out, config, data);
    render_sov_history(&mut out, data);
    render_seo(&mut out, config, data);

    out
}

fn render_mentions(out: &mut String, data: &DashboardData) {
    let _ = writeln!(out, "== Mentions ==");
    if data.mentions.is_empty() {
        let _ = writeln!(out, "no mention data returned");
        out.push('\n');
        return;
    }
    let _ = writeln!(
        out,
        "{:<24}{:>10}{:>14}{:>14}{:>10}",
        "BRAND", "TOTAL", "ONLY TARGET", "ONLY COMP.", "BOTH"
    );
    for row in &data.mentions {
        let _ = writeln!(
            out,
            "{:<24}{:>10}{:>14}{:>14}{:>10}",
            row.brand,
            format_number(row.total),
            format_number(row.only_target_brand),
            format_number(row.only_competitors_brands),
            format_number(row.target_and_competitors_brands),
        );
    }
    out.push('\n');
}

fn render_share_of_voice(out: &mut String, data: &DashboardData) {
    let _ = writeln!(out, "== Share of voice ==");
    let ranked = rank_share_of_voice(&data.share_of_voice);
    if ranked.is_empty() {
        let _ = writeln!(out, "no share-of-voice data returned");
    }
    for entry in &ranked {
        let _ = writeln!(out, "{:<24}{:>8}", entry.brand, format_percent(entry.share_of_voice));
    }
    out.push('\n');
}

fn render_matrix(out: &mut String, matrix: &SeriesMatrix, cell: impl Fn(f64) -> String) {
    let _ = write!(out, "{:<12}", "DATE");
    for brand in &matrix.brands {
        let _ = write!(out, "{brand:>14}");
    }
    out.push('\n');
    for row in &matrix.rows {
        let _ = write!(out, "{:<12}", row.date);
        for value in &row.values {
            let _ = write!(out, "{:>14}", cell(*value));
        }
        out.push('\n');
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render_mentions_history(out: &mut String, config: &DashboardConfig, data: &DashboardData) {
    let _ = writeln!(out, "== Mentions over time ==");
    let matrix = align_mentions(&data.mentions_history);
    if matrix.is_empty() {
        let _ = writeln!(out, "no historical mention data for this date range");
    } else {
        render_matrix(out, &matrix, |v| format_number(v as u64));
    }
    for brand in &config.brands {
        if data
            .mentions_history
            .get(&brand.name)
            .is_none_or(Vec::is_empty)
        {
            let _ = writeln!(out, "note: no history available for {}", brand.name);
        }
    }
    out.push('\n');
}

fn render_sov_history(out: &mut String, data: &DashboardData) {
    let _ = writeln!(out, "== Share of voice over time ==");
    let matrix = align_share_of_voice(&data.sov_history);
    if matrix.is_empty() {
        let _ = writeln!(out, "no share-of-voice history available");
    } else {
        render_matrix(out, &matrix, format_percent);
    }
    out.push('\n');
}

fn render_seo(out: &mut String, config: &DashboardConfig, data: &DashboardData) {
    let _ = writeln!(out, "== SEO vs LLM ==");
    let comparison = seo_comparison(data);
    if comparison.rows.is_empty() {
        let _ = writeln!(out, "add brands with domains to see the SEO comparison");
        return;
    }
    let _ = writeln!(
        out,
        "{:<24}{:>12}{:>12}{:>12}{:>12}{:>12}",
        "BRAND", "TRAFFIC", "VALUE", "MENTIONS", "KEYWORDS", "PAID COST"
    );
    for row in &comparison.rows {
        let paid_cost = data.seo.get(&row.brand).map_or(0, |m| m.paid_cost);
        let _ = writeln!(
            out,
            "{:<24}{:>12}{:>12}{:>12}{:>12}{:>12}",
            row.brand,
            format_number(row.organic_traffic),
            format_currency(row.traffic_value),
            format_number(row.llm_mentions),
            format_number(row.organic_keywords),
            format_cents(paid_cost),
        );
    }
    let _ = writeln!(
        out,
        "{:<24}{:>12}{:>12}{:>12}",
        "TOTAL",
        format_number(comparison.total_traffic),
        format_currency(comparison.total_value),
        format_number(comparison.total_mentions),
    );
    for brand in &config.brands {
        if brand.seo_target().is_some() && !data.seo.contains_key(&brand.name) {
            let _ = writeln!(out, "note: no SEO metrics available for {}", brand.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use radar_client::{MentionsHistoryPoint, ShareOfVoice, SiteMetrics};
    use radar_core::{Brand, DataSource, DateRange};

    use super::*;

    #[test]
    fn numbers_compact_to_k_and_m() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_500), "1.5K");
        assert_eq!(format_number(2_340_000), "2.3M");
    }

    #[test]
    fn cents_become_compact_dollars() {
        assert_eq!(format_cents(4_200), "$42");
        assert_eq!(format_cents(250_000), "$2.5K");
        assert_eq!(format_cents(310_000_000), "$3.1M");
    }

    #[test]
    fn fractions_render_as_one_decimal_percent() {
        assert_eq!(format_percent(0.6667), "66.7%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    fn config() -> DashboardConfig {
        let date = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        DashboardConfig {
            brands: vec![
                Brand::new("Ahrefs", Some("ahrefs.com"), false).unwrap(),
                Brand::new("Moz", Some("moz.com"), true).unwrap(),
            ],
            data_source: DataSource::Chatgpt,
            country: "us".to_string(),
            date_range: DateRange::new(date("2024-01-01"), date("2024-03-01")),
        }
    }

    #[test]
    fn render_notes_gaps_without_failing() {
        let mut data = DashboardData {
            share_of_voice: vec![
                ShareOfVoice {
                    brand: "Moz".to_string(),
                    share_of_voice: 0.25,
                },
                ShareOfVoice {
                    brand: "Ahrefs".to_string(),
                    share_of_voice: 0.75,
                },
            ],
            mentions_history: BTreeMap::from([
                (
                    "Ahrefs".to_string(),
                    vec![MentionsHistoryPoint {
                        date: "2024-01-01".to_string(),
                        mentions: 10,
                    }],
                ),
                ("Moz".to_string(), Vec::new()),
            ]),
            ..DashboardData::default()
        };
        data.seo.insert("Ahrefs".to_string(), SiteMetrics::default());

        let text = render(&config(), &data);

        assert!(text.contains("ChatGPT"));
        assert!(text.contains("75.0%"));
        let sov = &text[text.find("== Share of voice ==").unwrap()..];
        assert!(sov.find("Ahrefs").unwrap() < sov.find("Moz").unwrap());
        assert!(text.contains("note: no history available for Moz"));
        assert!(text.contains("note: no SEO metrics available for Moz"));
        assert!(!text.contains("note: no history available for Ahrefs"));
    }
}
