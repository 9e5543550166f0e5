//! Brand-by-date alignment of dated series.

use std::collections::{BTreeMap, BTreeSet};

use radar_client::{MentionsHistoryPoint, ShareOfVoiceHistoryPoint};
use serde::Serialize;

/// One date with a value per brand column, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub date: String,
    pub values: Vec<f64>,
}

/// Dense matrix of brand series over the union of their dates.
///
/// Rows are sorted ascending by date string. Every row carries exactly one
/// value per entry in `brands`; pairs absent from the source are `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesMatrix {
    pub brands: Vec<String>,
    pub rows: Vec<SeriesRow>,
}

impl SeriesMatrix {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at (`date`, `brand`), `None` if either is not in the matrix.
    #[must_use]
    pub fn value(&self, date: &str, brand: &str) -> Option<f64> {
        let col = self.brands.iter().position(|b| b == brand)?;
        self.rows
            .iter()
            .find(|row| row.date == date)
            .and_then(|row| row.values.get(col).copied())
    }

    /// Splits the matrix back into one `(brand, [(date, value)])` series per
    /// column. Feeding the result to [`align_series`] rebuilds the matrix.
    /// A row shorter than `brands` contributes no point to the missing
    /// columns.
    #[must_use]
    pub fn columns(&self) -> Vec<(String, Vec<(String, f64)>)> {
        self.brands
            .iter()
            .enumerate()
            .map(|(col, brand)| {
                let points = self
                    .rows
                    .iter()
                    .filter_map(|row| Some((row.date.clone(), *row.values.get(col)?)))
                    .collect();
                (brand.clone(), points)
            })
            .collect()
    }
}

/// Aligns per-brand `(date, value)` series into a [`SeriesMatrix`].
///
/// Columns follow first appearance of each brand in `series`; a brand with no
/// points still gets a column. When one brand repeats a date the last value
/// wins.
#[must_use]
pub fn align_series<B, D, P>(series: impl IntoIterator<Item = (B, P)>) -> SeriesMatrix
where
    B: Into<String>,
    D: Into<String>,
    P: IntoIterator<Item = (D, f64)>,
{
    let mut brands: Vec<String> = Vec::new();
    let mut cells: BTreeMap<(String, usize), f64> = BTreeMap::new();
    let mut dates: BTreeSet<String> = BTreeSet::new();

    for (brand, points) in series {
        let brand = brand.into();
        let col = match brands.iter().position(|b| *b == brand) {
            Some(col) => col,
            None => {
                brands.push(brand);
                brands.len() - 1
            }
        };
        for (date, value) in points {
            let date = date.into();
            dates.insert(date.clone());
            cells.insert((date, col), value);
        }
    }

    let rows = dates
        .into_iter()
        .map(|date| {
            let values = (0..brands.len())
                .map(|col| {
                    cells
                        .get(&(date.clone(), col))
                        .copied()
                        .unwrap_or_default()
                })
                .collect();
            SeriesRow { date, values }
        })
        .collect();

    SeriesMatrix { brands, rows }
}

/// Mention counts per brand over the union of their history dates.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn align_mentions(history: &BTreeMap<String, Vec<MentionsHistoryPoint>>) -> SeriesMatrix {
    align_series(history.iter().map(|(brand, points)| {
        (
            brand.as_str(),
            points
                .iter()
                .map(|p| (p.date.as_str(), p.mentions as f64)),
        )
    }))
}

/// Share-of-voice fractions per brand. Values stay raw fractions in `[0, 1]`.
#[must_use]
pub fn align_share_of_voice(history: &[ShareOfVoiceHistoryPoint]) -> SeriesMatrix {
    align_series(history.iter().flat_map(|point| {
        point
            .share_of_voice
            .iter()
            .map(move |entry| (entry.brand.as_str(), [(point.date.as_str(), entry.share_of_voice)]))
    }))
}

#[cfg(test)]
mod tests {
    use radar_client::ShareOfVoice;

    use super::*;

    fn history(points: &[(&str, u64)]) -> Vec<MentionsHistoryPoint> {
        points
            .iter()
            .map(|&(date, mentions)| MentionsHistoryPoint {
                date: date.to_string(),
                mentions,
            })
            .collect()
    }

    #[test]
    fn unions_dates_and_zero_fills() {
        let mut by_brand = BTreeMap::new();
        by_brand.insert(
            "Ahrefs".to_string(),
            history(&[("2024-01-01", 10), ("2024-02-01", 15)]),
        );
        by_brand.insert("Moz".to_string(), history(&[("2024-01-01", 5)]));

        let matrix = align_mentions(&by_brand);

        assert_eq!(matrix.brands, vec!["Ahrefs", "Moz"]);
        assert_eq!(matrix.rows.len(), 2);
        assert_eq!(matrix.value("2024-01-01", "Ahrefs"), Some(10.0));
        assert_eq!(matrix.value("2024-01-01", "Moz"), Some(5.0));
        assert_eq!(matrix.value("2024-02-01", "Ahrefs"), Some(15.0));
        assert_eq!(matrix.value("2024-02-01", "Moz"), Some(0.0));
    }

    #[test]
    fn rows_sorted_by_date_string() {
        let matrix = align_series([(
            "Ahrefs",
            vec![("2024-03-01", 3.0), ("2024-01-01", 1.0), ("2024-02-01", 2.0)],
        )]);
        let dates: Vec<&str> = matrix.rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-02-01", "2024-03-01"]);
    }

    #[test]
    fn empty_history_still_gets_a_column() {
        let mut by_brand = BTreeMap::new();
        by_brand.insert("Ahrefs".to_string(), history(&[("2024-01-01", 4)]));
        by_brand.insert("Semrush".to_string(), Vec::new());

        let matrix = align_mentions(&by_brand);

        assert_eq!(matrix.brands, vec!["Ahrefs", "Semrush"]);
        assert_eq!(matrix.rows[0].values, vec![4.0, 0.0]);
    }

    #[test]
    fn no_points_yields_no_rows() {
        let matrix = align_mentions(&BTreeMap::new());
        assert!(matrix.is_empty());
        assert!(matrix.brands.is_empty());
    }

    #[test]
    fn realigning_columns_is_identity() {
        let mut by_brand = BTreeMap::new();
        by_brand.insert(
            "Ahrefs".to_string(),
            history(&[("2024-01-01", 10), ("2024-02-01", 15)]),
        );
        by_brand.insert("Moz".to_string(), history(&[("2024-02-01", 7)]));

        let matrix = align_mentions(&by_brand);
        let again = align_series(matrix.columns());

        assert_eq!(again, matrix);
    }

    #[test]
    fn ragged_rows_read_as_missing_cells() {
        let matrix = SeriesMatrix {
            brands: vec!["Ahrefs".to_string(), "Moz".to_string()],
            rows: vec![
                SeriesRow {
                    date: "2024-01-01".to_string(),
                    values: vec![10.0],
                },
                SeriesRow {
                    date: "2024-02-01".to_string(),
                    values: vec![15.0, 5.0],
                },
            ],
        };

        assert_eq!(matrix.value("2024-01-01", "Moz"), None);
        assert_eq!(matrix.value("2024-02-01", "Moz"), Some(5.0));

        let columns = matrix.columns();
        assert_eq!(columns[1].1, vec![("2024-02-01".to_string(), 5.0)]);

        let rebuilt = align_series(columns);
        assert_eq!(rebuilt.value("2024-01-01", "Moz"), Some(0.0));
    }

    #[test]
    fn share_of_voice_keeps_raw_fractions_in_first_seen_order() {
        let history = vec![
            ShareOfVoiceHistoryPoint {
                date: "2024-01-01".to_string(),
                share_of_voice: vec![
                    ShareOfVoice {
                        brand: "Moz".to_string(),
                        share_of_voice: 0.3,
                    },
                    ShareOfVoice {
                        brand: "Ahrefs".to_string(),
                        share_of_voice: 0.7,
                    },
                ],
            },
            ShareOfVoiceHistoryPoint {
                date: "2024-02-01".to_string(),
                share_of_voice: vec![ShareOfVoice {
                    brand: "Ahrefs".to_string(),
                    share_of_voice: 0.65,
                }],
            },
        ];

        let matrix = align_share_of_voice(&history);

        assert_eq!(matrix.brands, vec!["Moz", "Ahrefs"]);
        assert_eq!(matrix.value("2024-01-01", "Ahrefs"), Some(0.7));
        assert_eq!(matrix.value("2024-02-01", "Ahrefs"), Some(0.65));
        assert_eq!(matrix.value("2024-02-01", "Moz"), Some(0.0));
    }
}
