//! Inner fold-join of per-series sub-tables on the raw date string.
//!
//! Each step indexes the incoming sub-table by date, then walks the running
//! result once. Row order therefore follows the first series, filtered by
//! every later one; nothing is sorted.

use std::collections::HashMap;

use crate::domain::{RawSeries, SeriesValue};

/// One row of a not-yet-indexed table.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub raw_date: String,
    pub values: Vec<SeriesValue>,
}

/// Table keyed by the provider's raw date string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawFrame {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawFrame {
    /// Two-column `(rawDate, value)` sub-table, value column named after the identifier.
    pub fn from_series(series: &RawSeries) -> Self {
        Self {
            columns: vec![series.series_id.clone()],
            rows: series
                .data
                .iter()
                .map(|(raw_date, value)| RawRow {
                    raw_date: raw_date.clone(),
                    values: vec![*value],
                })
                .collect(),
        }
    }

    /// Inner join `self ⋈ other` on `raw_date`.
    ///
    /// A date repeated on both sides yields every pairing, left rows first.
    pub fn inner_merge(self, other: RawFrame) -> RawFrame {
        let mut lookup: HashMap<&str, Vec<&[SeriesValue]>> = HashMap::with_capacity(other.rows.len());
        for row in &other.rows {
            lookup.entry(row.raw_date.as_str()).or_default().push(&row.values);
        }

        let mut rows = Vec::with_capacity(self.rows.len().min(other.rows.len()));
        for left in self.rows {
            let Some(matches) = lookup.get(left.raw_date.as_str()) else {
                continue;
            };
            for right in matches {
                let mut values = Vec::with_capacity(left.values.len() + right.len());
                values.extend_from_slice(&left.values);
                values.extend_from_slice(right);
                rows.push(RawRow {
                    raw_date: left.raw_date.clone(),
                    values,
                });
            }
        }

        let mut columns = self.columns;
        columns.extend(other.columns);
        RawFrame { columns, rows }
    }
}

/// Left fold of [`RawFrame::inner_merge`] in iteration order.
///
/// Returns `None` for an empty input.
pub fn fold_inner_merge<I>(frames: I) -> Option<RawFrame>
where
    I: IntoIterator<Item = RawFrame>,
{
    frames.into_iter().reduce(RawFrame::inner_merge)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(id: &str, points: &[(&str, f64)]) -> RawFrame {
        RawFrame::from_series(&RawSeries {
            series_id: id.to_string(),
            data: points.iter().map(|(d, v)| (d.to_string(), Some(*v))).collect(),
            metadata: serde_json::Map::new(),
        })
    }

    fn dates(f: &RawFrame) -> Vec<&str> {
        f.rows.iter().map(|r| r.raw_date.as_str()).collect()
    }

    #[test]
    fn keeps_only_shared_dates() {
        let a = frame("A", &[("20230101", 1.0), ("20230108", 2.0), ("20230115", 3.0)]);
        let b = frame("B", &[("20230108", 20.0), ("20230115", 30.0), ("20230122", 40.0)]);
        let merged = a.inner_merge(b);
        assert_eq!(dates(&merged), vec!["20230108", "20230115"]);
        assert_eq!(merged.columns, vec!["A", "B"]);
        assert_eq!(merged.rows[0].values, vec![Some(2.0), Some(20.0)]);
        assert_eq!(merged.rows[1].values, vec![Some(3.0), Some(30.0)]);
    }

    #[test]
    fn row_order_follows_first_series() {
        let a = frame("A", &[("20230115", 3.0), ("20230101", 1.0), ("20230108", 2.0)]);
        let b = frame("B", &[("20230101", 10.0), ("20230108", 20.0), ("20230115", 30.0)]);
        let merged = a.inner_merge(b);
        assert_eq!(dates(&merged), vec!["20230115", "20230101", "20230108"]);
    }

    #[test]
    fn fold_applies_left_to_right() {
        let merged = fold_inner_merge(vec![
            frame("A", &[("1", 1.0), ("2", 2.0), ("3", 3.0)]),
            frame("B", &[("2", 20.0), ("3", 30.0)]),
            frame("C", &[("3", 300.0), ("2", 200.0)]),
        ])
        .unwrap();
        assert_eq!(merged.columns, vec!["A", "B", "C"]);
        assert_eq!(dates(&merged), vec!["2", "3"]);
        assert_eq!(merged.rows[0].values, vec![Some(2.0), Some(20.0), Some(200.0)]);
    }

    #[test]
    fn disjoint_series_merge_to_empty() {
        let merged = frame("A", &[("1", 1.0)]).inner_merge(frame("B", &[("2", 2.0)]));
        assert!(merged.rows.is_empty());
        assert_eq!(merged.columns, vec!["A", "B"]);
    }

    #[test]
    fn empty_fold_is_none() {
        assert!(fold_inner_merge(Vec::new()).is_none());
    }
}
