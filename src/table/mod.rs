//! Output tables: the date-indexed value table and the per-series metadata table.
//!
//! - `date`: `YYYYMMDD` parsing for the `report date` index
//! - `merge`: inner fold-join of per-series sub-tables on the raw date

pub mod date;
pub mod merge;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::domain::{RawSeries, SeriesRequest, SeriesValue};
use crate::error::AppError;

pub use date::{REPORT_DATE, parse_report_date};
pub use merge::{RawFrame, RawRow, fold_inner_merge};

/// Metadata index name in the identifier form.
pub const SERIES_ID: &str = "series_id";
/// Metadata index name in the nickname form.
pub const NICKNAME: &str = "nickname";

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRow {
    pub date: NaiveDate,
    pub values: Vec<SeriesValue>,
}

/// Values indexed by report date, one column per requested series.
///
/// Every row carries a value slot for every column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeriesTable {
    columns: Vec<String>,
    rows: Vec<TimeSeriesRow>,
}

impl TimeSeriesTable {
    /// Index a merged raw frame by parsed report date, dropping the raw string.
    pub fn from_raw(frame: RawFrame) -> Result<Self, AppError> {
        let rows = frame
            .rows
            .into_iter()
            .map(|row| {
                Ok(TimeSeriesRow {
                    date: parse_report_date(&row.raw_date)?,
                    values: row.values,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            columns: frame.columns,
            rows,
        })
    }

    pub fn index_name(&self) -> &'static str {
        REPORT_DATE
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[TimeSeriesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// `(date, value)` pairs of the first column called `name`.
    pub fn column(&self, name: &str) -> Option<Vec<(NaiveDate, SeriesValue)>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| (r.date, r.values[idx])).collect())
    }

    /// Value at the first row dated `date` in the first column called `column`.
    pub fn value(&self, date: NaiveDate, column: &str) -> Option<SeriesValue> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.iter().find(|r| r.date == date).map(|r| r.values[idx])
    }

    /// Rename every column for which `rename` returns a new name.
    pub fn rename_columns<'a, F>(&mut self, rename: F)
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        for column in &mut self.columns {
            if let Some(new_name) = rename(column.as_str()) {
                *column = new_name.to_string();
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRow {
    pub key: String,
    pub fields: Map<String, Value>,
}

/// One row of provider metadata per requested series.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataTable {
    index_name: String,
    rows: Vec<MetadataRow>,
}

impl MetadataTable {
    /// Rows keyed by `series_id`, in the given order.
    pub fn by_series_id<'a, I>(series: I) -> Self
    where
        I: IntoIterator<Item = &'a RawSeries>,
    {
        let rows = series
            .into_iter()
            .map(|s| {
                let mut fields = s.metadata.clone();
                fields.shift_remove(SERIES_ID);
                MetadataRow {
                    key: s.series_id.clone(),
                    fields,
                }
            })
            .collect();

        Self {
            index_name: SERIES_ID.to_string(),
            rows,
        }
    }

    /// Re-key rows by nickname, keeping `series_id` as a trailing field.
    ///
    /// Rows without a nickname in `request` keep their identifier as key.
    pub fn rekey_by_nickname(self, request: &SeriesRequest) -> Self {
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                let key = request.nickname_for(&row.key).unwrap_or(&row.key).to_string();
                let mut fields = row.fields;
                fields.insert(SERIES_ID.to_string(), Value::String(row.key));
                MetadataRow { key, fields }
            })
            .collect();

        Self {
            index_name: NICKNAME.to_string(),
            rows,
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn rows(&self) -> &[MetadataRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.key.as_str()).collect()
    }

    /// First row with the given key.
    pub fn get(&self, key: &str) -> Option<&MetadataRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Union of field names across rows, in first-seen order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.rows {
            for name in row.fields.keys() {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}
