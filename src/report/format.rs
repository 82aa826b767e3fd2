//! Formatted terminal output for query results.
//!
//! We keep formatting code in one place so:
//! - the fetch/merge code stays clean and testable
//! - output changes are localized

use serde_json::Value;

use crate::domain::{SeriesRequest, SeriesValue};
use crate::table::{MetadataTable, TimeSeriesTable};

const DATE_WIDTH: usize = 12;
const VALUE_WIDTH: usize = 14;
const FIELD_WIDTH: usize = 28;

/// Header block: what was asked for and what survived the join.
pub fn format_run_summary(request: &SeriesRequest, values: &TimeSeriesTable, metadata: &MetadataTable) -> String {
    let mut out = String::new();

    out.push_str("=== eia - EIA series query ===\n");
    out.push_str(&format!(
        "Requested: {} series ({})\n",
        request.len(),
        if request.has_nicknames() { "nicknames" } else { "identifiers" }
    ));
    out.push_str(&format!(
        "Rows: {} shared report dates | Metadata: {} rows keyed by {}\n",
        values.len(),
        metadata.len(),
        metadata.index_name()
    ));
    if let (Some(first), Some(last)) = (values.rows().first(), values.rows().last()) {
        out.push_str(&format!("Range: {} .. {}\n", first.date, last.date));
    }

    out
}

/// Value table, at most `limit` rows (all rows when `None`).
pub fn format_values(table: &TimeSeriesTable, limit: Option<usize>) -> String {
    let mut out = String::new();

    let mut header = format!("{:<DATE_WIDTH$}", table.index_name());
    let mut rule = format!("{:-<DATE_WIDTH$}", "");
    for column in table.columns() {
        header.push_str(&format!(" {:>VALUE_WIDTH$}", truncate(column, VALUE_WIDTH)));
        rule.push_str(&format!(" {:-<VALUE_WIDTH$}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    let shown = limit.unwrap_or(table.len()).min(table.len());
    for row in &table.rows()[..shown] {
        let mut line = format!("{:<DATE_WIDTH$}", row.date.format("%Y-%m-%d").to_string());
        for v in &row.values {
            line.push_str(&format!(" {:>VALUE_WIDTH$}", fmt_value(*v)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    if shown < table.len() {
        out.push_str(&format!("... {} more rows\n", table.len() - shown));
    }

    out
}

/// Metadata table restricted to `fields` (every field when empty).
pub fn format_metadata(table: &MetadataTable, fields: &[&str]) -> String {
    let mut out = String::new();

    let fields: Vec<&str> = if fields.is_empty() { table.field_names() } else { fields.to_vec() };

    let mut header = format!("{:<FIELD_WIDTH$}", table.index_name());
    for f in &fields {
        header.push_str(&format!(" {:<FIELD_WIDTH$}", truncate(f, FIELD_WIDTH)));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for row in table.rows() {
        let mut line = format!("{:<FIELD_WIDTH$}", truncate(&row.key, FIELD_WIDTH));
        for f in &fields {
            let cell = row.fields.get(*f).map(fmt_field).unwrap_or_default();
            line.push_str(&format!(" {:<FIELD_WIDTH$}", truncate(&cell, FIELD_WIDTH)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn fmt_value(v: SeriesValue) -> String {
    match v {
        Some(x) => format!("{x:.3}"),
        None => "-".to_string(),
    }
}

fn fmt_field(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
