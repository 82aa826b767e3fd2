//! Export query results.
//!
//! - value table → CSV (`report date` first, then one column per series)
//! - metadata table → pretty JSON array, index field first

use std::fs::File;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::table::{MetadataTable, TimeSeriesTable};

/// Write the value table to CSV. Missing values are empty cells.
pub fn write_values_csv(path: &Path, table: &TimeSeriesTable) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    let mut header = vec![table.index_name().to_string()];
    header.extend(table.columns().iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| AppError::output(format!("Failed to write export CSV header: {e}")))?;

    for row in table.rows() {
        let mut record = Vec::with_capacity(row.values.len() + 1);
        record.push(row.date.format("%Y-%m-%d").to_string());
        record.extend(row.values.iter().map(|v| v.map(|x| x.to_string()).unwrap_or_default()));
        writer
            .write_record(&record)
            .map_err(|e| AppError::output(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::output(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the metadata table as a JSON array of objects.
pub fn write_metadata_json(path: &Path, table: &MetadataTable) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create metadata JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &metadata_records(table))
        .map_err(|e| AppError::output(format!("Failed to write metadata JSON: {e}")))?;
    Ok(())
}

/// One object per row: the index (`series_id` or `nickname`) then the provider fields.
pub fn metadata_records(table: &MetadataTable) -> Vec<Map<String, Value>> {
    table
        .rows()
        .iter()
        .map(|row| {
            let mut record = Map::with_capacity(row.fields.len() + 1);
            record.insert(table.index_name().to_string(), Value::String(row.key.clone()));
            for (k, v) in &row.fields {
                record.insert(k.clone(), v.clone());
            }
            record
        })
        .collect()
}
