//! Report-date parsing for the provider's compact `YYYYMMDD` strings.

use chrono::NaiveDate;

use crate::error::AppError;

/// Name of the row index of the merged value table.
pub const REPORT_DATE: &str = "report date";

/// Parse a raw `YYYYMMDD` string (e.g. `"20230106"`) into a calendar date.
pub fn parse_report_date(raw: &str) -> Result<NaiveDate, AppError> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::malformed_date(format!(
            "Invalid report date '{raw}': expected YYYYMMDD."
        )));
    }

    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .map_err(|e| AppError::malformed_date(format!("Invalid report date '{raw}': {e}")))
}
