//! EIA series API (v1) integration.
//!
//! One GET per identifier: `<base_url>?api_key=<key>&series_id=<id>`.
//! The HTTP layer sits behind [`Transport`] so the query/merge pipeline can be
//! driven from canned bodies.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Credential, RawSeries, SeriesValue};
use crate::error::AppError;

/// Blocking GET returning the response body of a successful request.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, AppError>;
}

impl Transport for Client {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, AppError> {
        // Strip the URL from transport errors: it carries the API key.
        let resp = Client::get(self, url)
            .query(query)
            .send()
            .map_err(|e| AppError::remote(format!("EIA request failed: {}", e.without_url())))?;

        if !resp.status().is_success() {
            return Err(AppError::remote(format!(
                "EIA request failed with status {}.",
                resp.status()
            )));
        }

        resp.text()
            .map_err(|e| AppError::remote(format!("Failed to read EIA response: {}", e.without_url())))
    }
}

pub struct EiaClient<T: Transport = Client> {
    transport: T,
    base_url: String,
}

impl EiaClient<Client> {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::remote(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_transport(client, base_url))
    }
}

impl<T: Transport> EiaClient<T> {
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch one series. The returned `series_id` is the requested identifier.
    pub fn fetch_series(&self, credential: &Credential, series_id: &str) -> Result<RawSeries, AppError> {
        let body = self.transport.get(
            &self.base_url,
            &[("api_key", credential.expose()), ("series_id", series_id)],
        )?;
        let series = parse_series_response(series_id, &body)?;
        tracing::debug!(series_id, points = series.data.len(), "fetched series");
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct SeriesEnvelope {
    #[serde(default)]
    series: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    data: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Extract `series[0]` from a response body.
///
/// A body that is not JSON is a remote failure; JSON without the expected
/// `series` / `data` structure is an unexpected shape.
pub fn parse_series_response(requested_id: &str, body: &str) -> Result<RawSeries, AppError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| AppError::remote(format!("Failed to parse EIA response for {requested_id}: {e}")))?;

    let envelope: SeriesEnvelope = serde_json::from_value(json).map_err(|e| {
        AppError::unexpected_shape(format!("Unexpected EIA response for {requested_id}: {e}"))
    })?;

    let Some(mut record) = envelope.series.and_then(|s| s.into_iter().next()) else {
        let detail = envelope
            .data
            .and_then(|d| d.error)
            .unwrap_or_else(|| "missing 'series' array".to_string());
        return Err(AppError::unexpected_shape(format!(
            "Unexpected EIA response for {requested_id}: {detail}"
        )));
    };

    let provider_id = record
        .get("series_id")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AppError::unexpected_shape(format!("EIA response for {requested_id} has no 'series_id'."))
        })?;
    if !provider_id.eq_ignore_ascii_case(requested_id) {
        tracing::warn!(requested_id, provider_id, "provider returned a different series_id");
    }

    let raw_data = match record.shift_remove("data") {
        Some(Value::Array(items)) => items,
        _ => {
            return Err(AppError::unexpected_shape(format!(
                "EIA response for {requested_id} has no 'data' array."
            )));
        }
    };

    let mut data = Vec::with_capacity(raw_data.len());
    for (i, item) in raw_data.iter().enumerate() {
        data.push(parse_point(requested_id, i, item)?);
    }

    Ok(RawSeries {
        series_id: requested_id.to_string(),
        data,
        metadata: record,
    })
}

fn parse_point(series_id: &str, index: usize, item: &Value) -> Result<(String, SeriesValue), AppError> {
    let shape_err = || {
        AppError::unexpected_shape(format!(
            "EIA data point {index} of {series_id} is not a [date, value] pair: {item}"
        ))
    };

    let pair = item.as_array().filter(|a| a.len() >= 2).ok_or_else(shape_err)?;
    let raw_date = pair[0].as_str().ok_or_else(shape_err)?.to_string();
    let value = match &pair[1] {
        Value::Null => None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_value(s),
        _ => return Err(shape_err()),
    };
    Ok((raw_date, value))
}

/// Numeric strings become values; placeholders such as `"NA"` or `"--"` are missing.
fn parse_value(raw: &str) -> SeriesValue {
    let v = raw.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
