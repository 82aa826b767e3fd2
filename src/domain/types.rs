//! Shared domain types.
//!
//! These are the inputs to a series query (`SeriesRequest`, `CredentialSource`,
//! `FetchConfig`) and the per-identifier payload extracted from the provider
//! (`RawSeries`). The merged output tables live in `crate::table`.

use std::path::PathBuf;

use crate::error::AppError;

/// Default EIA series endpoint (API v1).
pub const DEFAULT_BASE_URL: &str = "http://api.eia.gov/series/";

/// Environment variable holding the API key when no key file is given.
pub const DEFAULT_KEY_ENV: &str = "EIA_API_KEY";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "EIA_BASE_URL";

/// A single observation value.
///
/// `None` covers JSON `null` and the non-numeric placeholders the provider
/// uses for withheld or unavailable data.
pub type SeriesValue = Option<f64>;

/// Which series to fetch, and what to call them in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesRequest {
    /// Plain identifiers; output columns keep the identifier as their name.
    ByIdentifier(Vec<String>),
    /// Ordered `(identifier, nickname)` pairs; output columns and metadata
    /// rows are keyed by nickname.
    WithNicknames(Vec<(String, String)>),
}

impl SeriesRequest {
    pub fn by_identifier<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SeriesRequest::ByIdentifier(ids.into_iter().map(Into::into).collect())
    }

    pub fn with_nicknames<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        SeriesRequest::WithNicknames(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Identifiers to query, in request order.
    pub fn query_list(&self) -> Vec<&str> {
        match self {
            SeriesRequest::ByIdentifier(ids) => ids.iter().map(String::as_str).collect(),
            SeriesRequest::WithNicknames(pairs) => pairs.iter().map(|(id, _)| id.as_str()).collect(),
        }
    }

    /// Nickname for `id`, if this is the nickname form and `id` was requested.
    pub fn nickname_for(&self, id: &str) -> Option<&str> {
        match self {
            SeriesRequest::ByIdentifier(_) => None,
            SeriesRequest::WithNicknames(pairs) => pairs
                .iter()
                .find(|(candidate, _)| candidate == id)
                .map(|(_, nick)| nick.as_str()),
        }
    }

    pub fn has_nicknames(&self) -> bool {
        matches!(self, SeriesRequest::WithNicknames(_))
    }

    pub fn len(&self) -> usize {
        match self {
            SeriesRequest::ByIdentifier(ids) => ids.len(),
            SeriesRequest::WithNicknames(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject requests that cannot produce a table, or whose nickname form
    /// names the same identifier twice.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.is_empty() {
            return Err(AppError::invalid_input("Series request must name at least one series identifier."));
        }
        if let SeriesRequest::WithNicknames(pairs) = self {
            for (i, (id, _)) in pairs.iter().enumerate() {
                if pairs[..i].iter().any(|(earlier, _)| earlier == id) {
                    return Err(AppError::invalid_input(format!(
                        "Series '{id}' is given more than one nickname."
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Where the API key is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Plain-text file; only its first line is used.
    File(PathBuf),
    /// Environment variable (after loading `.env`, if present).
    Env(String),
}

impl Default for CredentialSource {
    fn default() -> Self {
        CredentialSource::Env(DEFAULT_KEY_ENV.to_string())
    }
}

/// The API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Resolved configuration for one fetch.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub credential: CredentialSource,
    /// Issue the per-series requests concurrently. Merge order is unaffected.
    pub parallel: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credential: CredentialSource::default(),
            parallel: false,
        }
    }
}

/// One identifier's payload as returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    pub series_id: String,
    /// `(rawDate, value)` pairs in provider order.
    pub data: Vec<(String, SeriesValue)>,
    /// Every other field of the series record (`data` removed, `series_id` kept).
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nickname_form_queries_keys_in_order() {
        let req = SeriesRequest::with_nicknames([("ID1", "Oil"), ("ID2", "Gas")]);
        assert_eq!(req.query_list(), vec!["ID1", "ID2"]);
        assert_eq!(req.nickname_for("ID2"), Some("Gas"));
        assert_eq!(req.nickname_for("ID3"), None);
    }

    #[test]
    fn list_form_has_no_nicknames() {
        let req = SeriesRequest::by_identifier(["ID1", "ID2"]);
        assert!(!req.has_nicknames());
        assert_eq!(req.nickname_for("ID1"), None);
    }

    #[test]
    fn empty_request_is_invalid_input() {
        let err = SeriesRequest::by_identifier(Vec::<String>::new()).validate().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
    }

    #[test]
    fn repeated_identifier_in_nickname_form_is_invalid_input() {
        let req = SeriesRequest::with_nicknames([("ID1", "Oil"), ("ID1", "Gas")]);
        let err = req.validate().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
        assert!(err.message().contains("ID1"));
    }

    #[test]
    fn shared_nickname_across_identifiers_is_allowed() {
        let req = SeriesRequest::with_nicknames([("ID1", "Stocks"), ("ID2", "Stocks")]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn credential_debug_is_redacted() {
        let c = Credential::new("secret-key");
        assert!(!format!("{c:?}").contains("secret"));
    }
}
