//! Remote data: credential loading, the EIA client, and the series query.

pub mod catalog;
pub mod credential;
pub mod eia;
pub mod fetcher;

pub use catalog::{WEEKLY_PETROLEUM, weekly_petroleum_request};
pub use credential::load_credential;
pub use eia::{EiaClient, Transport, parse_series_response};
pub use fetcher::{SeriesFetcher, WeeklyReport};
