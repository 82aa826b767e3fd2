//! Shared "query pipeline" logic used by the `query` and `weekly` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! credential -> per-series fetch -> inner join on date -> rename -> exports

use crate::data::SeriesFetcher;
use crate::domain::{FetchConfig, SeriesRequest};
use crate::error::AppError;
use crate::table::{MetadataTable, TimeSeriesTable};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub request: SeriesRequest,
    pub values: TimeSeriesTable,
    pub metadata: MetadataTable,
}

/// Execute the query against the live endpoint in `config`.
pub fn run_query(request: SeriesRequest, config: &FetchConfig) -> Result<RunOutput, AppError> {
    let fetcher = SeriesFetcher::new(config)?;
    run_query_with(&fetcher, request, config)
}

/// Execute the query with an already-built fetcher.
pub fn run_query_with<T: crate::data::Transport>(
    fetcher: &SeriesFetcher<T>,
    request: SeriesRequest,
    config: &FetchConfig,
) -> Result<RunOutput, AppError> {
    let (values, metadata) = fetcher.fetch(&request, &config.credential)?;
    Ok(RunOutput {
        request,
        values,
        metadata,
    })
}
