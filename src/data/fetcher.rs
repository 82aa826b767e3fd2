//! Series query: fetch each identifier, inner-join on date, normalize names.
//!
//! The whole query is atomic. The first failure (credential, HTTP, shape,
//! date) aborts it and no tables are returned.

use rayon::prelude::*;
use reqwest::blocking::Client;

use crate::data::catalog::weekly_petroleum_request;
use crate::data::credential::load_credential;
use crate::data::eia::{EiaClient, Transport};
use crate::domain::{Credential, CredentialSource, FetchConfig, RawSeries, SeriesRequest};
use crate::error::AppError;
use crate::table::{MetadataTable, RawFrame, TimeSeriesTable, fold_inner_merge};

pub struct SeriesFetcher<T: Transport = Client> {
    client: EiaClient<T>,
    parallel: bool,
}

impl SeriesFetcher<Client> {
    pub fn new(config: &FetchConfig) -> Result<Self, AppError> {
        Ok(Self {
            client: EiaClient::new(config.base_url.clone())?,
            parallel: config.parallel,
        })
    }
}

impl<T: Transport> SeriesFetcher<T> {
    pub fn with_transport(transport: T, config: &FetchConfig) -> Self {
        Self {
            client: EiaClient::with_transport(transport, config.base_url.clone()),
            parallel: config.parallel,
        }
    }

    pub fn client(&self) -> &EiaClient<T> {
        &self.client
    }

    /// Load the credential from `source`, then run [`Self::fetch_with_credential`].
    pub fn fetch(
        &self,
        request: &SeriesRequest,
        source: &CredentialSource,
    ) -> Result<(TimeSeriesTable, MetadataTable), AppError> {
        request.validate()?;
        let credential = load_credential(source)?;
        self.fetch_with_credential(request, &credential)
    }

    pub fn fetch_with_credential(
        &self,
        request: &SeriesRequest,
        credential: &Credential,
    ) -> Result<(TimeSeriesTable, MetadataTable), AppError> {
        request.validate()?;
        let ids = request.query_list();
        tracing::info!(series = ids.len(), parallel = self.parallel, "fetching EIA series");

        let series = self.fetch_all(credential, &ids)?;

        let merged = fold_inner_merge(series.iter().map(RawFrame::from_series))
            .ok_or_else(|| AppError::invalid_input("Series request must name at least one series identifier."))?;
        let mut values = TimeSeriesTable::from_raw(merged)?;
        let mut metadata = MetadataTable::by_series_id(&series);

        if request.has_nicknames() {
            values.rename_columns(|id| request.nickname_for(id));
            metadata = metadata.rekey_by_nickname(request);
        }

        if values.is_empty() {
            tracing::warn!(series = ids.len(), "no report date is shared by every requested series");
        }
        tracing::info!(rows = values.len(), columns = values.columns().len(), "merged EIA series");

        Ok((values, metadata))
    }

    /// Results are always in request order; the first error wins.
    fn fetch_all(&self, credential: &Credential, ids: &[&str]) -> Result<Vec<RawSeries>, AppError> {
        if self.parallel {
            ids.par_iter()
                .map(|id| self.client.fetch_series(credential, id))
                .collect()
        } else {
            ids.iter()
                .map(|id| self.client.fetch_series(credential, id))
                .collect()
        }
    }
}

/// The weekly petroleum inventory preset, fetched as one query.
#[derive(Debug, Clone)]
pub struct WeeklyReport {
    pub values: TimeSeriesTable,
    pub metadata: MetadataTable,
}

impl WeeklyReport {
    pub fn fetch<T: Transport>(fetcher: &SeriesFetcher<T>, source: &CredentialSource) -> Result<Self, AppError> {
        let (values, metadata) = fetcher.fetch(&weekly_petroleum_request(), source)?;
        Ok(Self { values, metadata })
    }
}
