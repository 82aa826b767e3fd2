//! `eia-series` library crate.
//!
//! The binary (`eia`) is a thin wrapper around this library so that:
//!
//! - the query/merge logic is testable without spawning processes or hitting the network
//! - the series fetcher is reusable from other tools
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod table;

pub use data::{SeriesFetcher, Transport, WeeklyReport};
pub use domain::{Credential, CredentialSource, FetchConfig, SeriesRequest};
pub use error::{AppError, ErrorKind};
pub use table::{MetadataTable, TimeSeriesTable};
