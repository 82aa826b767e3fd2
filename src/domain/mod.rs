//! Domain types used throughout the query pipeline.
//!
//! This module defines:
//!
//! - the request shape (`SeriesRequest`) and credential plumbing (`CredentialSource`, `Credential`)
//! - resolved run configuration (`FetchConfig`)
//! - the raw per-series payload (`RawSeries`)

pub mod types;

pub use types::*;
