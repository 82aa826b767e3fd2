//! Input/output helpers.
//!
//! - value table CSV export and metadata JSON export (`export`)

pub mod export;

pub use export::*;
