//! Reporting utilities: terminal rendering of the value and metadata tables.

pub mod format;

pub use format::*;
