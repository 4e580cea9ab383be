//! Data ingestion and normalization for the OHLCV feature pipeline.
//!
//! This crate handles:
//! - Raw tabular input from any source (flat file, query result, API response)
//! - Column name normalization and timestamp coercion
//! - Schema validation producing a typed, ordered `BarSeries`

pub mod source;
pub mod table;
pub mod validate;

pub use source::MarketDataSource;
pub use table::{RawTable, RawValue};
pub use validate::validate;
