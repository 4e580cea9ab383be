//! Market data source interface.
//!
//! Fetching is an external collaborator: implementations may call an HTTP
//! API, read a flat file, or query a database. The pipeline only sees the
//! `RawTable` they return. Retries on transient failures belong to the
//! implementation, not to the pipeline.

use crate::table::RawTable;
use ohlcv_core::{config::RequestConfig, Result};

/// Supplies raw OHLCV data for a symbol/interval/period request.
pub trait MarketDataSource {
    /// Fetch a raw table for the given request. May fail, return an empty
    /// table, or return unsorted/duplicated timestamps; validation handles
    /// all of those downstream.
    fn fetch(&self, request: &RequestConfig) -> Result<RawTable>;
}
