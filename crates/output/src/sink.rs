//! Feature sink interface.
//!
//! Durability and schema evolution are the sink's concern; the pipeline only
//! hands over a finished series and a destination identifier (the symbol).

use ohlcv_core::{FeatureSeries, Result};

/// Accepts a finalized feature series for a destination.
pub trait FeatureSink {
    /// Deliver the series unchanged. Must not mutate it; callers may render
    /// and persist the same object.
    fn emit(&mut self, series: &FeatureSeries, destination: &str) -> Result<()>;
}
