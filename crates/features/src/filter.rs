//! Completeness filter.
//!
//! The single point where the time axis may shrink. The engine itself never
//! drops rows; this stage removes rows whose required fields are still
//! undefined (the warm-up period), preserving the original order.

use ohlcv_core::{FeatureField, FeatureSeries};
use tracing::debug;

/// Retains only rows where every required field is defined.
#[derive(Debug, Clone)]
pub struct CompletenessFilter {
    required: Vec<FeatureField>,
}

impl Default for CompletenessFilter {
    /// The default requirement set retains rows once the engine's
    /// minimum-history floor is reached.
    fn default() -> Self {
        Self {
            required: FeatureField::default_required(),
        }
    }
}

impl CompletenessFilter {
    /// Create a filter with an explicit requirement set. An empty set
    /// retains every row.
    pub fn new(required: Vec<FeatureField>) -> Self {
        Self { required }
    }

    /// The fields a row must define to be retained.
    pub fn required(&self) -> &[FeatureField] {
        &self.required
    }

    /// Produce a new series containing only complete rows, in the same
    /// ascending-timestamp order. The input is left untouched.
    pub fn apply(&self, series: &FeatureSeries) -> FeatureSeries {
        let rows: Vec<_> = series
            .iter()
            .filter(|row| row.is_complete(&self.required))
            .copied()
            .collect();
        debug!(
            retained = rows.len(),
            dropped = series.len() - rows.len(),
            "applied completeness filter"
        );
        FeatureSeries::new(rows)
    }
}
