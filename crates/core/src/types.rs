//! Core data types for the OHLCV feature pipeline.

use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// A single validated OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar timestamp (ms).
    pub ts: TimestampMs,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Total volume.
    pub volume: f64,
}

impl Bar {
    /// Check the bar invariant: prices positive and finite, volume
    /// non-negative, and `low <= open, close <= high`.
    pub fn is_well_formed(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        prices.iter().all(|p| p.is_finite() && *p > 0.0)
            && self.volume.is_finite()
            && self.volume >= 0.0
            && self.low <= self.open.min(self.close)
            && self.high >= self.open.max(self.close)
    }

    /// Intrabar price range (`high - low`).
    #[inline]
    pub fn price_range(&self) -> f64 {
        self.high - self.low
    }
}

/// Ordered sequence of bars, strictly ascending by timestamp, no duplicates.
///
/// Construction sorts the bars and drops exact duplicate timestamps keeping
/// the first occurrence, so the ordering invariant holds unconditionally.
/// Immutable once built; the engine consumes it read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Build a series from bars in any order.
    pub fn new(mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.ts);
        // Stable sort + keep-first dedup: the earliest-seen row for a
        // duplicated timestamp survives.
        bars.dedup_by_key(|b| b.ts);
        Self { bars }
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The underlying bars, ascending by timestamp.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Bar at the given index.
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Iterate over bars in timestamp order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    /// A new series containing only the first `len` bars.
    pub fn truncated(&self, len: usize) -> BarSeries {
        BarSeries {
            bars: self.bars[..len.min(self.bars.len())].to_vec(),
        }
    }
}

/// Identifier for one derived feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureField {
    LogReturn,
    SimpleReturn,
    RollingMean,
    RollingStd,
    RollingZscore,
    RollingVolatility,
    PriceRange,
    RollingRange,
    VolumeMean,
    VolumeZscore,
    TrendStrength,
}

impl FeatureField {
    /// All derived feature columns, in output order.
    pub const ALL: [FeatureField; 11] = [
        FeatureField::LogReturn,
        FeatureField::SimpleReturn,
        FeatureField::RollingMean,
        FeatureField::RollingStd,
        FeatureField::RollingZscore,
        FeatureField::RollingVolatility,
        FeatureField::PriceRange,
        FeatureField::RollingRange,
        FeatureField::VolumeMean,
        FeatureField::VolumeZscore,
        FeatureField::TrendStrength,
    ];

    /// Column name as it appears in persisted output.
    pub fn name(self) -> &'static str {
        match self {
            FeatureField::LogReturn => "log_return",
            FeatureField::SimpleReturn => "simple_return",
            FeatureField::RollingMean => "rolling_mean",
            FeatureField::RollingStd => "rolling_std",
            FeatureField::RollingZscore => "rolling_zscore",
            FeatureField::RollingVolatility => "rolling_volatility",
            FeatureField::PriceRange => "price_range",
            FeatureField::RollingRange => "rolling_range",
            FeatureField::VolumeMean => "volume_mean",
            FeatureField::VolumeZscore => "volume_zscore",
            FeatureField::TrendStrength => "trend_strength",
        }
    }

    /// The default completeness-filter requirement: rows are retained once
    /// the engine's minimum-history floor is reached.
    pub fn default_required() -> Vec<FeatureField> {
        vec![
            FeatureField::LogReturn,
            FeatureField::RollingMean,
            FeatureField::RollingStd,
        ]
    }
}

/// One output row of the feature engine, keyed by the timestamp of its
/// source bar. Fields are either finite reals or explicitly undefined
/// (`None`); an undefined input propagates into every field computed from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Source bar timestamp (ms).
    pub ts: TimestampMs,
    /// Passthrough of the source OHLCV fields.
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Log return vs previous close; undefined at the first bar.
    pub log_return: Option<f64>,
    /// Simple (percentage) return vs previous close.
    pub simple_return: Option<f64>,
    /// Trailing-window mean of close.
    pub rolling_mean: Option<f64>,
    /// Trailing-window sample standard deviation of close.
    pub rolling_std: Option<f64>,
    /// Dispersion-normalized close deviation; undefined in flat markets.
    pub rolling_zscore: Option<f64>,
    /// Trailing-window sample standard deviation of log returns.
    pub rolling_volatility: Option<f64>,
    /// Intrabar range (`high - low`); defined for every row.
    pub price_range: f64,
    /// Trailing-window mean of the intrabar range.
    pub rolling_range: Option<f64>,
    /// Trailing-window mean of volume.
    pub volume_mean: Option<f64>,
    /// Dispersion-normalized volume deviation.
    pub volume_zscore: Option<f64>,
    /// First difference of the rolling mean.
    pub trend_strength: Option<f64>,
}

impl FeatureRow {
    /// Look up a derived field by identifier. `PriceRange` is always
    /// defined; everything else may be undefined during warm-up.
    pub fn get(&self, field: FeatureField) -> Option<f64> {
        match field {
            FeatureField::LogReturn => self.log_return,
            FeatureField::SimpleReturn => self.simple_return,
            FeatureField::RollingMean => self.rolling_mean,
            FeatureField::RollingStd => self.rolling_std,
            FeatureField::RollingZscore => self.rolling_zscore,
            FeatureField::RollingVolatility => self.rolling_volatility,
            FeatureField::PriceRange => Some(self.price_range),
            FeatureField::RollingRange => self.rolling_range,
            FeatureField::VolumeMean => self.volume_mean,
            FeatureField::VolumeZscore => self.volume_zscore,
            FeatureField::TrendStrength => self.trend_strength,
        }
    }

    /// Whether every field in `required` is defined on this row.
    pub fn is_complete(&self, required: &[FeatureField]) -> bool {
        required.iter().all(|f| self.get(*f).is_some())
    }
}

/// Ordered sequence of feature rows, aligned 1:1 with the bar series that
/// produced it. The engine never reorders or drops rows; only the
/// completeness filter shrinks the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSeries {
    rows: Vec<FeatureRow>,
}

impl FeatureSeries {
    /// Wrap rows already in timestamp order.
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The underlying rows, ascending by timestamp.
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Row at the given index.
    pub fn get(&self, index: usize) -> Option<&FeatureRow> {
        self.rows.get(index)
    }

    /// Iterate over rows in timestamp order.
    pub fn iter(&self) -> std::slice::Iter<'_, FeatureRow> {
        self.rows.iter()
    }

    /// The last `n` rows (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[FeatureRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }
}
