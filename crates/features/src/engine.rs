//! Feature computation engine.
//!
//! Applies the ordered transform chain to a validated bar series, producing
//! one feature row per input bar. Every output field at index `t` is a pure
//! function of bars at indices `<= t`; the single forward pass never reads
//! ahead, which is what makes the output safe for sequential consumption.

use crate::rolling::RollingStats;
use ohlcv_core::{BarSeries, ConfigError, FeatureRow, FeatureSeries, Result};
use tracing::debug;

/// Stateless-per-run engine: holds only the rolling window length.
///
/// The engine retains no reference to its input after returning; calling
/// [`compute`](FeatureEngine::compute) repeatedly with the same series and
/// window yields identical output.
#[derive(Debug, Clone)]
pub struct FeatureEngine {
    window: usize,
}

impl FeatureEngine {
    /// Create an engine. Fails with a configuration error before any
    /// computation if `window < 2`.
    pub fn new(window: usize) -> Result<Self> {
        if window < 2 {
            return Err(ConfigError::InvalidWindow(window).into());
        }
        Ok(Self { window })
    }

    /// The rolling window length shared by all rolling computations.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Compute the feature series for a bar series.
    ///
    /// Output is aligned 1:1 with the input; rows are never reordered or
    /// dropped here. A series shorter than the window simply yields more
    /// undefined fields. Undefined propagates: any field computed from an
    /// undefined input is itself undefined, never zero-filled.
    pub fn compute(&self, series: &BarSeries) -> FeatureSeries {
        let mut close_stats = RollingStats::new(self.window);
        let mut return_stats = RollingStats::new(self.window);
        let mut range_stats = RollingStats::new(self.window);
        let mut volume_stats = RollingStats::new(self.window);

        let mut prev_close: Option<f64> = None;
        let mut prev_mean: Option<f64> = None;
        let mut rows = Vec::with_capacity(series.len());

        for bar in series.iter() {
            // Stage 1: returns vs previous close. Undefined at the first
            // bar and whenever a divisor degenerates.
            let log_return = prev_close.and_then(|prev| {
                (prev > 0.0 && bar.close > 0.0).then(|| (bar.close / prev).ln())
            });
            let simple_return =
                prev_close.and_then(|prev| (prev != 0.0).then(|| bar.close / prev - 1.0));

            // Stage 2: rolling close statistics.
            close_stats.push(bar.close);
            let rolling_mean = close_stats.mean();
            let rolling_std = close_stats.std_dev();
            let rolling_zscore = match (rolling_mean, rolling_std) {
                (Some(mean), Some(std)) if std > 0.0 => Some((bar.close - mean) / std),
                _ => None,
            };

            // Stage 3: volatility over log returns. An undefined return
            // clears the window so undefined-ness propagates instead of
            // being skipped over.
            match log_return {
                Some(r) => return_stats.push(r),
                None => return_stats.clear(),
            }
            let rolling_volatility = return_stats.std_dev();

            // Stage 4: price action.
            let price_range = bar.price_range();
            range_stats.push(price_range);
            let rolling_range = range_stats.mean();

            // Stage 5: volume normalization. One window for both the mean
            // and the deviation; undefined when the deviation is zero.
            volume_stats.push(bar.volume);
            let volume_mean = volume_stats.mean();
            let volume_zscore = match (volume_mean, volume_stats.std_dev()) {
                (Some(mean), Some(std)) if std > 0.0 => Some((bar.volume - mean) / std),
                _ => None,
            };

            // Stage 6: trend strength, first difference of the rolling mean.
            let trend_strength = match (rolling_mean, prev_mean) {
                (Some(mean), Some(prev)) => Some(mean - prev),
                _ => None,
            };

            rows.push(FeatureRow {
                ts: bar.ts,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
                log_return,
                simple_return,
                rolling_mean,
                rolling_std,
                rolling_zscore,
                rolling_volatility,
                price_range,
                rolling_range,
                volume_mean,
                volume_zscore,
                trend_strength,
            });

            prev_close = Some(bar.close);
            prev_mean = rolling_mean;
        }

        debug!(rows = rows.len(), window = self.window, "computed feature series");
        FeatureSeries::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ohlcv_core::{Bar, Error};

    fn make_bar(ts: i64, close: f64) -> Bar {
        Bar {
            ts,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 100.0,
        }
    }

    fn series_from_closes(closes: &[f64]) -> BarSeries {
        BarSeries::new(
            closes
                .iter()
                .enumerate()
                .map(|(i, &c)| make_bar(i as i64 * 60_000, c))
                .collect(),
        )
    }

    #[test]
    fn test_invalid_window_rejected() {
        match FeatureEngine::new(1) {
            Err(Error::Config(ConfigError::InvalidWindow(1))) => {}
            other => panic!("expected InvalidWindow, got {other:?}"),
        }
        assert!(FeatureEngine::new(0).is_err());
        assert!(FeatureEngine::new(2).is_ok());
    }

    #[test]
    fn test_output_aligned_with_input() {
        let series = series_from_closes(&[100.0, 101.0, 99.0]);
        let engine = FeatureEngine::new(2).unwrap();
        let features = engine.compute(&series);
        assert_eq!(features.len(), series.len());
        for (bar, row) in series.iter().zip(features.iter()) {
            assert_eq!(bar.ts, row.ts);
            assert_eq!(bar.close, row.close);
        }
    }

    #[test]
    fn test_known_scenario() {
        // closes [100, 101, 99, 102, 98], window 3
        let series = series_from_closes(&[100.0, 101.0, 99.0, 102.0, 98.0]);
        let engine = FeatureEngine::new(3).unwrap();
        let features = engine.compute(&series);

        let r1 = features.get(1).unwrap();
        assert_relative_eq!(r1.log_return.unwrap(), (101.0f64 / 100.0).ln(), epsilon = 1e-12);
        assert_relative_eq!(r1.simple_return.unwrap(), 0.01, epsilon = 1e-12);

        let r2 = features.get(2).unwrap();
        assert_relative_eq!(r2.rolling_mean.unwrap(), 100.0, epsilon = 1e-12);

        let r3 = features.get(3).unwrap();
        assert_relative_eq!(
            r3.rolling_mean.unwrap(),
            (101.0 + 99.0 + 102.0) / 3.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            r3.trend_strength.unwrap(),
            (101.0 + 99.0 + 102.0) / 3.0 - 100.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_warmup_boundary() {
        let series = series_from_closes(&[100.0, 101.0, 99.0, 102.0, 98.0, 103.0]);
        let engine = FeatureEngine::new(4).unwrap();
        let features = engine.compute(&series);

        // rolling_mean/std undefined for 0..window-2, defined from window-1
        for t in 0..3 {
            let row = features.get(t).unwrap();
            assert!(row.rolling_mean.is_none(), "mean defined too early at {t}");
            assert!(row.rolling_std.is_none(), "std defined too early at {t}");
        }
        for t in 3..6 {
            let row = features.get(t).unwrap();
            assert!(row.rolling_mean.is_some(), "mean undefined at {t}");
            assert!(row.rolling_std.is_some(), "std undefined at {t}");
        }

        // volatility needs one extra bar for the return warm-up
        assert!(features.get(3).unwrap().rolling_volatility.is_none());
        assert!(features.get(4).unwrap().rolling_volatility.is_some());

        // trend strength needs two defined rolling means
        assert!(features.get(3).unwrap().trend_strength.is_none());
        assert!(features.get(4).unwrap().trend_strength.is_some());
    }

    #[test]
    fn test_first_row_returns_undefined() {
        let series = series_from_closes(&[100.0, 101.0]);
        let engine = FeatureEngine::new(2).unwrap();
        let features = engine.compute(&series);
        let r0 = features.get(0).unwrap();
        assert!(r0.log_return.is_none());
        assert!(r0.simple_return.is_none());
        // price_range is defined for every row
        assert_relative_eq!(r0.price_range, 2.0);
    }

    #[test]
    fn test_return_identity() {
        let series = series_from_closes(&[100.0, 101.0, 99.0, 102.0]);
        let engine = FeatureEngine::new(2).unwrap();
        let features = engine.compute(&series);
        for t in 1..features.len() {
            let ratio = series.get(t).unwrap().close / series.get(t - 1).unwrap().close;
            let log_return = features.get(t).unwrap().log_return.unwrap();
            assert_relative_eq!(log_return.exp(), ratio, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_dispersion_zscore_undefined() {
        let series = series_from_closes(&[100.0; 6]);
        let engine = FeatureEngine::new(3).unwrap();
        let features = engine.compute(&series);
        let last = features.get(5).unwrap();
        assert_eq!(last.rolling_std, Some(0.0));
        assert!(last.rolling_zscore.is_none());
        // constant volume too: volume z-score must also be undefined
        assert!(last.volume_zscore.is_none());
    }

    #[test]
    fn test_causality_by_truncation() {
        let series = series_from_closes(&[100.0, 101.0, 99.0, 102.0, 98.0, 103.0, 97.0]);
        let engine = FeatureEngine::new(3).unwrap();
        let full = engine.compute(&series);

        for t in 0..series.len() {
            let truncated = engine.compute(&series.truncated(t + 1));
            assert_eq!(
                truncated.get(t),
                full.get(t),
                "row {t} depends on future bars"
            );
        }
    }

    #[test]
    fn test_idempotence() {
        let series = series_from_closes(&[100.0, 101.0, 99.0, 102.0, 98.0]);
        let engine = FeatureEngine::new(3).unwrap();
        assert_eq!(engine.compute(&series), engine.compute(&series));
    }

    #[test]
    fn test_series_shorter_than_window() {
        let series = series_from_closes(&[100.0, 101.0]);
        let engine = FeatureEngine::new(5).unwrap();
        let features = engine.compute(&series);
        assert_eq!(features.len(), 2);
        for row in features.iter() {
            assert!(row.rolling_mean.is_none());
            assert!(row.rolling_volatility.is_none());
            assert!(row.volume_zscore.is_none());
        }
        // non-rolling fields still behave normally
        assert!(features.get(1).unwrap().log_return.is_some());
    }

    #[test]
    fn test_volume_zscore_sign() {
        let mut bars: Vec<Bar> = (0..4).map(|i| make_bar(i * 60_000, 100.0)).collect();
        bars[3].volume = 500.0; // spike on the last bar
        let series = BarSeries::new(bars);
        let engine = FeatureEngine::new(3).unwrap();
        let features = engine.compute(&series);
        let last = features.get(3).unwrap();
        assert!(last.volume_zscore.unwrap() > 0.0);
    }
}
