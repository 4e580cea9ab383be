//! Schema validation: raw table in, typed `BarSeries` out.
//!
//! Every later pipeline stage operates on guaranteed fields; nothing
//! downstream probes for column names again.

use crate::table::{normalize_column_name, RawTable, RawValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use ohlcv_core::{Bar, BarSeries, DataError, Result, TimestampMs};
use tracing::{debug, warn};

/// Accepted (normalized) names for the timestamp column, tried in order.
const TIMESTAMP_ALIASES: [&str; 4] = ["timestamp", "date", "time", "datetime"];

/// Price/volume columns that must all be present.
const OHLCV_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// Validate a raw table into an ordered `BarSeries`.
///
/// - Fails with `DataError::Empty` on zero input rows (or when every row is
///   dropped by coercion).
/// - Fails with `DataError::NoTimestamp` / `DataError::BadTimestamp` on a
///   missing or unparseable timestamp column.
/// - Fails with `DataError::MissingColumn` if any OHLCV column is absent.
/// - Rows with non-numeric OHLCV values, or violating the bar invariant
///   (`low <= open, close <= high`, positive finite prices, non-negative
///   volume), are dropped with a warning.
/// - Duplicate timestamps keep the first occurrence; rows are sorted
///   ascending by timestamp.
pub fn validate(raw: &RawTable) -> Result<BarSeries> {
    if raw.is_empty() {
        return Err(DataError::Empty.into());
    }

    let ts_idx = TIMESTAMP_ALIASES
        .iter()
        .find_map(|alias| raw.column_index(alias))
        .ok_or(DataError::NoTimestamp)?;

    let mut ohlcv_idx = [0usize; 5];
    for (slot, name) in ohlcv_idx.iter_mut().zip(OHLCV_COLUMNS) {
        *slot = raw
            .column_index(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
    }

    let mut bars = Vec::with_capacity(raw.len());
    let mut dropped_non_numeric = 0usize;
    let mut dropped_malformed = 0usize;

    for row in raw.rows() {
        let ts = parse_timestamp(&row[ts_idx])?;

        let values: Vec<Option<f64>> = ohlcv_idx.iter().map(|&i| row[i].as_f64()).collect();
        if values.iter().any(|v| v.is_none()) {
            dropped_non_numeric += 1;
            continue;
        }

        let bar = Bar {
            ts,
            open: values[0].unwrap_or_default(),
            high: values[1].unwrap_or_default(),
            low: values[2].unwrap_or_default(),
            close: values[3].unwrap_or_default(),
            volume: values[4].unwrap_or_default(),
        };

        if !bar.is_well_formed() {
            dropped_malformed += 1;
            continue;
        }

        bars.push(bar);
    }

    if dropped_non_numeric > 0 || dropped_malformed > 0 {
        warn!(
            dropped_non_numeric,
            dropped_malformed, "dropped rows during validation"
        );
    }

    let raw_count = bars.len();
    let series = BarSeries::new(bars);
    let duplicates = raw_count - series.len();
    if duplicates > 0 {
        debug!(duplicates, "dropped duplicate timestamps, keeping first");
    }

    if series.is_empty() {
        return Err(DataError::Empty.into());
    }

    debug!(rows = series.len(), "validated bar series");
    Ok(series)
}

/// Coerce one raw cell to a millisecond timestamp.
///
/// Integers (and integral floats) are taken as Unix milliseconds; text is
/// parsed as RFC 3339, `%Y-%m-%d %H:%M:%S`, or a bare `%Y-%m-%d` date,
/// naive values interpreted as UTC.
fn parse_timestamp(value: &RawValue) -> std::result::Result<TimestampMs, DataError> {
    match value {
        RawValue::Int(i) => Ok(*i),
        RawValue::Float(f) if f.is_finite() => Ok(*f as i64),
        RawValue::Text(s) => parse_timestamp_text(s),
        _ => Err(DataError::BadTimestamp(format!("{value:?}"))),
    }
}

fn parse_timestamp_text(text: &str) -> std::result::Result<TimestampMs, DataError> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
    }

    Err(DataError::BadTimestamp(text.to_string()))
}
