//! SQLite persistence.
//!
//! Rows are keyed by `(symbol, ts)`; re-emitting a run replaces rather than
//! duplicates. Undefined fields are stored as `NULL`, never zero-filled.

use crate::sink::FeatureSink;
use ohlcv_core::{Error, FeatureSeries, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::info;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS features (
    symbol             TEXT    NOT NULL,
    ts                 INTEGER NOT NULL,
    open               REAL    NOT NULL,
    high               REAL    NOT NULL,
    low                REAL    NOT NULL,
    close              REAL    NOT NULL,
    volume             REAL    NOT NULL,
    log_return         REAL,
    simple_return      REAL,
    rolling_mean       REAL,
    rolling_std        REAL,
    rolling_zscore     REAL,
    rolling_volatility REAL,
    price_range        REAL    NOT NULL,
    rolling_range      REAL,
    volume_mean        REAL,
    volume_zscore      REAL,
    trend_strength     REAL,
    PRIMARY KEY (symbol, ts)
);
";

/// Writes the feature series into a `features` table.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Open (or create) a database file and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| Error::database(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// In-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::database(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| Error::database(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Number of persisted rows for a symbol.
    pub fn row_count(&self, symbol: &str) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM features WHERE symbol = ?1",
                params![symbol],
                |row| row.get(0),
            )
            .map_err(|e| Error::database(e.to_string()))
    }
}

impl FeatureSink for SqliteSink {
    fn emit(&mut self, series: &FeatureSeries, destination: &str) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| Error::database(e.to_string()))?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO features (
                        symbol, ts, open, high, low, close, volume,
                        log_return, simple_return, rolling_mean, rolling_std,
                        rolling_zscore, rolling_volatility, price_range,
                        rolling_range, volume_mean, volume_zscore, trend_strength
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                              ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                )
                .map_err(|e| Error::database(e.to_string()))?;

            for row in series.iter() {
                stmt.execute(params![
                    destination,
                    row.ts,
                    row.open,
                    row.high,
                    row.low,
                    row.close,
                    row.volume,
                    row.log_return,
                    row.simple_return,
                    row.rolling_mean,
                    row.rolling_std,
                    row.rolling_zscore,
                    row.rolling_volatility,
                    row.price_range,
                    row.rolling_range,
                    row.volume_mean,
                    row.volume_zscore,
                    row.trend_strength,
                ])
                .map_err(|e| Error::database(e.to_string()))?;
            }
        }
        tx.commit().map_err(|e| Error::database(e.to_string()))?;

        info!(symbol = destination, rows = series.len(), "persisted feature series");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohlcv_core::{Bar, BarSeries};
    use ohlcv_features::FeatureEngine;

    fn sample_series() -> FeatureSeries {
        let bars = (0..5)
            .map(|i| Bar {
                ts: i * 60_000,
                open: 100.0 + i as f64,
                high: 101.0 + i as f64,
                low: 99.0 + i as f64,
                close: 100.0 + i as f64,
                volume: 1000.0 + i as f64 * 10.0,
            })
            .collect();
        let series = BarSeries::new(bars);
        FeatureEngine::new(3).unwrap().compute(&series)
    }

    #[test]
    fn test_emit_persists_all_rows() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        let series = sample_series();
        sink.emit(&series, "AAPL").unwrap();
        assert_eq!(sink.row_count("AAPL").unwrap(), series.len() as i64);
        assert_eq!(sink.row_count("MSFT").unwrap(), 0);
    }

    #[test]
    fn test_reemit_replaces_not_duplicates() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        let series = sample_series();
        sink.emit(&series, "AAPL").unwrap();
        sink.emit(&series, "AAPL").unwrap();
        assert_eq!(sink.row_count("AAPL").unwrap(), series.len() as i64);
    }

    #[test]
    fn test_undefined_fields_stored_as_null() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        let series = sample_series();
        sink.emit(&series, "AAPL").unwrap();

        // First row is warm-up: rolling_mean is undefined
        let rolling_mean: Option<f64> = sink
            .conn
            .query_row(
                "SELECT rolling_mean FROM features WHERE symbol = 'AAPL' ORDER BY ts LIMIT 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(rolling_mean.is_none());

        // Last row is past warm-up: rolling_mean is defined
        let last_mean: Option<f64> = sink
            .conn
            .query_row(
                "SELECT rolling_mean FROM features WHERE symbol = 'AAPL' ORDER BY ts DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(last_mean.is_some());
    }
}
