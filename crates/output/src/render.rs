//! Terminal rendering.
//!
//! A narrow-terminal-friendly vertical table over the tail of the feature
//! series: variables as rows, recent timesteps as columns. Purely cosmetic;
//! builds a `String` and performs no I/O of its own.

use chrono::DateTime;
use ohlcv_core::{FeatureRow, FeatureSeries};

/// Variables shown in the snapshot, in display order.
fn display_vars() -> Vec<(&'static str, fn(&FeatureRow) -> Option<f64>)> {
    vec![
        ("close", |r| Some(r.close)),
        ("log_return", |r| r.log_return),
        ("rolling_mean", |r| r.rolling_mean),
        ("rolling_std", |r| r.rolling_std),
        ("rolling_zscore", |r| r.rolling_zscore),
        ("rolling_volatility", |r| r.rolling_volatility),
        ("volume", |r| Some(r.volume)),
        ("volume_zscore", |r| r.volume_zscore),
        ("trend_strength", |r| r.trend_strength),
    ]
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "-".to_string(),
    }
}

fn format_timestamp(ts_ms: i64) -> String {
    DateTime::from_timestamp_millis(ts_ms)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| ts_ms.to_string())
}

/// Render the last `lookback` rows as an aligned vertical table.
pub fn render_tail(series: &FeatureSeries, symbol: &str, lookback: usize) -> String {
    let recent = series.tail(lookback);
    if recent.is_empty() {
        return format!("Market Snapshot | {symbol}\n(no rows)\n");
    }

    // Build the cell grid: one header row, then one row per variable.
    let mut grid: Vec<Vec<String>> = Vec::new();
    let mut header = vec!["Variable".to_string()];
    header.extend(recent.iter().map(|r| format_timestamp(r.ts)));
    grid.push(header);

    for (name, accessor) in display_vars() {
        let mut row = vec![name.to_string()];
        row.extend(recent.iter().map(|r| format_value(accessor(r))));
        grid.push(row);
    }

    let column_count = grid[0].len();
    let widths: Vec<usize> = (0..column_count)
        .map(|c| grid.iter().map(|row| row[c].len()).max().unwrap_or(0))
        .collect();

    let mut out = format!("Market Snapshot | {symbol}\n");
    for row in &grid {
        let mut line = String::new();
        for (c, cell) in row.iter().enumerate() {
            if c == 0 {
                line.push_str(&format!("{cell:<width$}", width = widths[0]));
            } else {
                line.push_str(&format!("  {cell:>width$}", width = widths[c]));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
