//! Output adapters for the OHLCV feature pipeline.
//!
//! This crate handles:
//! - The `FeatureSink` delivery interface
//! - Per-symbol CSV artifacts
//! - SQLite persistence
//! - Terminal rendering of a tail slice of the feature table
//!
//! Adapters deliver the feature series unchanged; none of them computes or
//! mutates anything, so the same series can be rendered and persisted.

pub mod csv_sink;
pub mod render;
pub mod sink;
pub mod sqlite;

pub use csv_sink::CsvSink;
pub use render::render_tail;
pub use sink::FeatureSink;
pub use sqlite::SqliteSink;
