//! Per-symbol CSV artifacts.
//!
//! One file per destination symbol per run. Undefined fields serialize as
//! empty cells, never as zero.

use crate::sink::FeatureSink;
use ohlcv_core::{Error, FeatureSeries, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Writes the feature series to `<dir>/<destination>.csv`.
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    /// Create a sink rooted at the given directory; created on first emit.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the artifact for `destination` is written to.
    pub fn artifact_path(&self, destination: &str) -> PathBuf {
        self.dir.join(format!("{destination}.csv"))
    }
}

impl FeatureSink for CsvSink {
    fn emit(&mut self, series: &FeatureSeries, destination: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.artifact_path(destination);

        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .map_err(|e| Error::other(format!("CSV open error: {e}")))?;

        for row in series.iter() {
            writer
                .serialize(row)
                .map_err(|e| Error::other(format!("CSV write error: {e}")))?;
        }
        writer
            .flush()
            .map_err(|e| Error::other(format!("CSV flush error: {e}")))?;

        info!(path = %path.display(), rows = series.len(), "wrote feature artifact");
        Ok(())
    }
}
