//! Configuration structures for the OHLCV feature pipeline.
//!
//! One immutable record per run; there is no process-wide state. The
//! request parameters belong to the external market-data collaborator,
//! the engine and filter sections to the pipeline itself.

use crate::types::FeatureField;
use serde::{Deserialize, Serialize};

/// Main configuration for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Market data request configuration.
    pub request: RequestConfig,
    /// Feature engine configuration.
    pub engine: EngineConfig,
    /// Completeness filter configuration.
    pub filter: FilterConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            request: RequestConfig::default(),
            engine: EngineConfig::default(),
            filter: FilterConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Raw-data request parameters, passed through to the market data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Trading symbol (e.g., "AAPL").
    pub symbol: String,
    /// Bar interval (e.g., "1m").
    pub interval: String,
    /// Lookback period (e.g., "1d").
    pub period: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            interval: "1m".to_string(),
            period: "1d".to_string(),
        }
    }
}

/// Feature engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rolling window length shared by all rolling computations. Must be >= 2.
    pub window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { window: 14 }
    }
}

/// Completeness filter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Fields that must be defined for a row to be retained.
    pub required: Vec<FeatureField>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            required: FeatureField::default_required(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for per-symbol feature artifacts.
    pub data_dir: String,
    /// Number of trailing rows shown by the terminal renderer.
    pub render_lookback: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            render_lookback: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.engine.window, 14);
        assert_eq!(config.request.symbol, "AAPL");
        assert_eq!(config.filter.required, FeatureField::default_required());
        assert_eq!(config.output.render_lookback, 3);
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.engine.window, config.engine.window);
        assert_eq!(back.filter.required, config.filter.required);
    }
}
