//! Core types and configuration for the OHLCV feature pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Market data types (bars, bar series)
//! - Derived feature types (feature rows, feature series)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::PipelineConfig;
pub use error::{ConfigError, DataError, Error, Result};
pub use types::*;
