//! Feature computation for the OHLCV pipeline.
//!
//! This crate handles:
//! - Streaming trailing-window statistics
//! - The ordered transform chain (returns, rolling stats, volatility,
//!   price action, volume normalization, trend strength)
//! - The completeness filter that removes warm-up rows

pub mod engine;
pub mod filter;
pub mod rolling;

pub use engine::FeatureEngine;
pub use filter::CompletenessFilter;
pub use rolling::RollingStats;
