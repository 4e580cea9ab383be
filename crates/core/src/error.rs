//! Error types for the OHLCV feature pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the feature pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid engine or pipeline parameters.
    #[error("Configuration error: {0}")]
    Config(ConfigError),

    /// Malformed, empty, or unparseable raw input.
    #[error("Data error: {0}")]
    Data(DataError),

    /// Persistence sink error.
    #[error("Database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// Raw-input validation failures. Always fatal to the current run;
/// malformed input is never silently patched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The raw input has zero rows.
    #[error("raw input has no rows")]
    Empty,

    /// No recognizable timestamp column exists.
    #[error("no recognizable timestamp column (accepted: date, time, timestamp, datetime)")]
    NoTimestamp,

    /// A timestamp value could not be coerced to a temporal type.
    #[error("unparseable timestamp value: {0:?}")]
    BadTimestamp(String),

    /// A required OHLCV column is missing.
    #[error("required column missing: {0}")]
    MissingColumn(String),
}

/// Engine parameter failures, caught before any computation starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Rolling window below the minimum of 2.
    #[error("rolling window must be >= 2, got {0}")]
    InvalidWindow(usize),
}

impl Error {
    /// Create a configuration error.
    pub fn config(err: ConfigError) -> Self {
        Error::Config(err)
    }

    /// Create a data error.
    pub fn data(err: DataError) -> Self {
        Error::Data(err)
    }

    /// Create a database error.
    pub fn database(msg: impl Into<String>) -> Self {
        Error::Database(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

impl From<DataError> for Error {
    fn from(err: DataError) -> Self {
        Error::Data(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_display() {
        let err = Error::from(DataError::Empty);
        assert_eq!(err.to_string(), "Data error: raw input has no rows");
    }

    #[test]
    fn test_config_error_display() {
        let err = Error::from(ConfigError::InvalidWindow(1));
        assert_eq!(
            err.to_string(),
            "Configuration error: rolling window must be >= 2, got 1"
        );
    }

    #[test]
    fn test_missing_column() {
        let err = DataError::MissingColumn("close".to_string());
        assert!(err.to_string().contains("close"));
    }
}
