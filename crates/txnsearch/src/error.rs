//! Error types for transaction search operations.

use thiserror::Error;

/// Result type alias for transaction search operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for transaction search operations.
///
/// Only one condition is ever recovered locally: dropping an index that does
/// not exist. Every other failure is fatal to the run and propagates to the
/// caller unchanged.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    ///
    /// **Recovery:** Review connection URL or builder parameters. Not retryable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network error (connection refused, reset, timed out).
    ///
    /// **Recovery:** Check that Redis Stack is running and reachable.
    #[error("Network error: {0}")]
    Network(String),

    /// Query error (index or query syntax rejected by the engine).
    ///
    /// **Recovery:** Check the emitted command against the RediSearch docs.
    #[error("Query error: {0}")]
    Query(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for anything else.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a network error.
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Error::Network(msg.into())
    }

    /// Create a query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        Error::Query(msg.into())
    }

    /// Create a generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("bad URL");
        assert_eq!(err.to_string(), "Configuration error: bad URL");

        let err = Error::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = Error::query("unknown index");
        assert_eq!(err.to_string(), "Query error: unknown index");

        let err = Error::other("anything");
        assert_eq!(err.to_string(), "anything");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
