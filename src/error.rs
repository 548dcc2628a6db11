//! Dashboard error types
//!
//! Defines the errors that can occur while decoding stream frames and
//! projecting events onto the dashboard.

use thiserror::Error;

/// Errors that can occur in the dashboard core
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Timestamp could not be turned into an hour-of-day
    #[error("Invalid timestamp {timestamp:?}: {reason}")]
    InvalidTimestamp { timestamp: String, reason: String },

    /// Frame decoded as JSON but does not follow the stream envelope
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Frame or payload is not valid JSON for the expected shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A rendering anchor the dashboard depends on does not exist
    #[error("Missing rendering anchor: {0}")]
    MissingAnchor(String),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The consumer task is gone
    #[error("Stream closed: {0}")]
    StreamClosed(String),
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::InvalidTimestamp {
            timestamp: "yesterday".to_string(),
            reason: "unrecognised format".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid timestamp \"yesterday\": unrecognised format"
        );

        let err = DashboardError::MissingAnchor("hourly-chart".to_string());
        assert_eq!(err.to_string(), "Missing rendering anchor: hourly-chart");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Serialization(_)));
    }
}
