//! Error handling for herdview-store
//!
//! Wraps herdview-core ExError with store-specific helpers

use herdview_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a live feed / export decoding error
pub fn feed_error(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidFeed)
        .with_op("ingest")
        .with_message(reason.to_string())
}

/// Create a configuration error
pub fn config_error(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("config_load")
        .with_message(reason.to_string())
}

/// Create a persistence error
pub fn persistence_error(operation: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(operation.to_string())
        .with_message(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_carry_kind_and_op() {
        let err = feed_error("animals is not an array");
        assert_eq!(err.kind(), ExErrorKind::InvalidFeed);
        assert_eq!(err.op(), Some("ingest"));

        let err = persistence_error("snapshot_save", "disk full");
        assert_eq!(err.code(), "ERR_PERSISTENCE");
        assert!(err.to_string().contains("snapshot_save"));
    }

    #[test]
    fn test_io_error_keeps_source_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = io_error("read_feed", io);
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert!(err.message().contains("no such file"));
    }
}
