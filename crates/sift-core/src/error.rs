//! Error types for sift.

use thiserror::Error;

/// Result type alias using sift's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for sift operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Index build was given zero catalog entries (fatal at startup)
    #[error("Empty catalog: no assessments to index")]
    EmptyCatalog,

    /// Catalog entry vectors disagree in dimension (fatal at startup)
    #[error("Dimension mismatch: expected {expected}, found {found} for entry {id}")]
    DimensionMismatch {
        expected: usize,
        found: usize,
        id: String,
    },

    /// Malformed catalog source data
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Embedding provider failed or is unreachable
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Embedding(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_empty_catalog() {
        let err = Error::EmptyCatalog;
        assert_eq!(err.to_string(), "Empty catalog: no assessments to index");
    }

    #[test]
    fn test_error_display_dimension_mismatch() {
        let err = Error::DimensionMismatch {
            expected: 384,
            found: 768,
            id: "verify-numerical".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected 384, found 768 for entry verify-numerical"
        );
    }

    #[test]
    fn test_error_display_catalog() {
        let err = Error::Catalog("duplicate id".to_string());
        assert_eq!(err.to_string(), "Catalog error: duplicate id");
    }

    #[test]
    fn test_error_display_embedding() {
        let err = Error::Embedding("backend unreachable".to_string());
        assert_eq!(err.to_string(), "Embedding error: backend unreachable");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing CATALOG_PATH".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing CATALOG_PATH");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("negative max_results".to_string());
        assert_eq!(err.to_string(), "Invalid input: negative max_results");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => {
                assert!(!msg.is_empty());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }
}
