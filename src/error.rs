//! Error types for resumake library.

use std::io;
use thiserror::Error;

/// Result type alias for resumake operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering or exporting a résumé.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document-building capability could not be obtained.
    #[error("Export unavailable: {0}")]
    MissingCapability(String),

    /// A required field is empty at export or print time.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Stored data does not parse or does not match the record shape.
    #[error("Malformed persisted state: {0}")]
    MalformedPersistedState(String),

    /// The requested layout variant is not in the catalog.
    #[error("Unknown template: {0}")]
    UnknownVariant(String),

    /// The document builder rejected an operation.
    #[error("Export error: {0}")]
    Export(String),

    /// Error while writing the PDF object graph.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// A validation pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Error during rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Pdf(err.to_string())
    }
}

impl Error {
    /// Whether the error should be shown to the user as a dismissible notice.
    ///
    /// Persisted-state and variant errors are recovered locally and never
    /// reach the user.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            Error::MalformedPersistedState(_) | Error::UnknownVariant(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("full name is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: full name is required");

        let err = Error::UnknownVariant("template-99".to_string());
        assert_eq!(err.to_string(), "Unknown template: template-99");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_user_facing() {
        assert!(Error::MissingCapability("pdf".into()).is_user_facing());
        assert!(Error::InvalidInput("name".into()).is_user_facing());
        assert!(!Error::MalformedPersistedState("bad".into()).is_user_facing());
        assert!(!Error::UnknownVariant("x".into()).is_user_facing());
    }
}
