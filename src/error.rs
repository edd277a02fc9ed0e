//! Error types for blockdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for blockdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the input and output boundaries.
///
/// Decoding a JSON value into a [`Document`](crate::Document) and rendering
/// it into a [`Node`](crate::render::Node) tree never fail; malformed blocks
/// are contained by the renderer. These errors only surface while reading
/// raw input or serializing output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is JSON but not a document shape.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Error during output serialization (HTML, Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDocument("expected object or array, found string".into());
        assert_eq!(
            err.to_string(),
            "Invalid document: expected object or array, found string"
        );

        let err = Error::Render("bad".into());
        assert_eq!(err.to_string(), "Rendering error: bad");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
