//! All error types for the stringsgen crate.
//!
//! Placeholder parsing and rendering never fail; these are returned from
//! reading resource files, parsing configuration values and validated builds.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The resource file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The resource file content is not valid text in its detected encoding.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid indentation `{0}` (expected `tab`, `spaces:N` or `N`)")]
    InvalidIndentation(String),

    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Creates a new validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Returns `true` when the error comes from reading or decoding a file.
    pub fn is_file_read_error(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Decode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
        assert!(error.is_file_read_error());
    }

    #[test]
    fn test_decode_error() {
        let error = Error::Decode("input is not valid UTF-16LE".to_string());
        assert_eq!(error.to_string(), "decode error: input is not valid UTF-16LE");
        assert!(error.is_file_read_error());
    }

    #[test]
    fn test_invalid_indentation_error() {
        let error = Error::InvalidIndentation("three".to_string());
        assert_eq!(
            error.to_string(),
            "invalid indentation `three` (expected `tab`, `spaces:N` or `N`)"
        );
        assert!(!error.is_file_read_error());
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation_error("duplicate key `Title`");
        assert_eq!(error.to_string(), "validation error: duplicate key `Title`");
    }
}
