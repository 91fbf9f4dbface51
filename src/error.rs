//! Unified error types for svgview
//!
//! Read failures never escape the preview control; they are turned into a
//! warning banner. These types exist so the reader, config loader and host
//! can report what went wrong.

/// Unified error type for svgview operations
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// I/O errors raised by an underlying reader
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream provider broke the pull-read contract or reported a failure
    #[error("Stream error: {0}")]
    Stream(String),

    /// The document exceeded the configured size cap
    #[error("Document too large: more than {limit} bytes")]
    TooLarge { limit: usize },

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using PreviewError
pub type Result<T> = std::result::Result<T, PreviewError>;

impl PreviewError {
    /// Create a Stream error
    pub fn stream(msg: impl Into<String>) -> Self {
        Self::Stream(msg.into())
    }

    /// Create a TooLarge error
    pub fn too_large(limit: usize) -> Self {
        Self::TooLarge { limit }
    }

    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an Internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PreviewError::stream("provider returned E_FAIL");
        assert_eq!(format!("{}", err), "Stream error: provider returned E_FAIL");

        let err = PreviewError::too_large(1024);
        assert_eq!(
            format!("{}", err),
            "Document too large: more than 1024 bytes"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: PreviewError = io_err.into();
        assert!(matches!(err, PreviewError::Io(_)));
    }
}
