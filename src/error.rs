//! Error types for the citemint host.

use citemint_sources::SourceError;

/// Top-level error type for research sessions, config and exports.
#[derive(Debug, thiserror::Error)]
pub enum CiteMintError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Citation pipeline error.
    #[error("sources error: {0}")]
    Sources(#[from] SourceError),

    /// The research capability failed or was given an unusable request.
    #[error("research error: {0}")]
    Research(String),

    /// Writing an export failed for a reason other than I/O.
    #[error("export error: {0}")]
    Export(String),

    /// JSON (de)serialisation error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CiteMintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_research() {
        let err = CiteMintError::Research("query must not be empty".into());
        assert_eq!(err.to_string(), "research error: query must not be empty");
    }

    #[test]
    fn source_error_converts() {
        let err: CiteMintError = SourceError::Config("bad window".into()).into();
        assert_eq!(err.to_string(), "sources error: config error: bad window");
    }

    #[test]
    fn io_error_converts() {
        let err: CiteMintError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CiteMintError>();
    }
}
