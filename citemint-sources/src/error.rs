//! Error types for the citemint-sources crate.
//!
//! Malformed tool outputs are reported through [`SourceError`] by the
//! per-item validation step, but the collector never lets them escape a
//! batch: they are logged and dropped. An empty batch is not an error at
//! all; it produces a zero-citation report.

/// Errors that can occur while turning tool outputs into citations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// A tool output carried no URL (or only whitespace).
    #[error("malformed source: missing url")]
    MissingUrl,

    /// A tool output carried no title and none could be extracted.
    #[error("malformed source: missing title")]
    MissingTitle,

    /// The URL could not be parsed or does not use http/https.
    #[error("malformed source: invalid url: {0}")]
    InvalidUrl(String),

    /// Invalid citation configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A tool payload or report could not be (de)serialised.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SourceError {
    /// Returns `true` for the errors the collector drops instead of surfacing.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MissingUrl | Self::MissingTitle | Self::InvalidUrl(_)
        )
    }
}

/// Convenience type alias for citemint-sources results.
pub type Result<T> = std::result::Result<T, SourceError>;
