//! # citemint-sources
//!
//! Turns the raw outputs of research tools (web search hits, Wikipedia
//! summaries, fetched pages) into a deduplicated, indexed citation list with
//! "why these sources" bullets and freshness notes.
//!
//! ## Design
//!
//! - **Collector** ([`collector`]): validates each tool output into a
//!   [`SourceRecord`], normalising its URL. Malformed outputs are logged and
//!   dropped; they never abort a batch.
//! - **Ranker** ([`ranker`]): merges records by normalised URL, assigns
//!   stable 1-based indices, tags authority / recency / diversity, and builds
//!   the [`Report`].
//! - **Rendering** ([`report`]): JSON and Markdown views of a report.
//!
//! The pipeline is synchronous and does no I/O. The current time is an
//! explicit argument so that identical inputs always yield identical reports.

pub mod collector;
pub mod config;
pub mod error;
pub mod ranker;
pub mod report;
pub mod types;

use chrono::{DateTime, Utc};

pub use collector::payload::{parse_raw_outputs, parse_search_payload, parse_wikipedia_text};
pub use collector::{collect, validate_output};
pub use config::CitationConfig;
pub use error::{Result, SourceError};
pub use ranker::build_report;
pub use report::Report;
pub use types::{Citation, RationaleTag, RawToolOutput, SourceKind, SourceRecord};

/// Collect raw tool outputs and build their report in one step.
///
/// # Errors
///
/// Returns [`SourceError::Config`] if `config` is invalid. Malformed outputs
/// and empty input are not errors.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use citemint_sources::{CitationConfig, RawToolOutput, build_report_from_outputs};
///
/// let outputs = vec![
///     RawToolOutput::wikipedia("https://en.wikipedia.org/wiki/Test", "Test", ""),
///     RawToolOutput::search("https://En.Wikipedia.org/wiki/Test/", "Test dup", ""),
/// ];
/// let report = build_report_from_outputs(outputs, &CitationConfig::default(), Utc::now())?;
/// assert_eq!(report.len(), 1);
/// # Ok::<(), citemint_sources::SourceError>(())
/// ```
pub fn build_report_from_outputs(
    outputs: impl IntoIterator<Item = RawToolOutput>,
    config: &CitationConfig,
    now: DateTime<Utc>,
) -> Result<Report> {
    config.validate()?;
    let records = collect(outputs, config, now);
    Ok(build_report(records, config, now))
}
