//! Source collector: turns raw tool outputs into normalised source records.
//!
//! Outputs are validated one at a time. A malformed output (no URL, an
//! unusable URL, or no title) is logged and dropped; the rest of the batch
//! carries on in first-seen order.

pub mod content;
pub mod payload;
pub mod url_normalize;

use chrono::{DateTime, Utc};

use crate::config::CitationConfig;
use crate::error::SourceError;
use crate::types::{RawToolOutput, SourceRecord};

use content::extract_page;
use url_normalize::normalize_url;

/// Collect raw tool outputs into source records, preserving input order.
///
/// `now` stands in for any missing `fetched_at`. Malformed outputs are
/// dropped with a warning that names their position and the reason.
pub fn collect(
    outputs: impl IntoIterator<Item = RawToolOutput>,
    config: &CitationConfig,
    now: DateTime<Utc>,
) -> Vec<SourceRecord> {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (position, output) in outputs.into_iter().enumerate() {
        let kind = output.kind;
        match validate_output(output, config, now) {
            Ok(record) => records.push(record),
            Err(err) => {
                dropped += 1;
                tracing::warn!(position, %kind, reason = %err, "dropping tool output");
            }
        }
    }

    tracing::debug!(kept = records.len(), dropped, "collected sources");
    records
}

/// Validate and normalise a single raw tool output.
///
/// Fetched-page HTML, when present, fills in a missing title and snippet.
///
/// # Errors
///
/// Returns [`SourceError::MissingUrl`], [`SourceError::InvalidUrl`] or
/// [`SourceError::MissingTitle`] for outputs the collector must drop.
pub fn validate_output(
    output: RawToolOutput,
    config: &CitationConfig,
    now: DateTime<Utc>,
) -> Result<SourceRecord, SourceError> {
    let RawToolOutput {
        kind,
        url,
        title,
        snippet,
        fetched_at,
        html,
    } = output;

    let url = normalize_url(url.as_deref().unwrap_or_default())?;

    let extracted = html.as_deref().map(|h| extract_page(h, config.max_snippet_chars));
    let title = non_blank(title)
        .or_else(|| extracted.as_ref().and_then(|page| page.title.clone()))
        .ok_or(SourceError::MissingTitle)?;
    let snippet = non_blank(snippet)
        .or_else(|| extracted.map(|page| page.text))
        .unwrap_or_default();

    Ok(SourceRecord {
        url,
        title,
        snippet,
        fetched_at: fetched_at.unwrap_or(now),
        kind,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
