//! Citation deduplicator and ranker: records in, [`Report`] out.
//!
//! Deduplicates by normalised URL, indexes citations in first-seen order,
//! tags each with its rationale, and derives the bullets and freshness notes.

pub mod dedup;
pub mod notes;
pub mod tagging;

use chrono::{DateTime, Utc};

use crate::config::CitationConfig;
use crate::report::Report;
use crate::types::{SourceKind, SourceRecord};

use dedup::deduplicate;
use notes::{freshness_notes, why_these_sources};
use tagging::tag_citations;

/// Build the report for one query from collected source records.
///
/// # Pipeline
///
/// 1. Merge records sharing a normalised URL (first seen wins)
/// 2. Assign indices 1..N in first-seen order
/// 3. Tag authority, recency and diversity
/// 4. Derive the why-bullets and freshness notes
///
/// Never fails: an empty input produces a zero-citation report whose single
/// bullet says no sources were found. Output depends only on the inputs,
/// so repeated calls with the same arguments produce equal reports.
pub fn build_report(
    records: Vec<SourceRecord>,
    config: &CitationConfig,
    now: DateTime<Utc>,
) -> Report {
    let deduped = deduplicate(records);

    let mut kinds: Vec<SourceKind> = Vec::new();
    for kind in deduped.iter().flat_map(|d| d.kinds.iter().copied()) {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    let citations = tag_citations(deduped, config, now);
    tracing::debug!(citations = citations.len(), "built citation list");

    let bullets = why_these_sources(&citations, &kinds, config.freshness_window_days);
    let freshness = freshness_notes(&citations, config.freshness_window_days);

    Report::new(citations, bullets, freshness)
}
