//! The sourcing report and its JSON / Markdown renderings.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::error::{Result, SourceError};
use crate::types::{Citation, RationaleTag, SourceKind};

/// Deduplicated citations plus the derived rationale and freshness text.
///
/// Built once per query by [`crate::ranker::build_report`] and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    citations: Vec<Citation>,
    why_these_sources: Vec<String>,
    freshness_notes: String,
}

impl Report {
    pub(crate) fn new(
        citations: Vec<Citation>,
        why_these_sources: Vec<String>,
        freshness_notes: String,
    ) -> Self {
        Self {
            citations,
            why_these_sources,
            freshness_notes,
        }
    }

    /// Citations in index order.
    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    /// The 2-3 "why these sources" bullets (one bullet for an empty report).
    pub fn why_these_sources(&self) -> &[String] {
        &self.why_these_sources
    }

    /// Human-readable freshness summary.
    pub fn freshness_notes(&self) -> &str {
        &self.freshness_notes
    }

    /// Number of citations.
    pub fn len(&self) -> usize {
        self.citations.len()
    }

    /// Returns `true` if no sources survived collection.
    pub fn is_empty(&self) -> bool {
        self.citations.is_empty()
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Serialization`] if serialisation fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SourceError::Serialization(e.to_string()))
    }

    /// Markdown: numbered sources with tag annotations, the bullets, then
    /// the freshness paragraph.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("## Sources\n\n");
        if self.citations.is_empty() {
            out.push_str("No sources returned.\n");
        }
        for citation in &self.citations {
            let _ = write!(
                out,
                "{}. [{}]({})",
                citation.index,
                escape_link_text(&citation.record.title),
                escape_link_target(&citation.record.url)
            );
            if !citation.rationale_tags.is_empty() {
                let tags: Vec<&str> = citation.rationale_tags.iter().map(RationaleTag::name).collect();
                let _ = write!(out, " _({})_", tags.join(", "));
            }
            out.push('\n');
        }

        out.push_str("\n## Why these sources\n\n");
        for bullet in &self.why_these_sources {
            let _ = writeln!(out, "- {bullet}");
        }

        out.push_str("\n## Freshness\n\n");
        out.push_str(&self.freshness_notes);
        out.push('\n');
        out
    }
}

#[derive(Serialize)]
struct ReportView<'a> {
    citations: Vec<CitationView<'a>>,
    why_these_sources: &'a [String],
    freshness_notes: &'a str,
}

#[derive(Serialize)]
struct CitationView<'a> {
    index: usize,
    url: &'a str,
    title: &'a str,
    kind: SourceKind,
    snippet: &'a str,
    fetched_at: DateTime<Utc>,
    tags: Vec<RationaleTag>,
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ReportView {
            citations: self
                .citations
                .iter()
                .map(|c| CitationView {
                    index: c.index,
                    url: &c.record.url,
                    title: &c.record.title,
                    kind: c.record.kind,
                    snippet: &c.record.snippet,
                    fetched_at: c.record.fetched_at,
                    tags: c.rationale_tags.iter().copied().collect(),
                })
                .collect(),
            why_these_sources: &self.why_these_sources,
            freshness_notes: &self.freshness_notes,
        }
        .serialize(serializer)
    }
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

fn escape_link_target(url: &str) -> String {
    url.replace('(', "%28").replace(')', "%29").replace(' ', "%20")
}
