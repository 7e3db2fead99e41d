//! Source deduplication by normalised URL.
//!
//! Records sharing a URL are merged into the first-seen one. A later
//! duplicate only contributes its snippet, and only when that snippet is
//! strictly longer. The set of tool kinds that reported each URL is kept for
//! the coverage summary.

use std::collections::HashMap;

use crate::types::{SourceKind, SourceRecord};

/// A source record after deduplication, with every kind that reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeduplicatedRecord {
    /// The first-seen record, possibly with a merged snippet.
    pub record: SourceRecord,
    /// Tool kinds that returned this URL, in first-seen order.
    pub kinds: Vec<SourceKind>,
}

/// Deduplicate records by their (already normalised) URL.
///
/// Output order is the first-seen order of each distinct URL.
pub fn deduplicate(records: Vec<SourceRecord>) -> Vec<DeduplicatedRecord> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<DeduplicatedRecord> = Vec::new();

    for record in records {
        match positions.get(&record.url).copied() {
            Some(position) => {
                let existing = &mut merged[position];
                if !existing.kinds.contains(&record.kind) {
                    existing.kinds.push(record.kind);
                }
                if snippet_len(&record.snippet) > snippet_len(&existing.record.snippet) {
                    tracing::debug!(url = %record.url, "adopting longer snippet from duplicate");
                    existing.record.snippet = record.snippet;
                }
            }
            None => {
                positions.insert(record.url.clone(), merged.len());
                merged.push(DeduplicatedRecord {
                    kinds: vec![record.kind],
                    record,
                });
            }
        }
    }

    merged
}

fn snippet_len(snippet: &str) -> usize {
    snippet.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn make_record(url: &str, kind: SourceKind, title: &str, snippet: &str) -> SourceRecord {
        SourceRecord {
            url: url.to_string(),
            title: title.to_string(),
            snippet: snippet.to_string(),
            fetched_at: DateTime::<Utc>::UNIX_EPOCH,
            kind,
        }
    }

    #[test]
    fn unique_urls_pass_through_in_order() {
        let deduped = deduplicate(vec![
            make_record("https://b.com/", SourceKind::Search, "B", ""),
            make_record("https://a.com/", SourceKind::Search, "A", ""),
        ]);
        let urls: Vec<&str> = deduped.iter().map(|d| d.record.url.as_str()).collect();
        assert_eq!(urls, ["https://b.com/", "https://a.com/"]);
    }

    #[test]
    fn duplicate_keeps_first_record() {
        let deduped = deduplicate(vec![
            make_record("https://a.com/", SourceKind::Wikipedia, "First", "short"),
            make_record("https://a.com/", SourceKind::Search, "Second", "tiny"),
        ]);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].record.title, "First");
        assert_eq!(deduped[0].record.kind, SourceKind::Wikipedia);
        assert_eq!(deduped[0].record.snippet, "short");
    }

    #[test]
    fn longer_later_snippet_is_merged() {
        let deduped = deduplicate(vec![
            make_record("https://a.com/", SourceKind::Search, "First", "short"),
            make_record("https://a.com/", SourceKind::FetchedPage, "Second", "a much longer body"),
        ]);
        assert_eq!(deduped[0].record.title, "First");
        assert_eq!(deduped[0].record.snippet, "a much longer body");
    }

    #[test]
    fn equal_length_snippet_keeps_first() {
        let deduped = deduplicate(vec![
            make_record("https://a.com/", SourceKind::Search, "First", "abcde"),
            make_record("https://a.com/", SourceKind::Search, "Second", "vwxyz"),
        ]);
        assert_eq!(deduped[0].record.snippet, "abcde");
    }

    #[test]
    fn snippet_length_counts_chars_not_bytes() {
        let deduped = deduplicate(vec![
            make_record("https://a.com/", SourceKind::Search, "First", "abcd"),
            make_record("https://a.com/", SourceKind::Search, "Second", "ééé"),
        ]);
        assert_eq!(deduped[0].record.snippet, "abcd");
    }

    #[test]
    fn kinds_track_all_contributors_once() {
        let deduped = deduplicate(vec![
            make_record("https://a.com/", SourceKind::Wikipedia, "A", ""),
            make_record("https://a.com/", SourceKind::Search, "A", ""),
            make_record("https://a.com/", SourceKind::Search, "A", ""),
        ]);
        assert_eq!(deduped[0].kinds, [SourceKind::Wikipedia, SourceKind::Search]);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(deduplicate(vec![]).is_empty());
    }
}
