//! Rationale tagging for indexed citations.
//!
//! Each citation earns zero or more tags:
//! - `authority`: Wikipedia source, or host on the configured allow-list
//! - `recency`: fetched no longer ago than the freshness window
//! - `diversity`: host not shared with any higher-ranked citation
//!
//! Rank is the citation index, so the first citation is always diverse.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};

use crate::config::CitationConfig;
use super::dedup::DeduplicatedRecord;
use crate::types::{Citation, RationaleTag, SourceKind, SourceRecord};

/// Index merged records in order (1-based) and attach their rationale tags.
///
/// Authority considers every kind that reported a URL, not only the
/// first-seen one.
pub fn tag_citations(
    records: Vec<DeduplicatedRecord>,
    config: &CitationConfig,
    now: DateTime<Utc>,
) -> Vec<Citation> {
    let mut seen_hosts: HashSet<String> = HashSet::new();

    records
        .into_iter()
        .enumerate()
        .map(|(position, DeduplicatedRecord { record, kinds })| {
            let mut tags = BTreeSet::new();
            let host = record.host();

            if is_authoritative(&kinds, host.as_deref(), config) {
                tags.insert(RationaleTag::Authority);
            }
            if is_recent(&record, config, now) {
                tags.insert(RationaleTag::Recency);
            }
            if let Some(host) = host {
                if seen_hosts.insert(host) {
                    tags.insert(RationaleTag::Diversity);
                }
            }

            Citation {
                index: position + 1,
                record,
                rationale_tags: tags,
            }
        })
        .collect()
}

/// Wikipedia sources and allow-listed hosts are authoritative.
pub fn is_authoritative(kinds: &[SourceKind], host: Option<&str>, config: &CitationConfig) -> bool {
    kinds.contains(&SourceKind::Wikipedia) || host.is_some_and(|h| config.is_authority_host(h))
}

/// A record is recent when its age does not exceed the freshness window.
///
/// Timestamps in the future (clock skew between tools) count as recent.
pub fn is_recent(record: &SourceRecord, config: &CitationConfig, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(record.fetched_at) <= config.freshness_window()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn make_record(url: &str, kind: SourceKind, age_days: i64) -> SourceRecord {
        SourceRecord {
            url: url.to_string(),
            title: "Title".into(),
            snippet: String::new(),
            fetched_at: now() - TimeDelta::days(age_days),
            kind,
        }
    }

    fn singles(records: Vec<SourceRecord>) -> Vec<DeduplicatedRecord> {
        records
            .into_iter()
            .map(|record| DeduplicatedRecord {
                kinds: vec![record.kind],
                record,
            })
            .collect()
    }

    #[test]
    fn merged_wikipedia_kind_is_authority() {
        let config = CitationConfig {
            authority_domains: vec![],
            ..Default::default()
        };
        let record = make_record("https://en.wikipedia.org/wiki/Test", SourceKind::Search, 90);
        let merged = DeduplicatedRecord {
            kinds: vec![SourceKind::Search, SourceKind::Wikipedia],
            record: record.clone(),
        };
        let citations = tag_citations(vec![merged], &config, now());
        assert!(citations[0].has_tag(RationaleTag::Authority));

        let lone = tag_citations(singles(vec![record]), &config, now());
        assert!(!lone[0].has_tag(RationaleTag::Authority));
    }

    fn tags_of(citation: &Citation) -> Vec<RationaleTag> {
        citation.rationale_tags.iter().copied().collect()
    }

    #[test]
    fn indices_are_one_based_and_contiguous() {
        let citations = tag_citations(
            singles(vec![
                make_record("https://a.com/", SourceKind::Search, 0),
                make_record("https://b.com/", SourceKind::Search, 0),
                make_record("https://c.com/", SourceKind::Search, 0),
            ]),
            &CitationConfig::default(),
            now(),
        );
        let indices: Vec<usize> = citations.iter().map(|c| c.index).collect();
        assert_eq!(indices, [1, 2, 3]);
    }

    #[test]
    fn wikipedia_kind_is_authority() {
        let config = CitationConfig {
            authority_domains: vec![],
            ..Default::default()
        };
        let citations = tag_citations(
            singles(vec![make_record("https://en.wikipedia.org/wiki/Test", SourceKind::Wikipedia, 90)]),
            &config,
            now(),
        );
        assert!(citations[0].has_tag(RationaleTag::Authority));
    }

    #[test]
    fn allow_listed_host_is_authority() {
        let citations = tag_citations(
            singles(vec![
                make_record("https://www.nature.com/articles/x", SourceKind::Search, 90),
                make_record("https://blog.example.com/x", SourceKind::Search, 90),
            ]),
            &CitationConfig::default(),
            now(),
        );
        assert!(citations[0].has_tag(RationaleTag::Authority));
        assert!(!citations[1].has_tag(RationaleTag::Authority));
    }

    #[test]
    fn recency_boundary_is_inclusive() {
        let config = CitationConfig::default();
        assert!(is_recent(&make_record("https://a.com/", SourceKind::Search, 30), &config, now()));
        assert!(!is_recent(&make_record("https://a.com/", SourceKind::Search, 31), &config, now()));
    }

    #[test]
    fn future_timestamp_counts_as_recent() {
        let config = CitationConfig::default();
        assert!(is_recent(&make_record("https://a.com/", SourceKind::Search, -2), &config, now()));
    }

    #[test]
    fn first_citation_always_diverse() {
        let citations = tag_citations(
            singles(vec![make_record("https://a.com/", SourceKind::Search, 400)]),
            &CitationConfig::default(),
            now(),
        );
        assert_eq!(tags_of(&citations[0]), [RationaleTag::Diversity]);
    }

    #[test]
    fn repeated_host_loses_diversity() {
        let citations = tag_citations(
            singles(vec![
                make_record("https://example.com/a", SourceKind::Search, 400),
                make_record("https://www.example.com/b", SourceKind::Search, 400),
                make_record("https://other.com/c", SourceKind::Search, 400),
            ]),
            &CitationConfig::default(),
            now(),
        );
        assert!(citations[0].has_tag(RationaleTag::Diversity));
        assert!(!citations[1].has_tag(RationaleTag::Diversity));
        assert!(citations[2].has_tag(RationaleTag::Diversity));
    }

    #[test]
    fn subdomains_are_distinct_hosts() {
        let citations = tag_citations(
            singles(vec![
                make_record("https://en.wikipedia.org/wiki/A", SourceKind::Wikipedia, 0),
                make_record("https://de.wikipedia.org/wiki/A", SourceKind::Wikipedia, 0),
            ]),
            &CitationConfig::default(),
            now(),
        );
        assert!(citations[1].has_tag(RationaleTag::Diversity));
    }

    #[test]
    fn all_three_tags_in_order() {
        let citations = tag_citations(
            singles(vec![make_record("https://en.wikipedia.org/wiki/Test", SourceKind::Wikipedia, 1)]),
            &CitationConfig::default(),
            now(),
        );
        assert_eq!(
            tags_of(&citations[0]),
            [RationaleTag::Authority, RationaleTag::Recency, RationaleTag::Diversity]
        );
    }
}
