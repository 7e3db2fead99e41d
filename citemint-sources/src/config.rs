//! Citation configuration with sensible defaults.
//!
//! [`CitationConfig`] holds the integrator-supplied values the ranker needs:
//! which domains count as authoritative references, how recent a fetch must
//! be to count as fresh, and how much fetched page text to keep.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Reference domains tagged `authority` unless overridden.
///
/// Entries match the host exactly or as a parent domain; entries starting
/// with a dot are suffix rules.
const DEFAULT_AUTHORITY_DOMAINS: &[&str] = &[
    "wikipedia.org",
    "britannica.com",
    "nature.com",
    "science.org",
    "nih.gov",
    "who.int",
    "arxiv.org",
    "reuters.com",
    "apnews.com",
    ".gov",
    ".edu",
];

/// Configuration for collecting and ranking sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationConfig {
    /// Hosts treated as known reference sources.
    pub authority_domains: Vec<String>,
    /// A source fetched within this many days is tagged `recency`.
    pub freshness_window_days: u32,
    /// Maximum characters of extracted text kept from a fetched page.
    pub max_snippet_chars: usize,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            authority_domains: DEFAULT_AUTHORITY_DOMAINS
                .iter()
                .map(|d| (*d).to_owned())
                .collect(),
            freshness_window_days: 30,
            max_snippet_chars: 8_000,
        }
    }
}

impl CitationConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `freshness_window_days` must be greater than 0
    /// - `max_snippet_chars` must be greater than 0
    /// - `authority_domains` entries must not be blank or a bare `.`
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.freshness_window_days == 0 {
            return Err(SourceError::Config(
                "freshness_window_days must be greater than 0".into(),
            ));
        }
        if self.max_snippet_chars == 0 {
            return Err(SourceError::Config(
                "max_snippet_chars must be greater than 0".into(),
            ));
        }
        if let Some(bad) = self
            .authority_domains
            .iter()
            .find(|d| d.trim().trim_start_matches('.').is_empty())
        {
            return Err(SourceError::Config(format!(
                "authority_domains entry {bad:?} is empty"
            )));
        }
        Ok(())
    }

    /// The freshness window as a duration.
    pub fn freshness_window(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.freshness_window_days))
    }

    /// Returns `true` if `host` matches an authority domain entry.
    ///
    /// `host` is compared case-insensitively. A plain entry matches the host
    /// itself or any subdomain of it; a dotted entry (`.gov`) matches any host
    /// ending with it.
    pub fn is_authority_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.authority_domains.iter().any(|entry| {
            let entry = entry.trim().to_ascii_lowercase();
            if entry.starts_with('.') {
                host.ends_with(&entry)
            } else {
                host == entry || host.ends_with(&format!(".{entry}"))
            }
        })
    }
}
