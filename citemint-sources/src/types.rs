//! Core types: raw tool outputs, normalised source records, and citations.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

/// Which tool produced a piece of evidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A web search hit (title, link, snippet).
    #[default]
    Search,
    /// A Wikipedia page summary.
    Wikipedia,
    /// An arbitrary page fetched by URL.
    FetchedPage,
}

impl SourceKind {
    /// Returns the snake_case name used in JSON and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Wikipedia => "wikipedia",
            Self::FetchedPage => "fetched_page",
        }
    }

    /// Returns all kinds in declaration order.
    pub fn all() -> &'static [SourceKind] {
        &[Self::Search, Self::Wikipedia, Self::FetchedPage]
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One tool result as it arrives from an external collaborator.
///
/// Every field except `kind` is optional here; the collector decides what is
/// usable. Field aliases cover the shapes the search, Wikipedia and fetch
/// tools emit (`link`/`href` for the URL, `text`/`body` for the snippet,
/// `timestamp` for the fetch time).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawToolOutput {
    /// Origin of this output.
    pub kind: SourceKind,
    /// Page URL as reported by the tool.
    #[serde(default, alias = "link", alias = "href")]
    pub url: Option<String>,
    /// Page title as reported by the tool.
    #[serde(default)]
    pub title: Option<String>,
    /// Snippet or body text.
    #[serde(default, alias = "text", alias = "body")]
    pub snippet: Option<String>,
    /// When the tool fetched this evidence.
    ///
    /// Read leniently: RFC 3339, or a naive `YYYY-mm-dd HH:MM:SS` taken as
    /// UTC. Anything else is treated as absent.
    #[serde(default, alias = "timestamp", deserialize_with = "lenient_timestamp")]
    pub fetched_at: Option<DateTime<Utc>>,
    /// Raw HTML body, for fetched pages that were not cleaned upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl RawToolOutput {
    /// A search hit.
    pub fn search(
        url: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            kind: SourceKind::Search,
            url: Some(url.into()),
            title: Some(title.into()),
            snippet: Some(snippet.into()),
            ..Default::default()
        }
    }

    /// A Wikipedia page summary.
    pub fn wikipedia(
        url: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            kind: SourceKind::Wikipedia,
            url: Some(url.into()),
            title: Some(title.into()),
            snippet: Some(snippet.into()),
            ..Default::default()
        }
    }

    /// A fetched page whose title and text will be extracted from `html`.
    pub fn fetched_page(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::FetchedPage,
            url: Some(url.into()),
            html: Some(html.into()),
            ..Default::default()
        }
    }

    /// Sets the fetch timestamp.
    #[must_use]
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = Some(fetched_at);
        self
    }
}

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a tool timestamp: RFC 3339 first, then the naive formats as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match &value {
        Some(serde_json::Value::String(raw)) => parse_timestamp(raw),
        _ => None,
    };
    if parsed.is_none() && value.as_ref().is_some_and(|v| !v.is_null()) {
        tracing::debug!("ignoring unreadable fetched_at");
    }
    Ok(parsed)
}

/// Normalised representation of one piece of external evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Normalised URL; the deduplication key.
    pub url: String,
    /// Page title.
    pub title: String,
    /// Snippet or extracted body text (may be empty).
    pub snippet: String,
    /// When the evidence was fetched.
    pub fetched_at: DateTime<Utc>,
    /// Which tool produced it.
    pub kind: SourceKind,
}

impl SourceRecord {
    /// Host of the normalised URL with any leading `www.` removed.
    ///
    /// Used for diversity comparison and authority matching.
    pub fn host(&self) -> Option<String> {
        let parsed = Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?.to_ascii_lowercase();
        Some(match host.strip_prefix("www.") {
            Some(rest) => rest.to_owned(),
            None => host,
        })
    }
}

/// Why a citation was included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RationaleTag {
    /// Wikipedia or a configured reference domain.
    Authority,
    /// Fetched within the freshness window.
    Recency,
    /// Host not seen among higher-ranked citations.
    Diversity,
}

impl RationaleTag {
    /// Returns the lowercase tag name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Authority => "authority",
            Self::Recency => "recency",
            Self::Diversity => "diversity",
        }
    }

    /// Returns all tags in ranking order.
    pub fn all() -> &'static [RationaleTag] {
        &[Self::Authority, Self::Recency, Self::Diversity]
    }
}

impl fmt::Display for RationaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A deduplicated, indexed reference surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    /// 1-based position in first-seen order.
    pub index: usize,
    /// The merged source record.
    pub record: SourceRecord,
    /// Rationale tags, kept in [`RationaleTag`] order.
    pub rationale_tags: BTreeSet<RationaleTag>,
}

impl Citation {
    /// Returns `true` if this citation carries `tag`.
    pub fn has_tag(&self, tag: RationaleTag) -> bool {
        self.rationale_tags.contains(&tag)
    }
}
