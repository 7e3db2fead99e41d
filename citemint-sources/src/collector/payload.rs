//! Adapters for the payload shapes the research tools actually emit.
//!
//! The search tool returns a JSON list of `{title, link, snippet}` objects,
//! the Wikipedia tool returns plain text blocks of the form
//! `Page: <title>\nSummary: <text>`, and a recorded transcript stores a JSON
//! list of [`RawToolOutput`] values directly. Each adapter produces raw
//! outputs only; validation stays in the collector so that placeholder items
//! (for example a search tool error with an empty link) are dropped and
//! logged in one place.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use url::Url;

use crate::error::SourceError;
use crate::types::{RawToolOutput, SourceKind};

const WIKIPEDIA_BASE: &str = "https://en.wikipedia.org/wiki/";
const PAGE_PREFIX: &str = "Page:";
const SUMMARY_PREFIX: &str = "Summary:";

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "href", alias = "url")]
    link: Option<String>,
    #[serde(default, alias = "body")]
    snippet: Option<String>,
}

/// Parse the search tool's JSON list of `{title, link, snippet}` hits.
///
/// # Errors
///
/// Returns [`SourceError::Serialization`] if `json` is not a list of objects.
pub fn parse_search_payload(json: &str) -> Result<Vec<RawToolOutput>, SourceError> {
    let hits: Vec<SearchHit> = serde_json::from_str(json)
        .map_err(|e| SourceError::Serialization(format!("search payload: {e}")))?;
    Ok(hits
        .into_iter()
        .map(|hit| RawToolOutput {
            kind: SourceKind::Search,
            url: hit.link,
            title: hit.title,
            snippet: hit.snippet,
            ..Default::default()
        })
        .collect())
}

/// Parse a JSON list of [`RawToolOutput`] values (mixed kinds).
///
/// Elements are converted one at a time; an element that does not fit the
/// shape (unknown `kind`, a non-string URL) is dropped and logged at warn
/// level with its position, and the rest of the list survives.
///
/// # Errors
///
/// Returns [`SourceError::Serialization`] if `json` is not a JSON list.
pub fn parse_raw_outputs(json: &str) -> Result<Vec<RawToolOutput>, SourceError> {
    let items: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| SourceError::Serialization(format!("tool outputs: {e}")))?;
    Ok(raw_outputs_from_values(items))
}

/// Convert already-parsed JSON values into raw outputs, dropping the ones
/// that do not fit.
pub fn raw_outputs_from_values(items: Vec<Value>) -> Vec<RawToolOutput> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match serde_json::from_value(item) {
            Ok(output) => Some(output),
            Err(err) => {
                tracing::warn!(position, reason = %err, "dropping unreadable tool output");
                None
            }
        })
        .collect()
}

/// Serde adapter for a list of raw outputs embedded in a larger document.
///
/// Use as `#[serde(deserialize_with = "...")]`; the list must be a list,
/// but its elements are read with [`raw_outputs_from_values`].
///
/// # Errors
///
/// Fails only if the field is not a list.
pub fn deserialize_tool_outputs<'de, D>(deserializer: D) -> Result<Vec<RawToolOutput>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw_outputs_from_values(items))
}

/// Parse the Wikipedia tool's text output into one output per page.
///
/// Text that contains no `Page:` line (such as the tool's "no good result"
/// message) yields an empty list. Summary continuation lines are joined with
/// newlines.
pub fn parse_wikipedia_text(text: &str) -> Vec<RawToolOutput> {
    let mut pages: Vec<(String, Vec<String>)> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(title) = trimmed.strip_prefix(PAGE_PREFIX) {
            pages.push((title.trim().to_owned(), Vec::new()));
        } else if let Some((_, summary)) = pages.last_mut() {
            let content = trimmed
                .strip_prefix(SUMMARY_PREFIX)
                .map_or(trimmed, str::trim_start);
            summary.push(content.to_owned());
        }
    }

    pages
        .into_iter()
        .map(|(title, summary)| {
            let snippet = summary.join("\n").trim().to_owned();
            let url = if title.is_empty() {
                None
            } else {
                wikipedia_url(&title)
            };
            RawToolOutput {
                kind: SourceKind::Wikipedia,
                url,
                title: Some(title),
                snippet: Some(snippet),
                ..Default::default()
            }
        })
        .collect()
}

/// Build the English Wikipedia URL for an article title.
///
/// Path segments are encoded by the `url` crate, the same way a parsed
/// search-hit link is, so both routes to one article normalise alike.
/// Slashes in the title stay path separators, as on Wikipedia.
pub fn wikipedia_url(title: &str) -> Option<String> {
    let slug = title.trim().replace(' ', "_");
    if slug.is_empty() {
        return None;
    }
    let mut url = Url::parse(WIKIPEDIA_BASE).ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(slug.split('/'));
    Some(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_payload_maps_links() {
        let json = r#"[
            {"title": "Rust", "link": "https://rust-lang.org", "snippet": "A language"},
            {"title": "Crates", "href": "https://crates.io", "body": "Registry"}
        ]"#;
        let outputs = parse_search_payload(json).expect("parse");
        assert_eq!(outputs.len(), 2);
        assert!(outputs.iter().all(|o| o.kind == SourceKind::Search));
        assert_eq!(outputs[0].url.as_deref(), Some("https://rust-lang.org"));
        assert_eq!(outputs[1].url.as_deref(), Some("https://crates.io"));
        assert_eq!(outputs[1].snippet.as_deref(), Some("Registry"));
    }

    #[test]
    fn search_payload_keeps_error_placeholders_for_collector() {
        let json = r#"[{"title": "", "link": "", "snippet": "ERROR: Search timed out after 8s"}]"#;
        let outputs = parse_search_payload(json).expect("parse");
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].url.as_deref(), Some(""));
    }

    #[test]
    fn search_payload_rejects_non_list() {
        let err = parse_search_payload(r#"{"title": "x"}"#).unwrap_err();
        assert!(matches!(err, SourceError::Serialization(_)));
    }

    #[test]
    fn raw_outputs_parse_mixed_kinds() {
        let json = r#"[
            {"kind": "wikipedia", "url": "https://en.wikipedia.org/wiki/Rust", "title": "Rust"},
            {"kind": "fetched_page", "url": "https://blog.example.com", "html": "<title>Blog</title>"}
        ]"#;
        let outputs = parse_raw_outputs(json).expect("parse");
        assert_eq!(outputs[0].kind, SourceKind::Wikipedia);
        assert_eq!(outputs[1].kind, SourceKind::FetchedPage);
        assert!(outputs[1].html.is_some());
    }

    #[test]
    fn raw_outputs_drop_unreadable_items_only() {
        let json = r#"[
            {"kind": "search", "url": "https://a.com", "title": "A"},
            {"kind": "podcast", "url": "https://p.com", "title": "P"},
            {"kind": "search", "url": 42, "title": "Numeric"},
            {"kind": "search", "url": "https://b.com", "title": "B"}
        ]"#;
        let outputs = parse_raw_outputs(json).expect("parse");
        let urls: Vec<_> = outputs.iter().map(|o| o.url.as_deref()).collect();
        assert_eq!(urls, [Some("https://a.com"), Some("https://b.com")]);
    }

    #[test]
    fn raw_outputs_accept_naive_timestamps() {
        let json = r#"[
            {"kind": "search", "url": "https://a.com", "title": "A"},
            {"kind": "search", "url": "https://b.com", "title": "B", "timestamp": "2026-10-16 09:30:00"}
        ]"#;
        let outputs = parse_raw_outputs(json).expect("parse");
        assert_eq!(outputs.len(), 2);
        assert!(outputs[0].fetched_at.is_none());
        assert_eq!(
            outputs[1].fetched_at.map(|t| t.to_rfc3339()),
            Some("2026-10-16T09:30:00+00:00".to_owned())
        );
    }

    #[test]
    fn raw_outputs_reject_non_list() {
        let err = parse_raw_outputs(r#"{"kind": "search"}"#).unwrap_err();
        assert!(err.to_string().contains("tool outputs"));
    }

    #[test]
    fn embedded_outputs_use_lenient_reader() {
        #[derive(Deserialize)]
        struct Transcript {
            #[serde(deserialize_with = "deserialize_tool_outputs")]
            outputs: Vec<RawToolOutput>,
        }
        let transcript: Transcript = serde_json::from_str(
            r#"{"outputs": [{"kind": "podcast"}, {"kind": "wikipedia", "url": "https://en.wikipedia.org/wiki/X", "title": "X"}]}"#,
        )
        .expect("parse");
        assert_eq!(transcript.outputs.len(), 1);
        assert_eq!(transcript.outputs[0].kind, SourceKind::Wikipedia);
    }

    #[test]
    fn wikipedia_text_two_pages() {
        let text = "Page: Quantum computing\nSummary: A quantum computer exploits\nsuperposition.\n\nPage: Qubit\nSummary: The basic unit.";
        let outputs = parse_wikipedia_text(text);
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].title.as_deref(), Some("Quantum computing"));
        assert_eq!(
            outputs[0].url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Quantum_computing")
        );
        assert_eq!(
            outputs[0].snippet.as_deref(),
            Some("A quantum computer exploits\nsuperposition.")
        );
        assert_eq!(outputs[1].snippet.as_deref(), Some("The basic unit."));
        assert!(outputs.iter().all(|o| o.kind == SourceKind::Wikipedia));
    }

    #[test]
    fn wikipedia_text_without_pages_is_empty() {
        assert!(parse_wikipedia_text("No good Wikipedia Search Result was found").is_empty());
        assert!(parse_wikipedia_text("").is_empty());
    }

    #[test]
    fn wikipedia_blank_title_has_no_url() {
        let outputs = parse_wikipedia_text("Page:   \nSummary: orphan");
        assert_eq!(outputs.len(), 1);
        assert!(outputs[0].url.is_none());
    }

    #[test]
    fn wikipedia_url_matches_url_crate_encoding() {
        assert_eq!(
            wikipedia_url("C (programming language)").as_deref(),
            Some("https://en.wikipedia.org/wiki/C_(programming_language)")
        );
        assert_eq!(
            wikipedia_url("Category:Physics").as_deref(),
            Some("https://en.wikipedia.org/wiki/Category:Physics")
        );
        assert_eq!(
            wikipedia_url("Who? (song)").as_deref(),
            Some("https://en.wikipedia.org/wiki/Who%3F_(song)")
        );
        assert_eq!(
            wikipedia_url("AC/DC").as_deref(),
            Some("https://en.wikipedia.org/wiki/AC/DC")
        );
        assert!(wikipedia_url("   ").is_none());
    }
}
