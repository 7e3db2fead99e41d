//! Fetched page cleanup: pulls the title and readable text out of raw HTML.
//!
//! Used by the collector when a fetched-page output arrives with an `html`
//! body instead of (or in addition to) a title and snippet.

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text never counts as page content.
const SKIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "nav", "footer", "header", "aside", "svg", "iframe", "template",
];

/// Content containers, tried in priority order.
const CONTENT_SELECTORS: &[&str] = &["article", "main", "[role=\"main\"]", "body"];

/// Title and readable text extracted from a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Trimmed `<title>` text, if the page has a non-empty one.
    pub title: Option<String>,
    /// Cleaned body text, at most `max_chars` characters.
    pub text: String,
}

/// Extract the title and readable text from `html`.
///
/// Boilerplate elements are skipped, whitespace inside lines is collapsed,
/// runs of blank lines become a single blank line, and the result is cut to
/// `max_chars` characters. Never fails: a page with no usable text yields an
/// empty `text`.
pub fn extract_page(html: &str, max_chars: usize) -> ExtractedPage {
    let document = Html::parse_document(html);
    let title = extract_title(&document);
    let raw = extract_main_text(&document);
    let text = truncate_chars(&normalise_whitespace(&raw), max_chars);
    ExtractedPage { title, text }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let title: String = document.select(&selector).next()?.text().collect();
    let title = normalise_whitespace(&title).replace('\n', " ");
    (!title.is_empty()).then_some(title)
}

fn extract_main_text(document: &Html) -> String {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = visible_text(element);
            if !text.trim().is_empty() {
                return text;
            }
        }
    }
    String::new()
}

/// Concatenate text nodes under `root`, one per line, skipping boilerplate.
fn visible_text(root: ElementRef<'_>) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !skipped {
            lines.push(text);
        }
    }
    lines.join("\n")
}

/// Collapse spaces within each line and keep at most one blank line in a row.
fn normalise_whitespace(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut previous_blank = true;
    for line in text.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !previous_blank {
                out.push(String::new());
            }
            previous_blank = true;
        } else {
            out.push(collapsed);
            previous_blank = false;
        }
    }
    while out.last().is_some_and(String::is_empty) {
        out.pop();
    }
    out.join("\n")
}

/// Cut `text` to at most `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_end, _)) => text[..byte_end].trim_end().to_owned(),
        None => text.to_owned(),
    }
}
