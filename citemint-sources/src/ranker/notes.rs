//! Derived report text: "why these sources" bullets and freshness notes.
//!
//! Both are pure functions of the tagged citations, so the same citations
//! always produce the same text.

use crate::types::{Citation, RationaleTag, SourceKind};

/// Bullet used when a report has no citations at all.
pub const NO_SOURCES_BULLET: &str = "No sources were found for this query.";

/// Freshness note used when a report has no citations at all.
pub const NO_SOURCES_FRESHNESS: &str = "No sources to assess for freshness.";

/// Closing bullet for citation sets that carry too few tags to explain.
pub const ORDERING_BULLET: &str =
    "Citations are numbered in the order the tools first returned them.";

const MIN_BULLETS: usize = 2;
const MAX_BULLETS: usize = 3;

/// Select 2-3 bullets explaining the citation set.
///
/// One bullet per rationale tag carried by at least one citation, in tag
/// order. When fewer than two tag bullets result, a coverage bullet naming
/// how many sources and tool kinds were consolidated is appended, then
/// [`ORDERING_BULLET`] if still short. An empty citation set yields the
/// single [`NO_SOURCES_BULLET`].
pub fn why_these_sources(
    citations: &[Citation],
    kinds: &[SourceKind],
    window_days: u32,
) -> Vec<String> {
    if citations.is_empty() {
        return vec![NO_SOURCES_BULLET.to_owned()];
    }

    let mut bullets: Vec<String> = RationaleTag::all()
        .iter()
        .filter_map(|&tag| {
            let indices = indices_with(citations, |c| c.has_tag(tag));
            (!indices.is_empty()).then(|| tag_bullet(tag, &indices, window_days))
        })
        .collect();

    if bullets.len() < MIN_BULLETS {
        bullets.push(coverage_bullet(citations.len(), kinds));
    }
    if bullets.len() < MIN_BULLETS {
        bullets.push(ORDERING_BULLET.to_owned());
    }
    bullets.truncate(MAX_BULLETS);
    bullets
}

/// Summarise which citations fall inside the freshness window.
pub fn freshness_notes(citations: &[Citation], window_days: u32) -> String {
    if citations.is_empty() {
        return NO_SOURCES_FRESHNESS.to_owned();
    }

    let window = days(window_days);
    let recent = indices_with(citations, |c| c.has_tag(RationaleTag::Recency));
    let older = indices_with(citations, |c| !c.has_tag(RationaleTag::Recency));

    match (recent.is_empty(), older.is_empty()) {
        (false, false) => format!(
            "Recent (within {window}): {}. Older than {window}: {}.",
            cite_list(&recent),
            cite_list(&older)
        ),
        (false, true) => format!(
            "Recent (within {window}): {}. No older sources.",
            cite_list(&recent)
        ),
        _ => format!(
            "No sources fall within the last {window}. Older than {window}: {}.",
            cite_list(&older)
        ),
    }
}

fn tag_bullet(tag: RationaleTag, indices: &[usize], window_days: u32) -> String {
    let list = cite_list(indices);
    match tag {
        RationaleTag::Authority => format!(
            "Authoritative references ({list}) come from Wikipedia or recognised reference domains."
        ),
        RationaleTag::Recency => format!(
            "Recent material ({list}) was retrieved within the last {}.",
            days(window_days)
        ),
        RationaleTag::Diversity => format!(
            "Coverage spans {} ({list}), so no single publisher dominates.",
            plural(indices.len(), "distinct host", "distinct hosts")
        ),
    }
}

fn coverage_bullet(count: usize, kinds: &[SourceKind]) -> String {
    let names: Vec<&str> = kinds.iter().map(SourceKind::name).collect();
    format!(
        "{} consolidated from {} ({}).",
        plural(count, "distinct source", "distinct sources"),
        plural(kinds.len(), "kind of tool output", "kinds of tool output"),
        names.join(", ")
    )
}

fn indices_with(citations: &[Citation], predicate: impl Fn(&Citation) -> bool) -> Vec<usize> {
    citations
        .iter()
        .filter(|c| predicate(c))
        .map(|c| c.index)
        .collect()
}

/// Format indices as `[1], [3], [4]`.
pub fn cite_list(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| format!("[{i}]"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn days(n: u32) -> String {
    plural(n as usize, "day", "days")
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}
