//! URL normalisation for citation deduplication.
//!
//! Canonicalises URLs so that equivalent pages (differing only in
//! query-parameter order, tracking parameters, fragments, trailing slashes
//! or capitalisation of the scheme and host) compare as equal.

use url::Url;

use crate::error::SourceError;

/// Tracking query parameters that are stripped during normalisation.
///
/// Only click and campaign identifiers that never select content. Generic
/// names such as `ref` or `feature` are kept because some sites route on
/// them (GitHub's `?ref=<branch>`).
const TRACKING_PARAMS: &[&str] = &[
    "fbclid",
    "gclid",
    "dclid",
    "msclkid",
    "yclid",
    "igshid",
    "mc_cid",
    "mc_eid",
    "_ga",
    "ref_src",
];

/// Any parameter with this prefix is a campaign tag (`utm_source`, `utm_id`, ...).
const TRACKING_PREFIX: &str = "utm_";

/// Parse `raw` as an absolute http or https URL.
///
/// # Errors
///
/// Returns [`SourceError::MissingUrl`] for blank input and
/// [`SourceError::InvalidUrl`] for anything unparseable, relative, or using
/// another scheme.
pub fn parse_http_url(raw: &str) -> Result<Url, SourceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SourceError::MissingUrl);
    }
    let parsed = Url::parse(trimmed).map_err(|_| SourceError::InvalidUrl(trimmed.to_owned()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        _ => Err(SourceError::InvalidUrl(trimmed.to_owned())),
    }
}

/// Normalise a URL into its deduplication key.
///
/// Applies the following transformations:
///
/// 1. Lowercase scheme and host (path is preserved as-is).
/// 2. Remove default ports (`:80` for HTTP, `:443` for HTTPS).
/// 3. Strip known tracking parameters (`utm_*`, fbclid, gclid, etc.).
/// 4. Sort remaining query parameters by key, then value.
/// 5. Remove the fragment (`#…`).
/// 6. Remove the trailing slash from the path (unless the path is exactly `"/"`).
///
/// Scheme/host lowercasing and default-port removal are done by the `url`
/// parser itself.
///
/// # Errors
///
/// Same as [`parse_http_url`].
///
/// # Examples
///
/// ```
/// use citemint_sources::collector::url_normalize::normalize_url;
///
/// let a = normalize_url("https://En.Wikipedia.org/wiki/Test/").unwrap();
/// let b = normalize_url("https://en.wikipedia.org/wiki/Test").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn normalize_url(raw: &str) -> Result<String, SourceError> {
    let mut parsed = parse_http_url(raw)?;

    parsed.set_fragment(None);

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.sort();

    if params.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(&params);
    }

    let path = parsed.path().to_owned();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(path.trim_end_matches('/'));
    }

    Ok(parsed.to_string())
}

fn is_tracking_param(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.starts_with(TRACKING_PREFIX) || TRACKING_PARAMS.contains(&key.as_str())
}
