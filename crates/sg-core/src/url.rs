//! URL normalization utilities
//!
//! Every list entry and every candidate URL goes through [`normalize`]
//! before comparison, so the rest of the engine only ever sees one
//! canonical spelling per page.

use std::collections::HashSet;

use url::Url;

// =============================================================================
// Scheme Detection
// =============================================================================

/// Fast check for an explicit `http://` or `https://` prefix.
#[inline]
pub fn has_http_scheme(s: &str) -> bool {
    let bytes = s.as_bytes();
    (bytes.len() >= 8 && bytes[..8].eq_ignore_ascii_case(b"https://"))
        || (bytes.len() >= 7 && bytes[..7].eq_ignore_ascii_case(b"http://"))
}

// =============================================================================
// Normalization
// =============================================================================

/// Canonicalize a raw URL string for list membership and comparison.
///
/// - prepends `https://` when no `http(s)://` prefix is present
/// - strips a leading `www.` from the host
/// - clears query string and fragment
/// - strips trailing slashes from the serialized form
///
/// Returns `None` when the result is not a parseable absolute URL; callers
/// drop the single entry and continue.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate: String = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let mut parsed = match Url::parse(&candidate) {
        Ok(parsed) => parsed,
        Err(err) => {
            log::debug!("invalid URL skipped: {trimmed} ({err})");
            return None;
        }
    };

    let host = parsed.host_str()?.to_string();
    if let Some(stripped) = host.strip_prefix("www.") {
        // An empty remainder ("https://www.") is not a usable host.
        parsed.set_host(Some(stripped)).ok()?;
    }

    parsed.set_query(None);
    parsed.set_fragment(None);

    Some(parsed.as_str().trim_end_matches('/').to_string())
}

/// Normalize a batch of raw URLs, dropping failures and duplicates while
/// preserving first-seen order.
pub fn normalize_all<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in raw {
        if let Some(normalized) = normalize(item.as_ref()) {
            if seen.insert(normalized.clone()) {
                out.push(normalized);
            }
        }
    }
    out
}

// =============================================================================
// Derived Forms
// =============================================================================

/// `scheme://host` of a URL, with no port, path, query or fragment.
///
/// Parses the input directly (no scheme prepend) and fails `None` on
/// unparseable input.
pub fn root_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{}://{}", parsed.scheme(), host))
}

/// Hostname of a URL, or `None` when it has none.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_string)
}

/// Strip a leading `www.` and lowercase, for bare-hostname comparison.
pub fn normalize_domain(hostname: &str) -> String {
    let lowered = hostname.to_ascii_lowercase();
    match lowered.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

/// The trailing-slash spellings of a URL: as given, with a slash appended,
/// and with trailing slashes removed. Lists are not consistent about
/// trailing slashes, so membership checks try every spelling once.
pub fn slash_variants(url: &str) -> Vec<String> {
    let with_slash = if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    };
    let without_slash = url.trim_end_matches('/').to_string();

    let mut variants = vec![url.to_string()];
    for variant in [with_slash, without_slash] {
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_http_scheme() {
        assert!(has_http_scheme("https://example.com"));
        assert!(has_http_scheme("HTTP://example.com"));
        assert!(!has_http_scheme("example.com"));
        assert!(!has_http_scheme("ftp://example.com"));
    }

    #[test]
    fn test_normalize_adds_scheme() {
        assert_eq!(normalize("example.com").as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_normalize_strips_www_query_fragment_slash() {
        assert_eq!(
            normalize("https://www.example.com/path/?q=1#frag").as_deref(),
            Some("https://example.com/path")
        );
    }

    #[test]
    fn test_normalize_equates_spellings() {
        // Host case, www prefix, and trailing slash must all collapse.
        assert_eq!(normalize("WWW.Example.com/path/"), normalize("example.com/path"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["example.com", "https://www.foo.org/a/b/", "http://bar.net/x?q=2"] {
            let once = normalize(raw).unwrap();
            assert_eq!(normalize(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("https://"), None);
        assert_eq!(normalize("not a url"), None);
    }

    #[test]
    fn test_normalize_all_dedupes() {
        let out = normalize_all(["example.com", "https://example.com/", "www.example.com", "not a url"]);
        assert_eq!(out, vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_root_url() {
        assert_eq!(
            root_url("https://example.com/deep/path").as_deref(),
            Some("https://example.com")
        );
        assert_eq!(
            root_url("https://example.com:8080/x").as_deref(),
            Some("https://example.com")
        );
        assert_eq!(root_url("nonsense"), None);
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("WWW.Example.COM"), "example.com");
        assert_eq!(normalize_domain("sub.example.com"), "sub.example.com");
    }

    #[test]
    fn test_slash_variants() {
        assert_eq!(
            slash_variants("https://example.com/a"),
            vec!["https://example.com/a", "https://example.com/a/"]
        );
        assert_eq!(
            slash_variants("https://example.com/a/"),
            vec!["https://example.com/a/", "https://example.com/a"]
        );
    }
}
