//! Bookmark-export HTML extraction
//!
//! The starred list ships as a browser bookmark export (the Netscape
//! bookmark file format). Real-world exports are too malformed for a
//! strict HTML parse, so extraction is best-effort over several anchor
//! spellings; a URL caught by more than one pattern is counted once.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

fn anchor_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // Standard export format
            r#"<A HREF="(https?://[^\s"]+)""#,
            // Lowercase tags
            r#"<a href="(https?://[^\s"]+)""#,
            // Generic href with either quote style
            r#"href=["'](https?://[^\s"']+)["']"#,
            // Full <DT><A ...> bookmark entries
            r#"<DT><A[^>]*HREF="(https?://[^\s"]+)"[^>]*>([^<]+)"#,
        ]
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("static pattern compiles")
        })
        .collect()
    })
}

/// Extract bookmark `href` targets from an export document, deduplicated
/// across patterns in first-seen order. Tolerates malformed and partial
/// HTML; anything the patterns cannot see is silently skipped.
pub fn extract_bookmark_urls(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for pattern in anchor_patterns() {
        for captures in pattern.captures_iter(html) {
            if let Some(url) = captures.get(1) {
                let url = url.as_str().to_string();
                if seen.insert(url.clone()) {
                    urls.push(url);
                }
            }
        }
    }

    log::debug!("extracted {} bookmark URLs", urls.len());
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_export_format() {
        let html = r#"<DT><A HREF="https://example.com/" ADD_DATE="1700000000">Example</A>"#;
        assert_eq!(extract_bookmark_urls(html), vec!["https://example.com/".to_string()]);
    }

    #[test]
    fn test_case_variants() {
        let html = concat!(
            r#"<A HREF="https://upper.example">U</A>"#,
            "\n",
            r#"<a href="https://lower.example">L</a>"#,
        );
        assert_eq!(
            extract_bookmark_urls(html),
            vec!["https://upper.example".to_string(), "https://lower.example".to_string()]
        );
    }

    #[test]
    fn test_single_quoted_href() {
        let html = r#"<a class="bm" href='https://quoted.example/x'>q</a>"#;
        assert_eq!(extract_bookmark_urls(html), vec!["https://quoted.example/x".to_string()]);
    }

    #[test]
    fn test_overlapping_patterns_do_not_double_count() {
        // This anchor matches the uppercase, generic and <DT> patterns.
        let html = r#"<DT><A HREF="https://once.example" ICON="x">Once</A>"#;
        assert_eq!(extract_bookmark_urls(html), vec!["https://once.example".to_string()]);
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let html = r#"<DT><A HREF="https://kept.example" no closing tag
            <<<garbage>>> href="https://also-kept.example""#;
        let urls = extract_bookmark_urls(html);
        assert!(urls.contains(&"https://kept.example".to_string()));
        assert!(urls.contains(&"https://also-kept.example".to_string()));
    }

    #[test]
    fn test_non_http_hrefs_ignored() {
        let html = r#"<a href="javascript:void(0)">j</a><a href="file:///etc/passwd">f</a>"#;
        assert!(extract_bookmark_urls(html).is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_bookmark_urls("").is_empty());
    }
}
