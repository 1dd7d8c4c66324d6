//! Markdown URL extraction
//!
//! The safe list is curated as Markdown guide documents. Extraction is a
//! raw token scan, not a CommonMark parse: any `http(s)` run up to
//! whitespace or a closing paren counts, which covers both `[text](url)`
//! links and bare URLs in prose. Normalization happens downstream when
//! the list is assembled.

use std::sync::OnceLock;

use regex::Regex;

/// Entries marked with this glyph in the guides are "starred"
/// recommendations.
pub const STAR_MARKER: char = '⭐';

fn url_token() -> &'static Regex {
    static URL_TOKEN: OnceLock<Regex> = OnceLock::new();
    URL_TOKEN.get_or_init(|| Regex::new(r"https?://[^\s)]+").expect("static pattern compiles"))
}

/// Extract every HTTP(S) URL token from a Markdown document, raw and in
/// document order.
pub fn extract_markdown_urls(text: &str) -> Vec<String> {
    url_token()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Starred variant: scan line by line, keep only lines carrying the star
/// marker, and take the first URL token of each such line.
pub fn extract_starred_urls(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| line.contains(STAR_MARKER))
        .filter_map(|line| url_token().find(line))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_link_targets_and_bare_urls() {
        let text = "See [Example](https://example.com/page) and also http://bare.org/x for more.";
        assert_eq!(
            extract_markdown_urls(text),
            vec!["https://example.com/page".to_string(), "http://bare.org/x".to_string()]
        );
    }

    #[test]
    fn test_url_token_stops_at_paren_and_whitespace() {
        let text = "[a](https://a.com) https://b.com trailing";
        assert_eq!(
            extract_markdown_urls(text),
            vec!["https://a.com".to_string(), "https://b.com".to_string()]
        );
    }

    #[test]
    fn test_non_http_schemes_ignored() {
        let text = "write to [us](mailto:x@example.com) or ftp://files.example.com";
        assert!(extract_markdown_urls(text).is_empty());
    }

    #[test]
    fn test_starred_keeps_only_marked_lines() {
        let text = "\
- [Plain](https://plain.example) - ordinary entry
- ⭐ [Best](https://best.example) - top pick
- another ordinary line https://skip.example
- ⭐ bare star pick https://second.example and https://ignored.example
";
        assert_eq!(
            extract_starred_urls(text),
            vec!["https://best.example".to_string(), "https://second.example".to_string()]
        );
    }

    #[test]
    fn test_starred_line_without_url_is_skipped() {
        assert!(extract_starred_urls("⭐ a heading with no link\n").is_empty());
    }
}
