//! Filter-list parsing
//!
//! The unsafe/potentially-unsafe/fmhy sources are adblock-style site
//! lists: one site per line, `!` starts a comment. Lines normalize to
//! canonical URLs; lines that fail to normalize are dropped individually.

use std::collections::HashSet;

use sg_core::url::normalize;

/// Parse a filter-list document into deduplicated normalized URLs,
/// preserving first-seen order.
pub fn parse_filter_list(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('!') {
            continue;
        }
        let Some(normalized) = normalize(line) else {
            log::debug!("dropping unparseable filter line: {line}");
            continue;
        };
        if seen.insert(normalized.clone()) {
            entries.push(normalized);
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_blanks_dropped() {
        let text = "! comment\nexample.com\n\nwww.foo.org/\n";
        assert_eq!(
            parse_filter_list(text),
            vec!["https://example.com".to_string(), "https://foo.org".to_string()]
        );
    }

    #[test]
    fn test_whitespace_trimmed() {
        let text = "  example.com  \n\t! indented comment\n";
        assert_eq!(parse_filter_list(text), vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_unparseable_lines_dropped_individually() {
        let text = "example.com\nnot a url\nfoo.org";
        assert_eq!(
            parse_filter_list(text),
            vec!["https://example.com".to_string(), "https://foo.org".to_string()]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let text = "example.com\nhttps://example.com\nwww.example.com/";
        assert_eq!(parse_filter_list(text), vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_filter_list("").is_empty());
        assert!(parse_filter_list("! only comments\n!more\n").is_empty());
    }
}
