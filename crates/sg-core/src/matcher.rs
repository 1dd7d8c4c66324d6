//! Compiled list matchers
//!
//! A [`ListMatcher`] compiles a reputation list into one case-insensitive
//! alternation pattern. Matching is substring, NOT anchored: an entry
//! `example.com` also matches `www.example.com.au`. Both sides are
//! pre-normalized by callers, which keeps the looseness tolerable; it is
//! still a known false-positive source and is pinned down in the tests.
//!
//! The type is deliberately a thin wrapper so the implementation could be
//! swapped (trie, Aho-Corasick) without touching call sites.

use regex::RegexBuilder;

/// Compiled alternation over a list's entries.
#[derive(Debug, Clone)]
pub struct ListMatcher {
    // None when the list is empty or the pattern failed to compile;
    // such a matcher never matches anything.
    pattern: Option<regex::Regex>,
    entry_count: usize,
}

impl ListMatcher {
    /// Compile a matcher from normalized list entries.
    ///
    /// Every regex metacharacter in an entry is escaped, so entries always
    /// match as literals. An empty list yields a matcher that matches
    /// nothing; a pattern that fails to compile is logged and degrades the
    /// same way rather than aborting the refresh cycle.
    pub fn build(entries: &[String]) -> Self {
        if entries.is_empty() {
            return Self { pattern: None, entry_count: 0 };
        }

        let alternation = entries
            .iter()
            .map(|entry| regex::escape(entry))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = match RegexBuilder::new(&format!("(?:{alternation})"))
            .case_insensitive(true)
            .size_limit(1 << 26)
            .build()
        {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                log::warn!("failed to compile matcher over {} entries: {err}", entries.len());
                None
            }
        };

        Self { pattern, entry_count: entries.len() }
    }

    /// Matcher over no entries; never matches.
    pub fn empty() -> Self {
        Self { pattern: None, entry_count: 0 }
    }

    /// True iff some entry occurs anywhere in `candidate`.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(candidate))
    }

    /// The matched span of `candidate`, i.e. the entry text as it occurs
    /// there. `None` when nothing matches.
    pub fn find<'c>(&self, candidate: &'c str) -> Option<&'c str> {
        self.pattern.as_ref()?.find(candidate).map(|m| m.as_str())
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(entries: &[&str]) -> ListMatcher {
        let owned: Vec<String> = entries.iter().map(|s| s.to_string()).collect();
        ListMatcher::build(&owned)
    }

    #[test]
    fn test_empty_matcher_matches_nothing() {
        let m = ListMatcher::empty();
        assert!(!m.is_match("https://example.com"));
        assert!(m.is_empty());
    }

    #[test]
    fn test_substring_semantics() {
        let m = matcher(&["https://evil.com"]);
        assert!(m.is_match("https://evil.com"));
        assert!(m.is_match("https://evil.com/path"));
        // Entry is matched anywhere, not anchored.
        assert!(m.is_match("https://mirror.example/https://evil.com"));
    }

    #[test]
    fn test_dots_match_literally() {
        let m = matcher(&["evil.com"]);
        // "notevilcompanion.biz" contains "evilcomp" but not "evil.com":
        // the escaped dot must not match an arbitrary character.
        assert!(!m.is_match("notevilcompanion.biz"));
    }

    #[test]
    fn test_documented_false_positive() {
        let m = matcher(&["evil.com"]);
        // Known looseness of substring matching: a listed domain also
        // matches as a fragment of a longer host.
        assert!(m.is_match("www.evil.com.au"));
        assert!(m.is_match("evil.com.evil.net"));
    }

    #[test]
    fn test_case_insensitive() {
        let m = matcher(&["https://example.com/Path"]);
        assert!(m.is_match("https://EXAMPLE.com/path"));
    }

    #[test]
    fn test_find_returns_matched_entry_span() {
        let m = matcher(&["https://a.com", "https://b.org"]);
        assert_eq!(m.find("https://b.org/page"), Some("https://b.org"));
        assert_eq!(m.find("https://c.net"), None);
    }

    #[test]
    fn test_alternation_over_many_entries() {
        let entries: Vec<String> = (0..500).map(|i| format!("https://site{i}.example")).collect();
        let m = ListMatcher::build(&entries);
        assert_eq!(m.entry_count(), 500);
        assert!(m.is_match("https://site499.example/x"));
        assert!(!m.is_match("https://site500.example"));
    }
}
