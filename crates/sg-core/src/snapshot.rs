//! Compiled list snapshot
//!
//! A [`ListSnapshot`] is the immutable, fully-compiled form of the five
//! reputation lists. Snapshots are rebuilt wholesale from the persisted
//! flat arrays on every refresh or load; there is no incremental update.
//! The store swaps whole snapshots so concurrent readers never observe a
//! half-rebuilt matcher.

use std::collections::{HashMap, HashSet};

use crate::matcher::ListMatcher;
use crate::types::StoredLists;
use crate::url;

// =============================================================================
// Fallback Entries
// =============================================================================

/// Known-safe entries merged into the safe list after every load/refresh,
/// so a degraded cycle still recognizes the common destinations. The
/// GitHub entry is a specific repository: repository hosts are evaluated
/// per path, never by domain.
pub const KNOWN_SAFE_SITES: &[&str] = &[
    // Gaming
    "https://fitgirl-repacks.site",
    "https://pcgamestorrents.com",
    "https://steamunlocked.net",
    "https://gog-games.com",
    // Tools and software hosts
    "https://gitlab.com",
    "https://sourceforge.net",
    // Media and archives
    "https://archive.org",
    "https://nyaa.si",
    "https://rutracker.org",
    "https://1337x.to",
    // Known safe repositories
    "https://github.com/hydralauncher/hydra",
];

// =============================================================================
// Compiled Lists
// =============================================================================

/// A list backed by a compiled alternation matcher
/// (unsafe / potentially-unsafe / fmhy).
#[derive(Debug, Clone)]
pub struct CompiledList {
    entries: Vec<String>,
    matcher: ListMatcher,
}

impl CompiledList {
    fn build(raw_entries: &[String]) -> Self {
        let entries = dedup_entries(raw_entries.iter().map(String::as_str));
        let matcher = ListMatcher::build(&entries);
        Self { entries, matcher }
    }

    fn empty() -> Self {
        Self { entries: Vec::new(), matcher: ListMatcher::empty() }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn matcher(&self) -> &ListMatcher {
        &self.matcher
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A list checked by literal membership and host equality
/// (safe / starred). These lists are large relative to how often they
/// match, so they stay as sets instead of one giant compiled pattern.
#[derive(Debug, Clone)]
pub struct MembershipList {
    entries: Vec<String>,
    set: HashSet<String>,
    // host -> first entry carrying that host, for domain-equality fallback
    entry_hosts: HashMap<String, String>,
}

impl MembershipList {
    fn build(raw_entries: &[String]) -> Self {
        let entries = dedup_entries(raw_entries.iter().map(String::as_str));
        let set: HashSet<String> = entries.iter().cloned().collect();

        let mut entry_hosts = HashMap::new();
        for entry in &entries {
            if let Some(host) = url::host_of(entry) {
                entry_hosts.entry(host).or_insert_with(|| entry.clone());
            }
        }

        Self { entries, set, entry_hosts }
    }

    fn empty() -> Self {
        Self { entries: Vec::new(), set: HashSet::new(), entry_hosts: HashMap::new() }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Exact (case-sensitive) membership of a normalized candidate.
    pub fn contains(&self, candidate: &str) -> bool {
        self.set.contains(candidate)
    }

    /// The first entry whose host equals `host`, for domain-only fallback.
    pub fn entry_for_host(&self, host: &str) -> Option<&str> {
        self.entry_hosts.get(host).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn dedup_entries<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for entry in raw {
        if seen.insert(entry) {
            out.push(entry.to_string());
        }
    }
    out
}

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable compiled form of all five reputation lists.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub unsafe_sites: CompiledList,
    pub potentially_unsafe_sites: CompiledList,
    pub fmhy_sites: CompiledList,
    pub safe_sites: MembershipList,
    pub starred_sites: MembershipList,
}

impl ListSnapshot {
    /// Compile a snapshot from persisted flat lists. The known-safe
    /// fallback entries are merged into the safe list; entries already
    /// present are not duplicated.
    pub fn build(lists: &StoredLists) -> Self {
        let mut safe_with_fallback = lists.safe_sites.clone();
        for site in KNOWN_SAFE_SITES {
            if let Some(normalized) = url::normalize(site) {
                if !safe_with_fallback.contains(&normalized) {
                    safe_with_fallback.push(normalized);
                }
            }
        }

        Self {
            unsafe_sites: CompiledList::build(&lists.unsafe_sites),
            potentially_unsafe_sites: CompiledList::build(&lists.potentially_unsafe_sites),
            fmhy_sites: CompiledList::build(&lists.fmhy_sites),
            safe_sites: MembershipList::build(&safe_with_fallback),
            starred_sites: MembershipList::build(&lists.starred_sites),
        }
    }

    /// Snapshot with no data at all: every resolution falls through to
    /// `no_data`. Valid, if degraded.
    pub fn empty() -> Self {
        Self {
            unsafe_sites: CompiledList::empty(),
            potentially_unsafe_sites: CompiledList::empty(),
            fmhy_sites: CompiledList::empty(),
            safe_sites: MembershipList::empty(),
            starred_sites: MembershipList::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists_with_safe(safe: &[&str]) -> StoredLists {
        StoredLists {
            safe_sites: safe.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_merges_fallback_sites() {
        let snapshot = ListSnapshot::build(&StoredLists::default());
        assert!(snapshot.safe_sites.contains("https://archive.org"));
        assert!(snapshot.safe_sites.contains("https://github.com/hydralauncher/hydra"));
    }

    #[test]
    fn test_fallback_merge_is_idempotent() {
        let lists = lists_with_safe(&["https://archive.org", "https://example.com"]);
        let snapshot = ListSnapshot::build(&lists);
        let archive_entries = snapshot
            .safe_sites
            .entries()
            .iter()
            .filter(|e| e.as_str() == "https://archive.org")
            .count();
        assert_eq!(archive_entries, 1);
    }

    #[test]
    fn test_membership_and_host_lookup() {
        let lists = lists_with_safe(&["https://example.com/page"]);
        let snapshot = ListSnapshot::build(&lists);
        assert!(snapshot.safe_sites.contains("https://example.com/page"));
        assert!(!snapshot.safe_sites.contains("https://example.com/other"));
        assert_eq!(
            snapshot.safe_sites.entry_for_host("example.com"),
            Some("https://example.com/page")
        );
        assert_eq!(snapshot.safe_sites.entry_for_host("other.com"), None);
    }

    #[test]
    fn test_compiled_lists_dedup() {
        let lists = StoredLists {
            unsafe_sites: vec![
                "https://evil.com".to_string(),
                "https://evil.com".to_string(),
                "https://worse.net".to_string(),
            ],
            ..Default::default()
        };
        let snapshot = ListSnapshot::build(&lists);
        assert_eq!(snapshot.unsafe_sites.len(), 2);
        assert!(snapshot.unsafe_sites.matcher().is_match("https://evil.com/x"));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = ListSnapshot::empty();
        assert!(snapshot.unsafe_sites.is_empty());
        assert!(!snapshot.safe_sites.contains("https://example.com"));
    }
}
