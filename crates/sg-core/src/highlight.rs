//! Link highlight decisions
//!
//! The annotating collaborator (a content script, a TUI, anything that
//! renders links) asks this module what to do with each link it sees on a
//! result page. The decision is pure domain logic; painting the link is
//! the collaborator's job.
//!
//! Per-domain highlighting is capped so a page full of links to one domain
//! is not drowned in markup, and a warning banner is attached at most once
//! per domain.

use std::collections::{HashMap, HashSet};

use crate::overrides::OverrideSets;
use crate::snapshot::ListSnapshot;
use crate::types::Settings;
use crate::url;

/// At most this many links per domain get highlighted on one page.
const MAX_HIGHLIGHTS_PER_DOMAIN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Trusted,
    Untrusted,
}

/// What the collaborator should do with one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkAnnotation {
    pub highlight: Option<Highlight>,
    pub warning_banner: bool,
}

impl LinkAnnotation {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.highlight.is_none() && !self.warning_banner
    }
}

/// Hostnames of the unsafe and safe list entries, the granularity at which
/// links are highlighted.
#[derive(Debug, Clone, Default)]
pub struct DomainSets {
    unsafe_domains: HashSet<String>,
    safe_domains: HashSet<String>,
}

impl DomainSets {
    pub fn from_snapshot(snapshot: &ListSnapshot) -> Self {
        let collect = |entries: &[String]| -> HashSet<String> {
            entries
                .iter()
                .filter_map(|entry| url::host_of(entry))
                .map(|host| url::normalize_domain(&host))
                .collect()
        };
        Self {
            unsafe_domains: collect(snapshot.unsafe_sites.entries()),
            safe_domains: collect(snapshot.safe_sites.entries()),
        }
    }

    /// Fold the user's overrides into the sets: trusted domains count as
    /// safe, untrusted domains as unsafe.
    pub fn apply_overrides(&mut self, overrides: &OverrideSets) {
        for domain in overrides.trusted_domains() {
            self.safe_domains.insert(domain.to_string());
            self.unsafe_domains.remove(domain);
        }
        for domain in overrides.untrusted_domains() {
            self.unsafe_domains.insert(domain.to_string());
            self.safe_domains.remove(domain);
        }
    }

    pub fn is_unsafe_domain(&self, domain: &str) -> bool {
        self.unsafe_domains.contains(domain)
    }

    pub fn is_safe_domain(&self, domain: &str) -> bool {
        self.safe_domains.contains(domain)
    }
}

/// Stateful per-page highlighter: tracks highlight counts and banner
/// placement across the links of one page visit.
pub struct Highlighter {
    domains: DomainSets,
    overrides: OverrideSets,
    settings: Settings,
    trusted_counts: HashMap<String, usize>,
    untrusted_counts: HashMap<String, usize>,
    bannered_domains: HashSet<String>,
}

impl Highlighter {
    pub fn new(snapshot: &ListSnapshot, overrides: OverrideSets, settings: Settings) -> Self {
        let mut domains = DomainSets::from_snapshot(snapshot);
        domains.apply_overrides(&overrides);
        Self {
            domains,
            overrides,
            settings,
            trusted_counts: HashMap::new(),
            untrusted_counts: HashMap::new(),
            bannered_domains: HashSet::new(),
        }
    }

    /// Decide the annotation for one link on a page served from
    /// `page_domain`.
    pub fn annotate_link(&mut self, link_url: &str, page_domain: &str) -> LinkAnnotation {
        let Some(link_host) = url::host_of(link_url) else {
            return LinkAnnotation::none();
        };
        let link_domain = url::normalize_domain(&link_host);
        let page_domain = url::normalize_domain(page_domain);

        // Internal links on a safe or user-trusted page stay unmarked.
        let page_is_safe =
            self.domains.is_safe_domain(&page_domain) || self.overrides.is_trusted(&page_domain);
        if page_is_safe && link_domain == page_domain {
            return LinkAnnotation::none();
        }

        let untrusted = self.overrides.is_untrusted(&link_domain)
            || (!self.overrides.is_trusted(&link_domain)
                && self.domains.is_unsafe_domain(&link_domain));
        if untrusted {
            let mut annotation = LinkAnnotation::none();
            let count = self.untrusted_counts.entry(link_domain.clone()).or_insert(0);
            if self.settings.highlight_untrusted && *count < MAX_HIGHLIGHTS_PER_DOMAIN {
                annotation.highlight = Some(Highlight::Untrusted);
                *count += 1;
            }
            if self.settings.show_warning_banners && self.bannered_domains.insert(link_domain) {
                annotation.warning_banner = true;
            }
            return annotation;
        }

        let trusted =
            self.overrides.is_trusted(&link_domain) || self.domains.is_safe_domain(&link_domain);
        if trusted {
            let count = self.trusted_counts.entry(link_domain).or_insert(0);
            if self.settings.highlight_trusted && *count < MAX_HIGHLIGHTS_PER_DOMAIN {
                *count += 1;
                return LinkAnnotation { highlight: Some(Highlight::Trusted), warning_banner: false };
            }
        }

        LinkAnnotation::none()
    }

    /// The configured color for a highlight kind.
    pub fn color_for(&self, highlight: Highlight) -> &str {
        match highlight {
            Highlight::Trusted => &self.settings.trusted_color,
            Highlight::Untrusted => &self.settings.untrusted_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StoredLists;

    fn highlighter(unsafe_sites: &[&str], safe_sites: &[&str]) -> Highlighter {
        let lists = StoredLists {
            unsafe_sites: unsafe_sites.iter().map(|s| s.to_string()).collect(),
            safe_sites: safe_sites.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        Highlighter::new(&ListSnapshot::build(&lists), OverrideSets::new(), Settings::default())
    }

    #[test]
    fn test_unsafe_link_gets_highlight_and_banner() {
        let mut h = highlighter(&["https://evil.com"], &[]);
        let annotation = h.annotate_link("https://evil.com/page", "search.example");
        assert_eq!(annotation.highlight, Some(Highlight::Untrusted));
        assert!(annotation.warning_banner);
    }

    #[test]
    fn test_banner_appears_once_per_domain() {
        let mut h = highlighter(&["https://evil.com"], &[]);
        assert!(h.annotate_link("https://evil.com/a", "search.example").warning_banner);
        assert!(!h.annotate_link("https://evil.com/b", "search.example").warning_banner);
    }

    #[test]
    fn test_highlight_cap_per_domain() {
        let mut h = highlighter(&[], &["https://good.com"]);
        for _ in 0..MAX_HIGHLIGHTS_PER_DOMAIN {
            let annotation = h.annotate_link("https://good.com/x", "search.example");
            assert_eq!(annotation.highlight, Some(Highlight::Trusted));
        }
        let over_cap = h.annotate_link("https://good.com/x", "search.example");
        assert_eq!(over_cap.highlight, None);
    }

    #[test]
    fn test_user_trust_override_wins_over_unsafe_list() {
        let lists = StoredLists {
            unsafe_sites: vec!["https://evil.com".to_string()],
            ..Default::default()
        };
        let mut overrides = OverrideSets::new();
        overrides.trust("evil.com");
        let mut h =
            Highlighter::new(&ListSnapshot::build(&lists), overrides, Settings::default());

        let annotation = h.annotate_link("https://evil.com/page", "search.example");
        assert_eq!(annotation.highlight, Some(Highlight::Trusted));
        assert!(!annotation.warning_banner);
    }

    #[test]
    fn test_user_distrust_override_wins_over_safe_list() {
        let lists = StoredLists {
            safe_sites: vec!["https://good.com".to_string()],
            ..Default::default()
        };
        let mut overrides = OverrideSets::new();
        overrides.distrust("good.com");
        let mut h =
            Highlighter::new(&ListSnapshot::build(&lists), overrides, Settings::default());

        let annotation = h.annotate_link("https://good.com", "search.example");
        assert_eq!(annotation.highlight, Some(Highlight::Untrusted));
    }

    #[test]
    fn test_internal_links_on_safe_page_skipped() {
        let mut h = highlighter(&[], &["https://good.com"]);
        let annotation = h.annotate_link("https://good.com/about", "good.com");
        assert!(annotation.is_none());
        // The same link from another page still highlights.
        let from_elsewhere = h.annotate_link("https://good.com/about", "search.example");
        assert_eq!(from_elsewhere.highlight, Some(Highlight::Trusted));
    }

    #[test]
    fn test_toggles_disable_highlighting() {
        let lists = StoredLists {
            unsafe_sites: vec!["https://evil.com".to_string()],
            ..Default::default()
        };
        let settings = Settings {
            highlight_untrusted: false,
            show_warning_banners: false,
            ..Default::default()
        };
        let mut h = Highlighter::new(&ListSnapshot::build(&lists), OverrideSets::new(), settings);
        assert!(h.annotate_link("https://evil.com", "search.example").is_none());
    }

    #[test]
    fn test_unhighlightable_links_are_ignored() {
        let mut h = highlighter(&["https://evil.com"], &[]);
        assert!(h.annotate_link("javascript:void(0)", "search.example").is_none());
        assert!(h.annotate_link("#fragment", "search.example").is_none());
    }
}
