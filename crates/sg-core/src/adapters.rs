//! Per-site annotation strategy
//!
//! Different result pages need different DOM plumbing (some engines render
//! results lazily and need polling, some rewrite outbound links). That
//! variation lives behind [`SiteAdapter`] implementations supplied by the
//! annotating collaborator; the engine only decides *where* annotation
//! applies at all, via [`SearchSiteCatalog`].

use crate::highlight::LinkAnnotation;
use crate::url::normalize_domain;

/// Strategy for annotating links on one family of sites. Implemented by
/// collaborators that own the page; `annotate` performs the actual
/// marking (DOM mutation, terminal markup, ...).
pub trait SiteAdapter {
    /// Whether this adapter handles pages served from `page_domain`.
    fn supports(&self, page_domain: &str) -> bool;

    /// Apply a decided annotation to one link.
    fn annotate(&self, link_url: &str, annotation: &LinkAnnotation);
}

/// Search-result pages where link annotation applies, minus the list
/// project's own mirrors (annotating the curated list itself is noise).
#[derive(Debug, Clone)]
pub struct SearchSiteCatalog {
    engines: &'static [&'static str],
    excluded: &'static [&'static str],
}

/// Engines are matched by substring so country TLDs and self-hosted
/// instances ("google.", "searx.", "whoogle.") are covered.
const SEARCH_ENGINES: &[&str] = &[
    "google.com",
    "google.",
    "bing.com",
    "duckduckgo.com",
    "librey.org",
    "4get.ca",
    "mojeek.com",
    "qwant.com",
    "swisscows.com",
    "yacy.net",
    "startpage.com",
    "search.brave.com",
    "ekoru.org",
    "gibiru.com",
    "searx.org",
    "searx.",
    "searxng.",
    "whoogle.",
    "metager.org",
    "ecosia.org",
    "yandex.com",
    "yandex.",
    "yahoo.com",
    "yahoo.",
    "baidu.com",
    "naver.com",
    "seznam.cz",
];

const EXCLUDED_DOMAINS: &[&str] = &[
    "fmhy.net",
    "fmhy.pages.dev",
    "fmhy.lol",
    "fmhy.vercel.app",
    "fmhy.xyz",
];

impl SearchSiteCatalog {
    pub fn new() -> Self {
        Self { engines: SEARCH_ENGINES, excluded: EXCLUDED_DOMAINS }
    }

    /// True when links on `page_domain` should be annotated.
    pub fn supports(&self, page_domain: &str) -> bool {
        let domain = normalize_domain(page_domain);
        if self.excluded.iter().any(|excluded| domain.ends_with(excluded)) {
            return false;
        }
        self.engines.iter().any(|engine| domain.contains(engine))
    }
}

impl Default for SearchSiteCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_supports_search_engines() {
        let catalog = SearchSiteCatalog::new();
        assert!(catalog.supports("www.google.com"));
        assert!(catalog.supports("google.co.uk"));
        assert!(catalog.supports("duckduckgo.com"));
        assert!(catalog.supports("searx.my-instance.net"));
    }

    #[test]
    fn test_rejects_ordinary_sites() {
        let catalog = SearchSiteCatalog::new();
        assert!(!catalog.supports("example.com"));
        assert!(!catalog.supports("news.ycombinator.com"));
    }

    #[test]
    fn test_rejects_list_mirrors() {
        let catalog = SearchSiteCatalog::new();
        assert!(!catalog.supports("fmhy.net"));
        assert!(!catalog.supports("www.fmhy.pages.dev"));
    }

    #[test]
    fn test_adapter_seam() {
        struct Recorder {
            catalog: SearchSiteCatalog,
            seen: RefCell<Vec<String>>,
        }
        impl SiteAdapter for Recorder {
            fn supports(&self, page_domain: &str) -> bool {
                self.catalog.supports(page_domain)
            }
            fn annotate(&self, link_url: &str, _annotation: &LinkAnnotation) {
                self.seen.borrow_mut().push(link_url.to_string());
            }
        }

        let adapter = Recorder { catalog: SearchSiteCatalog::new(), seen: RefCell::new(Vec::new()) };
        assert!(adapter.supports("bing.com"));
        adapter.annotate("https://example.com", &LinkAnnotation::none());
        assert_eq!(adapter.seen.borrow().len(), 1);
    }
}
