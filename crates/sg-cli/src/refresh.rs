//! Refresh cycle
//!
//! One cycle fetches every remote source concurrently, parses what
//! arrived, rebuilds the stored lists, persists them and installs the new
//! snapshot. Failures are contained per source: a failed fetch keeps that
//! list's previous entries, never clearing it to empty. Cycles are
//! serialized by an in-flight guard so two refreshes can never interleave
//! their store mutations.

use chrono::Utc;
use futures_util::future::join_all;
use tokio::sync::Mutex;

use sg_core::store::ListStore;
use sg_core::types::RefreshSummary;
use sg_core::url::normalize_all;
use sg_lists::{extract_bookmark_urls, extract_markdown_urls, parse_filter_list};

use crate::sources::{
    TextSource, FMHY_FILTERLIST_URL, POTENTIALLY_UNSAFE_FILTERLIST_URL, SAFE_GUIDE_URLS,
    STARRED_BOOKMARKS_URL, UNSAFE_FILTERLIST_URL,
};
use crate::state::{StateError, StateFile};

/// Serializes refresh cycles. One driver is shared by every caller that
/// can trigger a refresh.
pub struct RefreshDriver {
    in_flight: Mutex<()>,
}

impl RefreshDriver {
    pub fn new() -> Self {
        Self { in_flight: Mutex::new(()) }
    }

    /// Run one full refresh cycle against `source`, persisting into
    /// `state_file` and installing the result into `store`.
    pub async fn run(
        &self,
        store: &ListStore,
        state_file: &StateFile,
        source: &dyn TextSource,
    ) -> Result<RefreshSummary, StateError> {
        let _guard = self.in_flight.lock().await;

        let mut state = state_file.load();
        let mut sources_failed = 0usize;

        log::info!("refreshing lists from remote sources");
        let (unsafe_sites, potentially_unsafe_sites, fmhy_sites, safe_sites, starred_sites) = tokio::join!(
            fetch_filter_list(source, UNSAFE_FILTERLIST_URL),
            fetch_filter_list(source, POTENTIALLY_UNSAFE_FILTERLIST_URL),
            fetch_filter_list(source, FMHY_FILTERLIST_URL),
            fetch_safe_sites(source),
            fetch_starred_sites(source),
        );

        let mut apply = |fetched: Option<Vec<String>>, previous: &mut Vec<String>| {
            match fetched {
                Some(entries) => *previous = entries,
                None => sources_failed += 1,
            }
        };
        apply(unsafe_sites, &mut state.lists.unsafe_sites);
        apply(potentially_unsafe_sites, &mut state.lists.potentially_unsafe_sites);
        apply(fmhy_sites, &mut state.lists.fmhy_sites);
        apply(safe_sites, &mut state.lists.safe_sites);

        // Starred entries accumulate: the export only ever grows, and a
        // shrunken export must not drop previously starred sites.
        match starred_sites {
            Some(fresh) => {
                let mut merged = fresh;
                for previous in &state.lists.starred_sites {
                    if !merged.contains(previous) {
                        merged.push(previous.clone());
                    }
                }
                state.lists.starred_sites = merged;
            }
            None => sources_failed += 1,
        }

        let refreshed_at = Utc::now();
        state.counts = state.lists.counts();
        state.last_updated = Some(refreshed_at);
        state_file.save(&state)?;

        store.install(&state.lists);

        let summary = RefreshSummary { counts: state.counts, refreshed_at, sources_failed };
        store.notify_listeners(&summary);

        log::info!(
            "refresh complete: {} unsafe, {} potentially unsafe, {} fmhy, {} safe, {} starred ({} sources failed)",
            summary.counts.unsafe_sites,
            summary.counts.potentially_unsafe_sites,
            summary.counts.fmhy_sites,
            summary.counts.safe_sites,
            summary.counts.starred_sites,
            sources_failed,
        );
        Ok(summary)
    }
}

impl Default for RefreshDriver {
    fn default() -> Self {
        Self::new()
    }
}

async fn fetch_filter_list(source: &dyn TextSource, url: &str) -> Option<Vec<String>> {
    match source.fetch_text(url).await {
        Ok(text) => Some(parse_filter_list(&text)),
        Err(err) => {
            log::warn!("skipping filter list {url} this cycle: {err}");
            None
        }
    }
}

/// The safe list spans many guide documents; documents that fail are
/// skipped individually, and only a cycle where every document failed
/// keeps the previous list.
async fn fetch_safe_sites(source: &dyn TextSource) -> Option<Vec<String>> {
    let fetches = SAFE_GUIDE_URLS.iter().map(|url| source.fetch_text(url));
    let results = join_all(fetches).await;

    let mut raw_urls = Vec::new();
    let mut succeeded = 0usize;
    for (url, result) in SAFE_GUIDE_URLS.iter().zip(results) {
        match result {
            Ok(markdown) => {
                succeeded += 1;
                raw_urls.extend(extract_markdown_urls(&markdown));
            }
            Err(err) => log::warn!("skipping safe guide {url} this cycle: {err}"),
        }
    }

    if succeeded == 0 {
        return None;
    }
    Some(normalize_all(raw_urls.iter().map(String::as_str)))
}

async fn fetch_starred_sites(source: &dyn TextSource) -> Option<Vec<String>> {
    match source.fetch_text(STARRED_BOOKMARKS_URL).await {
        Ok(html) => {
            let raw = extract_bookmark_urls(&html);
            Some(normalize_all(raw.iter().map(String::as_str)))
        }
        Err(err) => {
            log::warn!("skipping starred bookmarks this cycle: {err}");
            None
        }
    }
}
