//! Status resolution
//!
//! Pure lookup against a [`ListSnapshot`]: no I/O, no mutation, safe to run
//! concurrently with a refresh. Priority is fixed and must not change:
//! unsafe > potentially_unsafe > fmhy > starred > safe > no_data.
//!
//! Ordinary hosts get a fallback cascade: the exact normalized URL, its
//! trailing-slash toggle, then the root URL and its slash toggle for the
//! matcher lists, and host equality for the membership lists. Multi-tenant
//! repository hosts skip every domain-level step: a match must occur on the
//! specific path-bearing URL or not at all.

use crate::hosts::is_multi_tenant_host;
use crate::snapshot::{CompiledList, ListSnapshot, MembershipList};
use crate::types::{SiteStatus, Verdict};
use crate::url;

/// Resolve the classification of `raw_url` against `snapshot`.
///
/// `own_origin` is the caller's own page origin, if it has one; URLs under
/// it resolve to `extension_page` before any list is consulted. Invalid
/// input of any shape resolves to `no_data`, never an error.
pub fn resolve(snapshot: &ListSnapshot, raw_url: &str, own_origin: Option<&str>) -> Verdict {
    let raw = raw_url.trim();
    if raw.is_empty() {
        return Verdict::no_data();
    }

    if let Some(origin) = own_origin {
        if !origin.is_empty() && raw.starts_with(origin) {
            return Verdict { status: SiteStatus::ExtensionPage, matched: None };
        }
    }

    let Some(normalized) = url::normalize(raw) else {
        return Verdict::no_data();
    };
    let Some(host) = url::host_of(&normalized) else {
        return Verdict::no_data();
    };

    let exact_candidates = url::slash_variants(&normalized);

    let matcher_lists: [(&CompiledList, SiteStatus); 3] = [
        (&snapshot.unsafe_sites, SiteStatus::Unsafe),
        (&snapshot.potentially_unsafe_sites, SiteStatus::PotentiallyUnsafe),
        (&snapshot.fmhy_sites, SiteStatus::Fmhy),
    ];
    let membership_lists: [(&MembershipList, SiteStatus); 2] = [
        (&snapshot.starred_sites, SiteStatus::Starred),
        (&snapshot.safe_sites, SiteStatus::Safe),
    ];

    if is_multi_tenant_host(&host) {
        // Exact URL (and slash toggle) only; no domain-level fallback.
        for (list, status) in matcher_lists {
            if let Some(verdict) = find_in_matcher(list, &exact_candidates, status) {
                return verdict;
            }
        }
        for (list, status) in membership_lists {
            if let Some(verdict) = find_in_membership(list, &exact_candidates, status) {
                return verdict;
            }
        }
        return Verdict::no_data();
    }

    // Ordinary host: the matcher cascade also tries the root URL.
    let mut matcher_candidates = exact_candidates.clone();
    if let Some(root) = url::root_url(&normalized) {
        for variant in url::slash_variants(&root) {
            if !matcher_candidates.contains(&variant) {
                matcher_candidates.push(variant);
            }
        }
    }

    for (list, status) in matcher_lists {
        if let Some(verdict) = find_in_matcher(list, &matcher_candidates, status) {
            return verdict;
        }
    }

    for (list, status) in membership_lists {
        if let Some(verdict) = find_in_membership(list, &exact_candidates, status) {
            return verdict;
        }
        // Domain-only fallback: any entry on the same host vouches for it.
        if let Some(entry) = list.entry_for_host(&host) {
            return Verdict::of(status, entry);
        }
    }

    Verdict::no_data()
}

fn find_in_matcher(list: &CompiledList, candidates: &[String], status: SiteStatus) -> Option<Verdict> {
    for candidate in candidates {
        if let Some(entry) = list.matcher().find(candidate) {
            return Some(Verdict::of(status, entry));
        }
    }
    None
}

fn find_in_membership(
    list: &MembershipList,
    candidates: &[String],
    status: SiteStatus,
) -> Option<Verdict> {
    for candidate in candidates {
        if list.contains(candidate) {
            return Some(Verdict::of(status, candidate.clone()));
        }
    }
    None
}
