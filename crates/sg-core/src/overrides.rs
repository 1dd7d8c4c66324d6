//! User trust overrides
//!
//! Two disjoint domain sets maintained by the user. Overrides win over
//! list membership for highlighting purposes; the background resolver
//! does not consult them (see DESIGN.md for the recorded asymmetry).

use std::collections::HashSet;

use crate::types::Settings;
use crate::url::normalize_domain;

/// A user's verdict on a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustOverride {
    Trusted,
    Untrusted,
}

/// The user's trusted/untrusted domain sets. Mutations keep the two sets
/// disjoint: trusting a domain removes it from the untrusted set and vice
/// versa.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSets {
    trusted: HashSet<String>,
    untrusted: HashSet<String>,
}

impl OverrideSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut sets = Self::new();
        for domain in &settings.user_trusted_domains {
            sets.trust(domain);
        }
        for domain in &settings.user_untrusted_domains {
            sets.distrust(domain);
        }
        sets
    }

    pub fn trust(&mut self, domain: &str) {
        let domain = normalize_domain(domain);
        self.untrusted.remove(&domain);
        self.trusted.insert(domain);
    }

    pub fn distrust(&mut self, domain: &str) {
        let domain = normalize_domain(domain);
        self.trusted.remove(&domain);
        self.untrusted.insert(domain);
    }

    pub fn forget(&mut self, domain: &str) {
        let domain = normalize_domain(domain);
        self.trusted.remove(&domain);
        self.untrusted.remove(&domain);
    }

    pub fn is_trusted(&self, domain: &str) -> bool {
        self.trusted.contains(&normalize_domain(domain))
    }

    pub fn is_untrusted(&self, domain: &str) -> bool {
        self.untrusted.contains(&normalize_domain(domain))
    }

    /// The user's override for a domain, untrusted taking precedence.
    pub fn lookup(&self, domain: &str) -> Option<TrustOverride> {
        let domain = normalize_domain(domain);
        if self.untrusted.contains(&domain) {
            Some(TrustOverride::Untrusted)
        } else if self.trusted.contains(&domain) {
            Some(TrustOverride::Trusted)
        } else {
            None
        }
    }

    pub fn trusted_domains(&self) -> impl Iterator<Item = &str> {
        self.trusted.iter().map(String::as_str)
    }

    pub fn untrusted_domains(&self) -> impl Iterator<Item = &str> {
        self.untrusted.iter().map(String::as_str)
    }
}
