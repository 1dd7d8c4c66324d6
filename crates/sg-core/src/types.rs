//! Core type definitions for SafeGuard
//!
//! These types are shared between the classification engine, the refresh
//! driver and the persisted state file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Site Status
// =============================================================================

/// Classification verdict for a URL.
///
/// Priority is fixed: `Unsafe` > `PotentiallyUnsafe` > `Fmhy` > `Starred` >
/// `Safe` > `NoData`. `ExtensionPage` is reserved for the caller's own
/// internal pages and short-circuits resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    Unsafe,
    PotentiallyUnsafe,
    Fmhy,
    Starred,
    Safe,
    ExtensionPage,
    NoData,
}

impl SiteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unsafe => "unsafe",
            Self::PotentiallyUnsafe => "potentially_unsafe",
            Self::Fmhy => "fmhy",
            Self::Starred => "starred",
            Self::Safe => "safe",
            Self::ExtensionPage => "extension_page",
            Self::NoData => "no_data",
        }
    }
}

impl std::fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution result: the status plus the list entry (or candidate
/// spelling) that produced the match, for display and audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: SiteStatus,
    pub matched: Option<String>,
}

impl Verdict {
    pub fn no_data() -> Self {
        Self { status: SiteStatus::NoData, matched: None }
    }

    pub fn of(status: SiteStatus, matched: impl Into<String>) -> Self {
        Self { status, matched: Some(matched.into()) }
    }
}

// =============================================================================
// Update Frequency
// =============================================================================

/// How often the remote lists are refreshed.
///
/// Unknown values are a contract violation from the settings store;
/// they deserialize to `Unknown` and are treated as never due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpdateFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    #[serde(other)]
    Unknown,
}

impl UpdateFrequency {
    /// Refresh threshold in hours, `None` for `Unknown`.
    pub fn threshold_hours(self) -> Option<i64> {
        match self {
            Self::Daily => Some(24),
            Self::Weekly => Some(168),
            Self::Monthly => Some(720),
            Self::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for UpdateFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UpdateFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!("unknown update frequency '{other}'")),
        }
    }
}

// =============================================================================
// Stored Lists
// =============================================================================

/// The five reputation lists as persisted: flat arrays of normalized URLs.
/// Matchers are compiled from these in memory and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredLists {
    pub unsafe_sites: Vec<String>,
    pub potentially_unsafe_sites: Vec<String>,
    pub fmhy_sites: Vec<String>,
    pub safe_sites: Vec<String>,
    pub starred_sites: Vec<String>,
}

impl StoredLists {
    pub fn counts(&self) -> ListCounts {
        ListCounts {
            unsafe_sites: self.unsafe_sites.len(),
            potentially_unsafe_sites: self.potentially_unsafe_sites.len(),
            fmhy_sites: self.fmhy_sites.len(),
            safe_sites: self.safe_sites.len(),
            starred_sites: self.starred_sites.len(),
        }
    }
}

/// Per-list entry counts, persisted next to the lists for quick display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListCounts {
    pub unsafe_sites: usize,
    pub potentially_unsafe_sites: usize,
    pub fmhy_sites: usize,
    pub safe_sites: usize,
    pub starred_sites: usize,
}

/// Broadcast to listeners after each successful refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSummary {
    pub counts: ListCounts,
    pub refreshed_at: DateTime<Utc>,
    /// Sources that failed this cycle and kept their previous entries.
    pub sources_failed: usize,
}

// =============================================================================
// Settings
// =============================================================================

/// User-facing settings, persisted alongside the lists.
///
/// `user_trusted_domains` and `user_untrusted_domains` feed the highlight
/// decision only; the resolver does not consult them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: String,
    pub warning_page: bool,
    pub update_frequency: UpdateFrequency,
    pub highlight_trusted: bool,
    pub highlight_untrusted: bool,
    pub show_warning_banners: bool,
    pub trusted_color: String,
    pub untrusted_color: String,
    pub user_trusted_domains: Vec<String>,
    pub user_untrusted_domains: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "system".to_string(),
            warning_page: true,
            update_frequency: UpdateFrequency::Daily,
            highlight_trusted: true,
            highlight_untrusted: true,
            show_warning_banners: true,
            trusted_color: "#32cd32".to_string(),
            untrusted_color: "#ff4444".to_string(),
            user_trusted_domains: Vec::new(),
            user_untrusted_domains: Vec::new(),
        }
    }
}
