//! Remote list sources
//!
//! The curated lists live in public git repositories and are fetched as
//! raw text, best-effort GET only. The [`TextSource`] seam keeps the
//! refresh cycle testable without a network.

use std::time::Duration;

use async_trait::async_trait;

// =============================================================================
// Source Catalog
// =============================================================================

/// Adblock-style site list: definitely unsafe.
pub const UNSAFE_FILTERLIST_URL: &str =
    "https://raw.githubusercontent.com/fmhy/FMHYFilterlist/refs/heads/main/sitelist.txt";

/// Adblock-style site list: potentially unsafe.
pub const POTENTIALLY_UNSAFE_FILTERLIST_URL: &str =
    "https://raw.githubusercontent.com/fmhy/FMHYFilterlist/refs/heads/main/sitelist-plus.txt";

/// Adblock-style site list: the list project's own domains.
pub const FMHY_FILTERLIST_URL: &str =
    "https://raw.githubusercontent.com/fmhy/FMHY-SafeGuard/refs/heads/main/fmhy-filterlist.txt";

/// Markdown guide documents; every URL they link is a safe site.
pub const SAFE_GUIDE_URLS: &[&str] = &[
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/adblockvpnguide.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/ai.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/android-iosguide.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/audiopiracyguide.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/devtools.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/downloadpiracyguide.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/edupiracyguide.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/file-tools.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/gaming-tools.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/gamingpiracyguide.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/img-tools.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/internet-tools.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/linuxguide.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/miscguide.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/non-english.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/nsfwpiracy.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/readingpiracyguide.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/social-media-tools.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/storage.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/system-tools.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/text-tools.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/torrentpiracyguide.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/video-tools.md",
    "https://raw.githubusercontent.com/fmhy/edit/refs/heads/main/docs/videopiracyguide.md",
];

/// Bookmark-export HTML of starred entries.
pub const STARRED_BOOKMARKS_URL: &str =
    "https://raw.githubusercontent.com/fmhy/bookmarks/refs/heads/main/fmhy_in_bookmarks_starred_only.html";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Fetching
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Something that can fetch a text document by URL.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP implementation with a bounded per-request timeout.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TextSource for HttpSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }
        Ok(response.text().await?)
    }
}
