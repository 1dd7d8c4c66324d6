//! SafeGuard List Parsers
//!
//! This crate turns raw fetched text into URL entries: adblock-style
//! filter lines, Markdown-embedded URLs, and bookmark-export HTML. Each
//! parser is independent and best-effort; malformed entries are dropped
//! one at a time, never failing a whole document.

pub mod bookmarks;
pub mod filter;
pub mod markdown;

pub use bookmarks::extract_bookmark_urls;
pub use filter::parse_filter_list;
pub use markdown::{extract_markdown_urls, extract_starred_urls};
