//! Process-wide list store
//!
//! One [`ListStore`] is constructed at process start and passed by handle
//! to the resolver and the refresh driver; there are no ambient globals.
//! The compiled snapshot is swapped wholesale behind an `RwLock<Arc<_>>`,
//! so resolutions running concurrently with a refresh observe either the
//! pre-refresh or the fully-post-refresh state, never a partial rebuild.

use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Duration, Utc};

use crate::resolver;
use crate::snapshot::ListSnapshot;
use crate::types::{RefreshSummary, StoredLists, UpdateFrequency, Verdict};

/// Callback invoked after each successful refresh. Failures are logged and
/// swallowed; one broken listener must not break the fan-out.
pub type Listener = Box<dyn Fn(&RefreshSummary) -> Result<(), String> + Send + Sync>;

/// Owner of the current compiled snapshot and the refresh listeners.
pub struct ListStore {
    snapshot: RwLock<Arc<ListSnapshot>>,
    listeners: Mutex<Vec<Listener>>,
}

impl ListStore {
    /// An empty store; every resolution returns `no_data` until lists are
    /// installed.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(ListSnapshot::empty())),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Compile `lists` into a fresh snapshot and swap it in atomically.
    /// Returns the installed snapshot.
    pub fn install(&self, lists: &StoredLists) -> Arc<ListSnapshot> {
        let compiled = Arc::new(ListSnapshot::build(lists));
        match self.snapshot.write() {
            Ok(mut guard) => *guard = Arc::clone(&compiled),
            Err(poisoned) => *poisoned.into_inner() = Arc::clone(&compiled),
        }
        compiled
    }

    /// Handle on the current snapshot. The `Arc` keeps resolving against a
    /// consistent view even if a refresh swaps the store mid-flight.
    pub fn current(&self) -> Arc<ListSnapshot> {
        match self.snapshot.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Resolve against the current snapshot. Read-only; may run
    /// concurrently with a refresh.
    pub fn resolve(&self, raw_url: &str, own_origin: Option<&str>) -> Verdict {
        resolver::resolve(&self.current(), raw_url, own_origin)
    }

    /// Register a listener for "lists updated" broadcasts.
    pub fn subscribe(&self, listener: Listener) {
        match self.listeners.lock() {
            Ok(mut guard) => guard.push(listener),
            Err(poisoned) => poisoned.into_inner().push(listener),
        }
    }

    /// Best-effort fan-out after a successful refresh.
    pub fn notify_listeners(&self, summary: &RefreshSummary) {
        let guard = match self.listeners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for listener in guard.iter() {
            if let Err(err) = listener(summary) {
                log::warn!("refresh listener failed: {err}");
            }
        }
    }
}

impl Default for ListStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a refresh cycle is due.
///
/// True when the lists have never been refreshed, or when the elapsed time
/// since `last_refreshed_at` reaches the frequency threshold. An `Unknown`
/// frequency is never due.
pub fn should_refresh(
    now: DateTime<Utc>,
    last_refreshed_at: Option<DateTime<Utc>>,
    frequency: UpdateFrequency,
) -> bool {
    let Some(last) = last_refreshed_at else {
        return true;
    };
    match frequency.threshold_hours() {
        Some(hours) => now.signed_duration_since(last) >= Duration::hours(hours),
        None => false,
    }
}
