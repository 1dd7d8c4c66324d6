//! Periodic refresh loop
//!
//! Foreground daemon: wake on the interval derived from the configured
//! frequency, refresh when due, repeat until interrupted. The frequency
//! is re-read from the state file on every wake, so a settings change
//! takes effect on the next cycle. There is only ever the one timer,
//! recreated each iteration, never stacked.

use std::time::Duration;

use chrono::Utc;

use sg_core::store::{should_refresh, ListStore};
use sg_core::types::UpdateFrequency;

use crate::refresh::RefreshDriver;
use crate::sources::TextSource;
use crate::state::StateFile;

/// How long to sleep between wake-ups for a frequency. `Unknown` never
/// refreshes but still wakes daily to notice a corrected setting.
fn wake_interval(frequency: UpdateFrequency) -> Duration {
    let hours = frequency.threshold_hours().unwrap_or(24);
    Duration::from_secs(hours as u64 * 3600)
}

/// Run the watch loop until ctrl-c.
pub async fn run_watch(
    store: &ListStore,
    state_file: &StateFile,
    driver: &RefreshDriver,
    source: &dyn TextSource,
) -> Result<(), String> {
    loop {
        let state = state_file.load();
        let frequency = state.settings.update_frequency;

        if should_refresh(Utc::now(), state.last_updated, frequency) {
            if let Err(err) = driver.run(store, state_file, source).await {
                // Persistence trouble is not fatal to the loop; the next
                // wake retries.
                log::warn!("refresh cycle failed: {err}");
            }
        } else {
            log::info!("lists are fresh; next check after the {frequency} interval");
        }

        let sleep_for = wake_interval(frequency);
        tokio::select! {
            _ = tokio::time::sleep(sleep_for) => {}
            _ = tokio::signal::ctrl_c() => {
                log::info!("shutting down watch loop");
                return Ok(());
            }
        }
    }
}
