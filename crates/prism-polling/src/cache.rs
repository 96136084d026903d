//! The TTL snapshot cache for polled quotes.
//!
//! External APIs are queried at most once per poll interval; in between,
//! callers get a clone of the cached sheet. The whole pull path holds the
//! cache lock, so concurrent callers queue rather than stampede the
//! sources.

use tokio::sync::Mutex;

use crate::config::PollingConfig;
use crate::quotes::QuoteSheet;
use crate::sources::{self, DEFAULT_SOURCE};
use crate::Result;

/// Minimum seconds between source queries (just shy of ten minutes).
pub const MIN_POLL_INTERVAL: i64 = 580;

#[derive(Debug, Default)]
struct CacheState {
    /// The last successfully fetched sheet.
    last: Option<QuoteSheet>,
    /// Unix timestamp when the last fetch started; zero means never.
    last_fetch: i64,
}

/// Snapshot cache: the node's single polling entry point.
///
/// An explicit object passed by reference wherever a snapshot is needed,
/// holding "last value + last fetch time" behind a mutex.
#[derive(Debug)]
pub struct SnapshotCache {
    state: Mutex<CacheState>,
    config: PollingConfig,
    client: reqwest::Client,
}

impl SnapshotCache {
    /// Create an empty cache with the given configuration.
    pub fn new(config: PollingConfig) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Produce the current quote sheet, querying the sources only when the
    /// cached one has expired.
    ///
    /// `now` is the caller's Unix timestamp; freshness is judged against
    /// the configured poll interval. A failed fetch resets the cache clock
    /// so the next call retries immediately rather than serving nothing for
    /// a full interval.
    pub async fn pull(&self, now: i64) -> Result<QuoteSheet> {
        let mut state = self.state.lock().await;

        if state.last_fetch != 0 && now - state.last_fetch < self.config.poll_interval_secs {
            if let Some(sheet) = &state.last {
                return Ok(sheet.jittered(self.config.randomize));
            }
        }

        let delta = now - state.last_fetch;
        state.last_fetch = now;
        tracing::info!(delta_time = delta, "pulling asset quote data");

        let source = sources::pick_weighted(&self.config.source_weights, DEFAULT_SOURCE);
        let mut sheet = QuoteSheet::new();
        if let Err(e) = sources::fetch_named(&source, &self.client, &mut sheet).await {
            state.last_fetch = 0; // retry on the next call
            return Err(e);
        }

        tracing::debug!(source = %source, quotes = sheet.len(), "asset quote pull complete");
        state.last = Some(sheet.clone());
        Ok(sheet.jittered(self.config.randomize))
    }
}
