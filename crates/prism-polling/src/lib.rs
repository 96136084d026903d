//! # prism-polling
//!
//! Price polling for the node's own submissions.
//!
//! The grading engine consumes an already-assembled snapshot of asset
//! prices when the node builds its current record; this crate produces
//! that snapshot. External APIs are queried at most once per poll interval
//! through [`cache::SnapshotCache`]; in between, callers receive the cached
//! sheet. Historical validation never touches this crate.
//!
//! ## Modules
//!
//! - [`quotes`] — quote sheets and rounding helpers
//! - [`sources`] — HTTP price sources and the retry policy
//! - [`cache`] — the TTL snapshot cache
//! - [`config`] — polling configuration

pub mod cache;
pub mod config;
pub mod quotes;
pub mod sources;

/// Error types for polling operations.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The HTTP request failed after exhausting retries.
    #[error("price source request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration selected a source this build does not know.
    #[error("unknown price source: {0}")]
    UnknownSource(String),
}

/// Convenience result type for polling operations.
pub type Result<T> = std::result::Result<T, PollError>;
