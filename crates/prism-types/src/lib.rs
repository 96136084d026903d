//! # prism-types
//!
//! Shared domain types for the Prism oracle network.
//!
//! ## Modules
//!
//! - [`assets`] — the fixed, versioned asset schema
//! - [`record`] — the decoded shape of a submitted price record

pub mod assets;
pub mod record;

/// 32-byte hash of a ledger entry.
pub type EntryHash = [u8; 32];

/// 32-byte digest of a submitted record's raw content payload.
pub type OprHash = [u8; 32];

/// Number of winning records selected each grading round.
pub const WINNER_COUNT: usize = 10;

/// Length of a previous-winner identifier: the hex encoding of the first
/// 8 bytes of the winning entry's hash.
pub const WINNER_ID_LEN: usize = 16;

/// Protocol version accepted by the v1 validator. A different version tag
/// must be routed to a different validator, never silently accepted.
pub const OPR_VERSION: u8 = 1;
