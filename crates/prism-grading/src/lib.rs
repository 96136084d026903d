//! # prism-grading
//!
//! OPR validation and consensus grading for the Prism oracle network.
//!
//! Raw ledger entries pass one at a time through [`validate::validate_v1`],
//! producing the set of structurally valid [`GradedOpr`]s for a height (the
//! cohort). The cohort is then ranked: [`consensus::average`] produces the
//! reference price vector and [`consensus::grade`] scores each record
//! against it; [`tournament::grade_cohort`] repeats average→grade→drop-worst
//! until the round's winners remain.
//!
//! Every step is a pure computation over caller-supplied data and must be
//! bit-for-bit reproducible across independently operated nodes.
//!
//! ## Modules
//!
//! - [`validate`] — raw ledger entry validation
//! - [`winners`] — previous-winner list verification
//! - [`consensus`] — per-asset average and quartic-deviation grade
//! - [`tournament`] — drop-worst elimination rounds

pub mod consensus;
pub mod tournament;
pub mod validate;
pub mod winners;

use prism_types::record::PriceRecord;
use prism_types::{EntryHash, OprHash};

/// Error types for OPR processing. Both variants are terminal for the
/// single entry being processed, never fatal to the node.
#[derive(Debug, thiserror::Error)]
pub enum OprError {
    /// The entry content does not parse as a price record at all. Carries
    /// the underlying parser message.
    #[error("opr decode: {0}")]
    Decode(String),

    /// The entry parsed but violates a protocol rule.
    #[error("opr validation: {0}")]
    Validate(String),

    /// The aggregator requires at least one record.
    #[error("cannot aggregate an empty cohort")]
    EmptyCohort,
}

/// Convenience result type for grading operations.
pub type Result<T> = std::result::Result<T, OprError>;

/// A validated oracle price record, ready for grading.
///
/// Only the entry validator constructs these; an invalid entry never
/// produces one. Every field except `grade` is fixed at validation time.
#[derive(Debug, Clone)]
pub struct GradedOpr {
    /// Hash of the ledger entry this record arrived in.
    pub entry_hash: EntryHash,
    /// Miner nonce, copied opaque from the entry.
    pub nonce: Vec<u8>,
    /// Self-reported difficulty, big-endian decoded from the entry.
    pub self_reported_difficulty: u64,
    /// SHA-256 digest of the raw content payload. Identifies the record
    /// independently of `entry_hash` and of any re-serialization.
    pub opr_hash: OprHash,
    /// The decoded price record.
    pub record: PriceRecord,
    /// Consensus-deviation score, lower is better. Zero until a grading
    /// pass writes it; a never-graded record must not be ranked.
    pub grade: f64,
}
