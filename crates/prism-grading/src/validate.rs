//! Protocol-v1 entry validation.
//!
//! Turns a raw ledger entry into a [`GradedOpr`] or rejects it with a typed
//! error. Checks run in a fixed order and short-circuit on the first
//! failure; a rejected entry contributes nothing to the cohort and a
//! [`GradedOpr`] is never partially constructed.

use sha2::{Digest, Sha256};

use prism_types::record::PriceRecord;
use prism_types::{assets, EntryHash, OPR_VERSION, WINNER_COUNT};

use crate::winners::{verify_winner_format, verify_winner_set};
use crate::{GradedOpr, OprError, Result};

/// Validate a raw ledger entry against protocol version 1.
///
/// `height` and `previous_winners` come from ledger context and are the
/// trusted side of each comparison; everything in `ext_ids` and `content`
/// is adversarial input.
///
/// The entry's external id layout is fixed: index 0 is the miner nonce
/// (opaque), index 1 the self-reported difficulty (8 bytes, big-endian
/// u64), index 2 the version tag (1 byte, must equal [`OPR_VERSION`]).
///
/// # Errors
///
/// - [`OprError::Decode`] when `content` is not a well-formed price record
/// - [`OprError::Validate`] for any protocol-rule violation
pub fn validate_v1(
    entry_hash: &[u8],
    ext_ids: &[Vec<u8>],
    height: i32,
    previous_winners: &[String],
    content: &[u8],
) -> Result<GradedOpr> {
    let entry_hash: EntryHash = entry_hash
        .try_into()
        .map_err(|_| OprError::Validate("invalid entry hash length".into()))?;

    if ext_ids.len() != 3 {
        return Err(OprError::Validate("invalid extid count".into()));
    }

    if ext_ids[2].len() != 1 || ext_ids[2][0] != OPR_VERSION {
        return Err(OprError::Validate("invalid version".into()));
    }

    let difficulty: [u8; 8] = ext_ids[1]
        .as_slice()
        .try_into()
        .map_err(|_| OprError::Validate("self reported difficulty must be 8 bytes".into()))?;

    let record: PriceRecord =
        serde_json::from_slice(content).map_err(|e| OprError::Decode(e.to_string()))?;

    if record.height != height {
        return Err(OprError::Validate("invalid height".into()));
    }

    for code in assets::V1_ASSETS {
        match record.assets.get(code) {
            None => return Err(OprError::Validate("asset list is not correct".into())),
            Some(&v) if code != assets::NATIVE_ASSET && v == 0.0 => {
                return Err(OprError::Validate(
                    "all values other than PNT must be nonzero".into(),
                ));
            }
            Some(_) => {}
        }
    }
    // every schema code is present, so a larger mapping carries extras
    if record.assets.len() != assets::V1_ASSETS.len() {
        return Err(OprError::Validate("asset list is not correct".into()));
    }

    if !verify_winner_format(&record.previous_winners, WINNER_COUNT) {
        return Err(OprError::Validate("invalid list of previous winners".into()));
    }

    if !verify_winner_set(&record.previous_winners, previous_winners) {
        return Err(OprError::Validate("incorrect set of previous winners".into()));
    }

    // identity is the digest of the raw bytes, not of the decoded structure
    let opr_hash: [u8; 32] = Sha256::digest(content).into();

    Ok(GradedOpr {
        entry_hash,
        nonce: ext_ids[0].clone(),
        self_reported_difficulty: u64::from_be_bytes(difficulty),
        opr_hash,
        record,
        grade: 0.0,
    })
}
