//! The decoded shape of a submitted price record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assets;

/// A participant's price observations for one block height, decoded from
/// the JSON body of a ledger entry.
///
/// Decoding alone proves nothing: only the entry validator's full check
/// sequence establishes that the mapping covers the schema, the height
/// matches ledger context, and the winner list is honest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Block height the record claims to belong to.
    pub height: i32,
    /// Observed price per asset code.
    pub assets: BTreeMap<String, f64>,
    /// Identifiers of the previous round's winning entries.
    pub previous_winners: Vec<String>,
}

impl PriceRecord {
    /// Project the asset mapping into canonical schema order.
    ///
    /// Positional alignment across a cohort relies on this projection;
    /// callers must never index the mapping by its own iteration order.
    /// A code absent from the mapping projects to 0.0 (a validated record
    /// never has one).
    pub fn ordered_values(&self) -> Vec<f64> {
        assets::V1_ASSETS
            .iter()
            .map(|code| self.assets.get(*code).copied().unwrap_or(0.0))
            .collect()
    }
}
