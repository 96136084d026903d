//! Previous-winner list verification.
//!
//! Every submission must name the previous round's winning entries. The
//! list is format-checked first (length, identifier shape, no duplicates),
//! then compared as a set against the authoritative winners supplied from
//! ledger context.

use std::collections::BTreeSet;

use prism_types::WINNER_ID_LEN;

/// Check that `winners` has exactly `expected` entries, each a well-formed
/// identifier, with no duplicates.
///
/// An identifier is the hex encoding of the first 8 bytes of the winning
/// entry's hash: exactly [`WINNER_ID_LEN`] hex characters. Duplicates fail
/// here rather than being deduplicated downstream.
pub fn verify_winner_format(winners: &[String], expected: usize) -> bool {
    if winners.len() != expected {
        return false;
    }
    let mut seen = BTreeSet::new();
    for id in winners {
        if id.len() != WINNER_ID_LEN || hex::decode(id).is_err() {
            return false;
        }
        if !seen.insert(id.as_str()) {
            return false;
        }
    }
    true
}

/// Check that `claimed` and `authoritative` name the same entries,
/// regardless of order. Any extra or missing element fails.
pub fn verify_winner_set(claimed: &[String], authoritative: &[String]) -> bool {
    if claimed.len() != authoritative.len() {
        return false;
    }
    let claimed: BTreeSet<&str> = claimed.iter().map(String::as_str).collect();
    let authoritative: BTreeSet<&str> = authoritative.iter().map(String::as_str).collect();
    claimed == authoritative
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{i:016x}")).collect()
    }

    #[test]
    fn test_format_accepts_well_formed_list() {
        assert!(verify_winner_format(&ids(10), 10));
    }

    #[test]
    fn test_format_rejects_wrong_length() {
        assert!(!verify_winner_format(&ids(9), 10));
        assert!(!verify_winner_format(&ids(11), 10));
        assert!(!verify_winner_format(&[], 10));
    }

    #[test]
    fn test_format_rejects_malformed_identifier() {
        let mut winners = ids(10);
        winners[3] = "not-hex-at-all!!".to_string(); // right length, bad chars
        assert!(!verify_winner_format(&winners, 10));

        let mut winners = ids(10);
        winners[7] = "abc123".to_string(); // too short
        assert!(!verify_winner_format(&winners, 10));
    }

    #[test]
    fn test_format_rejects_duplicates() {
        let mut winners = ids(10);
        winners[9] = winners[0].clone();
        assert!(!verify_winner_format(&winners, 10));
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let claimed = ids(10);
        let mut authoritative = ids(10);
        authoritative.reverse();
        assert!(verify_winner_set(&claimed, &authoritative));
    }

    #[test]
    fn test_set_rejects_differing_element() {
        let claimed = ids(10);
        let mut authoritative = ids(10);
        authoritative[4] = format!("{:016x}", 0xdead_beef_u64);
        assert!(!verify_winner_set(&claimed, &authoritative));
    }

    #[test]
    fn test_set_rejects_length_mismatch() {
        assert!(!verify_winner_set(&ids(9), &ids(10)));
        assert!(!verify_winner_set(&ids(10), &ids(9)));
    }
}
