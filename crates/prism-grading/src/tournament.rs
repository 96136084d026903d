//! Drop-worst elimination rounds over a validated cohort.
//!
//! Each round recomputes the cohort average, grades every record against
//! it, and eliminates the single worst record. The average therefore drifts
//! toward the records that agree with each other, and outliers fall away
//! first. Rounds repeat until [`WINNER_COUNT`] records remain; those are
//! graded once more against their own average and ranked best-first.

use prism_types::WINNER_COUNT;

use crate::consensus::{average, grade};
use crate::{GradedOpr, OprError, Result};

/// Largest number of records admitted to the elimination rounds. When more
/// arrive for one height, only the highest self-reported difficulties
/// compete.
pub const TRIM_TO: usize = 50;

/// Run the full elimination tournament over one height's cohort.
///
/// Returns the surviving records graded against the final average and
/// sorted ascending by grade; the first [`WINNER_COUNT`] are the round's
/// winners. A cohort of [`WINNER_COUNT`] or fewer records skips the
/// elimination rounds and is only graded and ranked.
///
/// Ties are deterministic: equal difficulties keep their input order at the
/// trim, an equal-grade elimination drops the later record, and the final
/// sort is stable.
///
/// # Errors
///
/// [`OprError::EmptyCohort`] if `cohort` is empty.
pub fn grade_cohort(mut cohort: Vec<GradedOpr>) -> Result<Vec<GradedOpr>> {
    if cohort.is_empty() {
        return Err(OprError::EmptyCohort);
    }

    if cohort.len() > TRIM_TO {
        cohort.sort_by(|a, b| b.self_reported_difficulty.cmp(&a.self_reported_difficulty));
        cohort.truncate(TRIM_TO);
    }

    while cohort.len() > WINNER_COUNT {
        let avg = average(&cohort)?;
        for opr in cohort.iter_mut() {
            grade(&avg, opr);
        }

        let mut worst = 0;
        for (i, opr) in cohort.iter().enumerate() {
            if opr.grade >= cohort[worst].grade {
                worst = i;
            }
        }
        let dropped = cohort.remove(worst);
        tracing::debug!(
            entry = %hex::encode(dropped.entry_hash),
            grade = dropped.grade,
            remaining = cohort.len(),
            "eliminated worst graded record"
        );
    }

    let avg = average(&cohort)?;
    for opr in cohort.iter_mut() {
        grade(&avg, opr);
    }
    cohort.sort_by(|a, b| a.grade.total_cmp(&b.grade));

    Ok(cohort)
}
