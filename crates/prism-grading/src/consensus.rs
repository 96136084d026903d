//! Per-asset cohort average and quartic-deviation grade.
//!
//! Both primitives must be bit-for-bit reproducible across independently
//! operated nodes: the average sums first in canonical asset order and then
//! divides once per asset, and the grade accumulates `d*d*d*d` in that same
//! order. Reordering the arithmetic would fork consensus.

use prism_types::assets::V1_ASSETS;

use crate::{GradedOpr, OprError, Result};

/// Compute the per-asset mean magnitude across a cohort.
///
/// Each value contributes its absolute value: a submission cannot use
/// negative prices to cancel out or invert the consensus reference.
///
/// # Errors
///
/// [`OprError::EmptyCohort`] if `cohort` is empty.
pub fn average(cohort: &[GradedOpr]) -> Result<Vec<f64>> {
    if cohort.is_empty() {
        return Err(OprError::EmptyCohort);
    }

    let mut avg = vec![0.0f64; V1_ASSETS.len()];
    for opr in cohort {
        for (slot, value) in avg.iter_mut().zip(opr.record.ordered_values()) {
            *slot += value.abs();
        }
    }

    let total = cohort.len() as f64;
    for slot in &mut avg {
        *slot /= total;
    }

    Ok(avg)
}

/// Grade one record against the cohort average, writing the result into
/// `opr.grade` and returning it.
///
/// The grade is the sum over asset positions of the fourth power of the
/// relative deviation from the average, so records far from consensus fall
/// off much faster than mildly-off ones. Lower is better; the result is
/// always >= 0 with no upper bound. Positions whose average is zero
/// contribute nothing (only legal for the native-token placeholder).
///
/// A repeated call overwrites the previous grade, it never accumulates
/// across calls.
pub fn grade(avg: &[f64], opr: &mut GradedOpr) -> f64 {
    opr.grade = 0.0;
    for (value, mean) in opr.record.ordered_values().into_iter().zip(avg.iter().copied()) {
        if mean > 0.0 {
            let d = (value - mean) / mean;
            opr.grade += d * d * d * d;
        }
    }
    opr.grade
}
