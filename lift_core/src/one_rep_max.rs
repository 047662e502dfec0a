//! One-rep-max estimation (Brzycki formula).

/// First rep count at which the Brzycki denominator reaches zero
pub const BRZYCKI_REP_LIMIT: u32 = 37;

/// Estimate the maximal single-repetition lift from a submaximal set
///
/// Returns `weight` unchanged for a single rep, otherwise
/// `weight / (1.0278 - 0.0278 * reps)`.
///
/// Returns `None` when the formula has no meaningful value: zero reps, or
/// `reps >= 37` where the denominator is zero or negative.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> Option<f64> {
    if reps == 0 || reps >= BRZYCKI_REP_LIMIT {
        return None;
    }
    if reps == 1 {
        return Some(weight);
    }
    Some(weight / (1.0278 - 0.0278 * f64::from(reps)))
}

/// Estimate rounded to the nearest whole pound, as used for aggregation
pub fn rounded_one_rep_max(weight: f64, reps: u32) -> Option<f64> {
    estimate_one_rep_max(weight, reps).map(f64::round)
}
