//! Per-exercise best estimated one-rep-max and strength ratios.
//!
//! Everything here is recomputed from the complete record set on each
//! call. Exercise names are matched by exact string equality.

use crate::one_rep_max::rounded_one_rep_max;
use crate::{Bodyweight, Workout};
use std::collections::BTreeMap;

/// Best rounded one-rep-max estimate per exercise name
///
/// Workouts whose rep count has no estimate are skipped.
pub fn best_estimated_maxes(workouts: &[Workout]) -> BTreeMap<String, f64> {
    let mut maxes: BTreeMap<String, f64> = BTreeMap::new();

    for workout in workouts {
        let Some(estimate) = rounded_one_rep_max(workout.weight, workout.reps) else {
            tracing::debug!(
                "Skipping workout {} ({} reps): no one-rep-max estimate",
                workout.id,
                workout.reps
            );
            continue;
        };

        maxes
            .entry(workout.name.clone())
            .and_modify(|best| {
                if estimate > *best {
                    *best = estimate;
                }
            })
            .or_insert(estimate);
    }

    maxes
}

/// The most recent bodyweight entry
///
/// Latest date wins; among entries sharing that date the highest id wins.
pub fn latest_bodyweight(bodyweights: &[Bodyweight]) -> Option<&Bodyweight> {
    bodyweights
        .iter()
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
}

/// Each exercise max divided by the given bodyweight
///
/// Empty when there is no bodyweight or it is zero.
pub fn strength_ratios(
    maxes: &BTreeMap<String, f64>,
    bodyweight: Option<&Bodyweight>,
) -> BTreeMap<String, f64> {
    match bodyweight {
        Some(entry) if entry.weight > 0.0 => maxes
            .iter()
            .map(|(name, max)| (name.clone(), max / entry.weight))
            .collect(),
        _ => BTreeMap::new(),
    }
}
