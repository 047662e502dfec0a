//! Date-indexed progress table for charting.
//!
//! One row per calendar date that has at least one estimable workout or a
//! bodyweight entry. No rows are synthesized for days without data.

use crate::one_rep_max::rounded_one_rep_max;
use crate::{Bodyweight, Workout};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Name of the date column in serialized rows
pub const DATE_KEY: &str = "date";

/// Name of the bodyweight column in serialized rows
pub const BODYWEIGHT_KEY: &str = "Bodyweight";

/// One time-series point
///
/// Serializes flat: `date`, one key per exercise, and `Bodyweight` when
/// present. An absent exercise means "no data", not zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartRow {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub lifts: BTreeMap<String, f64>,
    #[serde(rename = "Bodyweight", skip_serializing_if = "Option::is_none")]
    pub bodyweight: Option<f64>,
}

impl ChartRow {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            lifts: BTreeMap::new(),
            bodyweight: None,
        }
    }
}

/// Build the progress table, sorted ascending by date
///
/// Per date and exercise the largest rounded estimate is kept. When several
/// bodyweight entries share a date the last one in input order wins.
pub fn build_progress_table(workouts: &[Workout], bodyweights: &[Bodyweight]) -> Vec<ChartRow> {
    let mut rows: BTreeMap<NaiveDate, ChartRow> = BTreeMap::new();

    for workout in workouts {
        let Some(estimate) = rounded_one_rep_max(workout.weight, workout.reps) else {
            continue;
        };

        let row = rows
            .entry(workout.created_at)
            .or_insert_with(|| ChartRow::empty(workout.created_at));
        let best = row.lifts.entry(workout.name.clone()).or_insert(estimate);
        if estimate > *best {
            *best = estimate;
        }
    }

    for entry in bodyweights {
        rows.entry(entry.created_at)
            .or_insert_with(|| ChartRow::empty(entry.created_at))
            .bodyweight = Some(entry.weight);
    }

    tracing::debug!(
        "Built progress table: {} rows from {} workouts and {} bodyweight entries",
        rows.len(),
        workouts.len(),
        bodyweights.len()
    );

    rows.into_values().collect()
}

/// Every exercise name appearing in the table, sorted
pub fn exercise_names(rows: &[ChartRow]) -> Vec<String> {
    let mut names: Vec<String> = rows
        .iter()
        .flat_map(|row| row.lifts.keys().cloned())
        .collect();
    names.sort();
    names.dedup();
    names
}
