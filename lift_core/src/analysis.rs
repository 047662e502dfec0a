//! Combined metrics over a record snapshot.

use crate::maxes::{best_estimated_maxes, latest_bodyweight, strength_ratios};
use crate::progress::{build_progress_table, ChartRow};
use crate::{Bodyweight, Workout};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything derived from the workout and bodyweight lists
#[derive(Clone, Debug, Serialize)]
pub struct Analysis {
    /// Best estimated one-rep-max per exercise
    pub maxes: BTreeMap<String, f64>,
    /// Max divided by latest bodyweight, per exercise
    pub ratios: BTreeMap<String, f64>,
    pub latest_bodyweight: Option<Bodyweight>,
    pub chart: Vec<ChartRow>,
}

/// Recompute all metrics from scratch
pub fn analyze(workouts: &[Workout], bodyweights: &[Bodyweight]) -> Analysis {
    let maxes = best_estimated_maxes(workouts);
    let latest = latest_bodyweight(bodyweights);
    let ratios = strength_ratios(&maxes, latest);
    let chart = build_progress_table(workouts, bodyweights);

    tracing::info!(
        "Analyzed {} workouts and {} bodyweight entries: {} exercises, {} chart rows",
        workouts.len(),
        bodyweights.len(),
        maxes.len(),
        chart.len()
    );

    Analysis {
        maxes,
        ratios,
        latest_bodyweight: latest.cloned(),
        chart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_analyze_combines_metrics() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let workouts = vec![Workout {
            id: 1,
            name: "Deadlift".into(),
            reps: 1,
            sets: 1,
            weight: 360.0,
            created_at: day,
        }];
        let bodyweights = vec![Bodyweight {
            id: 1,
            weight: 180.0,
            created_at: day,
        }];

        let analysis = analyze(&workouts, &bodyweights);
        assert_eq!(analysis.maxes["Deadlift"], 360.0);
        assert_eq!(analysis.ratios["Deadlift"], 2.0);
        assert_eq!(analysis.latest_bodyweight.unwrap().weight, 180.0);
        assert_eq!(analysis.chart.len(), 1);
    }

    #[test]
    fn test_analyze_empty() {
        let analysis = analyze(&[], &[]);
        assert!(analysis.maxes.is_empty());
        assert!(analysis.ratios.is_empty());
        assert!(analysis.latest_bodyweight.is_none());
        assert!(analysis.chart.is_empty());
    }
}
