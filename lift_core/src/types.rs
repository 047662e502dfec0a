//! Core domain types for liftlog.
//!
//! This module defines the records the store persists:
//! - Workouts (exercise, reps, sets, weight)
//! - Meals (calories, protein)
//! - Bodyweight entries
//!
//! plus the payloads used to create and replace them.

use crate::error::RecordKind;
use crate::progress::{BODYWEIGHT_KEY, DATE_KEY};
use crate::{Error, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// Stored Records
// ============================================================================

/// A logged strength-training set group
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i64,
    /// Exercise label, kept exactly as entered
    pub name: String,
    pub reps: u32,
    pub sets: u32,
    /// Pounds
    pub weight: f64,
    pub created_at: NaiveDate,
}

/// A logged meal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub calories: u32,
    /// Grams
    pub protein: u32,
    pub created_at: NaiveDate,
}

/// A logged bodyweight measurement
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bodyweight {
    pub id: i64,
    /// Pounds
    pub weight: f64,
    pub created_at: NaiveDate,
}

// ============================================================================
// Create / Replace Payloads
// ============================================================================

/// Fields for creating or fully replacing a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    pub name: String,
    pub reps: u32,
    pub sets: u32,
    pub weight: f64,
    /// Defaults to today when absent
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
}

/// Fields for creating or fully replacing a meal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMeal {
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
}

/// Fields for creating or fully replacing a bodyweight entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBodyweight {
    pub weight: f64,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn invalid(kind: RecordKind, reason: impl Into<String>) -> Error {
    Error::Validation {
        kind,
        reason: reason.into(),
    }
}

fn check_name(kind: RecordKind, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(invalid(kind, "name must not be empty"));
    }
    Ok(())
}

fn check_weight(kind: RecordKind, weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(invalid(
            kind,
            format!("weight must be a non-negative number, got {}", weight),
        ));
    }
    Ok(())
}

impl NewWorkout {
    /// Check the invariants the store relies on
    pub fn validate(&self) -> Result<()> {
        let kind = RecordKind::Workout;
        check_name(kind, &self.name)?;
        if self.name == DATE_KEY || self.name == BODYWEIGHT_KEY {
            return Err(invalid(
                kind,
                format!("'{}' is reserved for the progress table", self.name),
            ));
        }
        if self.reps == 0 {
            return Err(invalid(kind, "reps must be at least 1"));
        }
        if self.sets == 0 {
            return Err(invalid(kind, "sets must be at least 1"));
        }
        check_weight(kind, self.weight)
    }

    /// Fill a missing date with today
    pub fn date_or_today(&self) -> NaiveDate {
        self.created_at.unwrap_or_else(today)
    }
}

impl NewMeal {
    /// Check the invariants the store relies on
    pub fn validate(&self) -> Result<()> {
        check_name(RecordKind::Meal, &self.name)
    }

    pub fn date_or_today(&self) -> NaiveDate {
        self.created_at.unwrap_or_else(today)
    }
}

impl NewBodyweight {
    /// Check the invariants the store relies on
    pub fn validate(&self) -> Result<()> {
        check_weight(RecordKind::Bodyweight, self.weight)
    }

    pub fn date_or_today(&self) -> NaiveDate {
        self.created_at.unwrap_or_else(today)
    }
}

impl From<&Workout> for NewWorkout {
    fn from(workout: &Workout) -> Self {
        NewWorkout {
            name: workout.name.clone(),
            reps: workout.reps,
            sets: workout.sets,
            weight: workout.weight,
            created_at: Some(workout.created_at),
        }
    }
}

impl From<&Meal> for NewMeal {
    fn from(meal: &Meal) -> Self {
        NewMeal {
            name: meal.name.clone(),
            calories: meal.calories,
            protein: meal.protein,
            created_at: Some(meal.created_at),
        }
    }
}

impl From<&Bodyweight> for NewBodyweight {
    fn from(entry: &Bodyweight) -> Self {
        NewBodyweight {
            weight: entry.weight,
            created_at: Some(entry.created_at),
        }
    }
}
