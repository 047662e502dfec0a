#![forbid(unsafe_code)]

//! Core domain model and business logic for the liftlog fitness tracker.
//!
//! This crate provides:
//! - Domain types (workouts, meals, bodyweight entries)
//! - Persistence (SQLite record store)
//! - Metrics (one-rep-max estimation, per-exercise maxima, progress table)
//! - Progress export (CSV)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod one_rep_max;
pub mod maxes;
pub mod progress;
pub mod analysis;
pub mod export;

// Re-export commonly used types
pub use error::{Error, RecordKind, Result};
pub use types::*;
pub use config::Config;
pub use store::{RecordStore, Snapshot};
pub use one_rep_max::{estimate_one_rep_max, rounded_one_rep_max};
pub use maxes::{best_estimated_maxes, latest_bodyweight, strength_ratios};
pub use progress::{build_progress_table, ChartRow};
pub use analysis::{analyze, Analysis};
pub use export::write_progress_csv;
