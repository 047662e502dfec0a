//! Error types for the lift_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lift_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// SQLite error from the record store
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record failed validation before reaching the store
    #[error("Invalid {kind}: {reason}")]
    Validation { kind: RecordKind, reason: String },

    /// No record with the given id
    #[error("No {kind} with id {id}")]
    NotFound { kind: RecordKind, id: i64 },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// The three kinds of record the store persists
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Workout,
    Meal,
    Bodyweight,
}

impl RecordKind {
    /// Table holding records of this kind
    pub fn table(self) -> &'static str {
        match self {
            RecordKind::Workout => "workouts",
            RecordKind::Meal => "meals",
            RecordKind::Bodyweight => "bodyweight",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecordKind::Workout => "workout",
            RecordKind::Meal => "meal",
            RecordKind::Bodyweight => "bodyweight entry",
        };
        f.write_str(name)
    }
}
