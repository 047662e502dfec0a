//! SQLite-backed record store for workouts, meals and bodyweight entries.
//!
//! Each record kind lives in its own table keyed by an autoincrement id and
//! a `createdAt` calendar date stored as `YYYY-MM-DD` text.

use crate::analysis::{analyze, Analysis};
use crate::error::RecordKind;
use crate::{
    Bodyweight, Error, Meal, NewBodyweight, NewMeal, NewWorkout, Result, Workout,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS workouts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        reps INTEGER NOT NULL,
        sets INTEGER NOT NULL,
        weight REAL NOT NULL,
        createdAt TEXT NOT NULL DEFAULT (date('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_workouts_created ON workouts(createdAt);

    CREATE TABLE IF NOT EXISTS meals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        calories INTEGER NOT NULL,
        protein INTEGER NOT NULL,
        createdAt TEXT NOT NULL DEFAULT (date('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_meals_created ON meals(createdAt);

    CREATE TABLE IF NOT EXISTS bodyweight (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        weight REAL NOT NULL,
        createdAt TEXT NOT NULL DEFAULT (date('now'))
    );
";

/// Consistent view of the records the metrics are computed from
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    /// All workouts in id (arrival) order
    pub workouts: Vec<Workout>,
    /// All bodyweight entries, newest date first
    pub bodyweights: Vec<Bodyweight>,
}

impl Snapshot {
    /// Derive maxima, ratios and the progress table
    pub fn analyze(&self) -> Analysis {
        analyze(&self.workouts, &self.bodyweights)
    }
}

/// Persistent store for all record kinds
pub struct RecordStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl RecordStore {
    /// Create or open a store at the given database path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        let store = Self::init(conn, Some(path.to_path_buf()))?;
        tracing::debug!("Opened record store at {:?}", path);
        Ok(store)
    }

    /// Create a throwaway store held in memory
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, path })
    }

    /// Database file backing this store, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ------------------------------------------------------------------
    // Workouts
    // ------------------------------------------------------------------

    /// All workouts, or only those on `date`, in id order
    pub fn list_workouts(&self, date: Option<NaiveDate>) -> Result<Vec<Workout>> {
        list_workouts(&self.conn, date)
    }

    pub fn get_workout(&self, id: i64) -> Result<Workout> {
        self.conn
            .query_row(
                "SELECT id, name, reps, sets, weight, createdAt FROM workouts WHERE id = ?1",
                params![id],
                workout_from_row,
            )
            .optional()?
            .ok_or(Error::NotFound {
                kind: RecordKind::Workout,
                id,
            })
    }

    pub fn create_workout(&self, new: &NewWorkout) -> Result<Workout> {
        new.validate()?;
        self.conn.execute(
            "INSERT INTO workouts (name, reps, sets, weight, createdAt) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![new.name, new.reps, new.sets, new.weight, new.date_or_today()],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!("Logged workout {}: {} {}x{} @ {}", id, new.name, new.sets, new.reps, new.weight);
        self.get_workout(id)
    }

    /// Replace every field of a workout; a missing date keeps the stored one
    pub fn update_workout(&self, id: i64, new: &NewWorkout) -> Result<Workout> {
        new.validate()?;
        let changes = self.conn.execute(
            "UPDATE workouts SET name = ?1, reps = ?2, sets = ?3, weight = ?4,
                createdAt = COALESCE(?5, createdAt)
             WHERE id = ?6",
            params![new.name, new.reps, new.sets, new.weight, new.created_at, id],
        )?;
        self.ensure_changed(RecordKind::Workout, id, changes)?;
        tracing::info!("Updated workout {}", id);
        self.get_workout(id)
    }

    pub fn delete_workout(&self, id: i64) -> Result<()> {
        self.delete(RecordKind::Workout, id)
    }

    // ------------------------------------------------------------------
    // Meals
    // ------------------------------------------------------------------

    /// All meals, or only those on `date`, in id order
    pub fn list_meals(&self, date: Option<NaiveDate>) -> Result<Vec<Meal>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, calories, protein, createdAt FROM meals
             WHERE ?1 IS NULL OR createdAt = ?1
             ORDER BY id",
        )?;
        let meals = stmt
            .query_map(params![date], meal_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(meals)
    }

    pub fn get_meal(&self, id: i64) -> Result<Meal> {
        self.conn
            .query_row(
                "SELECT id, name, calories, protein, createdAt FROM meals WHERE id = ?1",
                params![id],
                meal_from_row,
            )
            .optional()?
            .ok_or(Error::NotFound {
                kind: RecordKind::Meal,
                id,
            })
    }

    pub fn create_meal(&self, new: &NewMeal) -> Result<Meal> {
        new.validate()?;
        self.conn.execute(
            "INSERT INTO meals (name, calories, protein, createdAt) VALUES (?1, ?2, ?3, ?4)",
            params![new.name, new.calories, new.protein, new.date_or_today()],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!("Logged meal {}: {} ({} kcal, {} g protein)", id, new.name, new.calories, new.protein);
        self.get_meal(id)
    }

    /// Replace every field of a meal; a missing date keeps the stored one
    pub fn update_meal(&self, id: i64, new: &NewMeal) -> Result<Meal> {
        new.validate()?;
        let changes = self.conn.execute(
            "UPDATE meals SET name = ?1, calories = ?2, protein = ?3,
                createdAt = COALESCE(?4, createdAt)
             WHERE id = ?5",
            params![new.name, new.calories, new.protein, new.created_at, id],
        )?;
        self.ensure_changed(RecordKind::Meal, id, changes)?;
        tracing::info!("Updated meal {}", id);
        self.get_meal(id)
    }

    pub fn delete_meal(&self, id: i64) -> Result<()> {
        self.delete(RecordKind::Meal, id)
    }

    // ------------------------------------------------------------------
    // Bodyweight
    // ------------------------------------------------------------------

    /// All bodyweight entries, newest date first, then in id order
    pub fn list_bodyweights(&self) -> Result<Vec<Bodyweight>> {
        list_bodyweights(&self.conn)
    }

    pub fn get_bodyweight(&self, id: i64) -> Result<Bodyweight> {
        self.conn
            .query_row(
                "SELECT id, weight, createdAt FROM bodyweight WHERE id = ?1",
                params![id],
                bodyweight_from_row,
            )
            .optional()?
            .ok_or(Error::NotFound {
                kind: RecordKind::Bodyweight,
                id,
            })
    }

    pub fn create_bodyweight(&self, new: &NewBodyweight) -> Result<Bodyweight> {
        new.validate()?;
        self.conn.execute(
            "INSERT INTO bodyweight (weight, createdAt) VALUES (?1, ?2)",
            params![new.weight, new.date_or_today()],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!("Logged bodyweight {}: {}", id, new.weight);
        self.get_bodyweight(id)
    }

    /// Replace a bodyweight entry; a missing date keeps the stored one
    pub fn update_bodyweight(&self, id: i64, new: &NewBodyweight) -> Result<Bodyweight> {
        new.validate()?;
        let changes = self.conn.execute(
            "UPDATE bodyweight SET weight = ?1, createdAt = COALESCE(?2, createdAt) WHERE id = ?3",
            params![new.weight, new.created_at, id],
        )?;
        self.ensure_changed(RecordKind::Bodyweight, id, changes)?;
        tracing::info!("Updated bodyweight entry {}", id);
        self.get_bodyweight(id)
    }

    pub fn delete_bodyweight(&self, id: i64) -> Result<()> {
        self.delete(RecordKind::Bodyweight, id)
    }

    // ------------------------------------------------------------------
    // Shared
    // ------------------------------------------------------------------

    /// Read workouts and bodyweight entries inside one transaction
    pub fn snapshot(&mut self) -> Result<Snapshot> {
        let tx = self.conn.transaction()?;
        let workouts = list_workouts(&tx, None)?;
        let bodyweights = list_bodyweights(&tx)?;
        tx.commit()?;

        tracing::debug!(
            "Snapshot: {} workouts, {} bodyweight entries",
            workouts.len(),
            bodyweights.len()
        );
        Ok(Snapshot {
            workouts,
            bodyweights,
        })
    }

    fn delete(&self, kind: RecordKind, id: i64) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", kind.table());
        let changes = self.conn.execute(&sql, params![id])?;
        self.ensure_changed(kind, id, changes)?;
        tracing::info!("Deleted {} {}", kind, id);
        Ok(())
    }

    fn ensure_changed(&self, kind: RecordKind, id: i64, changes: usize) -> Result<()> {
        if changes == 0 {
            return Err(Error::NotFound { kind, id });
        }
        Ok(())
    }
}

fn list_workouts(conn: &Connection, date: Option<NaiveDate>) -> Result<Vec<Workout>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, reps, sets, weight, createdAt FROM workouts
         WHERE ?1 IS NULL OR createdAt = ?1
         ORDER BY id",
    )?;
    let workouts = stmt
        .query_map(params![date], workout_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(workouts)
}

fn list_bodyweights(conn: &Connection) -> Result<Vec<Bodyweight>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, weight, createdAt FROM bodyweight ORDER BY createdAt DESC, id ASC",
    )?;
    let entries = stmt
        .query_map([], bodyweight_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(entries)
}

fn workout_from_row(row: &Row<'_>) -> rusqlite::Result<Workout> {
    Ok(Workout {
        id: row.get(0)?,
        name: row.get(1)?,
        reps: row.get(2)?,
        sets: row.get(3)?,
        weight: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn meal_from_row(row: &Row<'_>) -> rusqlite::Result<Meal> {
    Ok(Meal {
        id: row.get(0)?,
        name: row.get(1)?,
        calories: row.get(2)?,
        protein: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn bodyweight_from_row(row: &Row<'_>) -> rusqlite::Result<Bodyweight> {
    Ok(Bodyweight {
        id: row.get(0)?,
        weight: row.get(1)?,
        created_at: row.get(2)?,
    })
}
