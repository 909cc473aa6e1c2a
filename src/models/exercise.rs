use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;
use crate::error::{AppError, Result};

/// One movement within a workout.
///
/// An exercise is either set/rep based (`reps`) or duration based
/// (`duration_seconds`); it may carry neither, but never both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workout_id: i64,
    pub name: String,
    #[serde(default)]
    pub sets: i32,
    pub reps: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub weight: Option<f64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub order_index: i32,
}

impl Exercise {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("exercise name is required"));
        }

        if self.reps.is_some() && self.duration_seconds.is_some() {
            return Err(AppError::Validation(format!(
                "exercise '{}' cannot have both reps and duration_seconds",
                self.name
            )));
        }

        if self.sets < 0 {
            return Err(AppError::Validation(format!(
                "exercise '{}' has negative sets",
                self.name
            )));
        }

        if matches!(self.reps, Some(r) if r < 0) {
            return Err(AppError::Validation(format!(
                "exercise '{}' has negative reps",
                self.name
            )));
        }

        if matches!(self.duration_seconds, Some(d) if d < 0) {
            return Err(AppError::Validation(format!(
                "exercise '{}' has negative duration_seconds",
                self.name
            )));
        }

        if matches!(self.weight, Some(w) if !w.is_finite() || w < 0.0) {
            return Err(AppError::Validation(format!(
                "exercise '{}' has an invalid weight",
                self.name
            )));
        }

        Ok(())
    }
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_id: row.get("workout_id")?,
            name: row.get("name")?,
            sets: row.get("sets")?,
            reps: row.get("reps")?,
            duration_seconds: row.get("duration_seconds")?,
            weight: row.get("weight")?,
            notes: row.get("notes")?,
            order_index: row.get("order_index")?,
        })
    }
}
