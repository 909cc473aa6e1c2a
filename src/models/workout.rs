use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{Exercise, FromSqliteRow};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workout {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_minutes: i32,
    #[serde(default)]
    pub calories_burned: i32,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Workout {
    /// Checks the workout's own columns, ignoring exercises.
    pub fn validate_fields(&self) -> Result<()> {
        if self.duration_minutes < 0 {
            return Err(AppError::validation("duration_minutes must not be negative"));
        }
        if self.calories_burned < 0 {
            return Err(AppError::validation("calories_burned must not be negative"));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_fields()?;
        self.exercises.iter().try_for_each(Exercise::validate)
    }
}

/// Reads the scalar columns only; exercises are attached by the repository.
impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            duration_minutes: row.get("duration_minutes")?,
            calories_burned: row.get("calories_burned")?,
            exercises: Vec::new(),
        })
    }
}

/// Partial update body. Absent scalars keep their stored value; a present
/// `exercises` list replaces the stored list entirely.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkout {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
    pub exercises: Option<Vec<Exercise>>,
}

impl UpdateWorkout {
    pub fn apply_to(self, workout: &mut Workout) {
        if let Some(title) = self.title {
            workout.title = title;
        }
        if let Some(description) = self.description {
            workout.description = description;
        }
        if let Some(duration_minutes) = self.duration_minutes {
            workout.duration_minutes = duration_minutes;
        }
        if let Some(calories_burned) = self.calories_burned {
            workout.calories_burned = calories_burned;
        }
        if let Some(exercises) = self.exercises {
            workout.exercises = exercises;
        }
    }
}
