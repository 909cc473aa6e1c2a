use rusqlite::{params, OptionalExtension, Transaction};

use crate::db::DbPool;
use crate::error::{is_check_violation, AppError, Result};
use crate::models::{Exercise, FromSqliteRow, Workout};

/// Persists a workout together with its exercises.
///
/// Multi-statement writes run in a single `rusqlite::Transaction`. Dropping a
/// transaction without committing rolls it back, so every early return below
/// (validation, missing row, statement error) leaves storage untouched.
#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Inserts the workout and its exercises, returning them with generated ids.
    ///
    /// `order_index` is stored as supplied.
    pub async fn create(&self, mut workout: Workout) -> Result<Workout> {
        workout.validate_fields()?;

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT INTO workouts (title, description, duration_minutes, calories_burned)
                 VALUES (?, ?, ?, ?)",
                params![
                    workout.title,
                    workout.description,
                    workout.duration_minutes,
                    workout.calories_burned
                ],
            )
            .map_err(map_write_error)?;
            workout.id = tx.last_insert_rowid();

            insert_exercises(&tx, workout.id, &mut workout.exercises)?;

            tx.commit()?;
            Ok(workout)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Returns `None` when no workout has this id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Workout>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;

            let workout = conn
                .query_row(
                    "SELECT id, title, description, duration_minutes, calories_burned
                     FROM workouts WHERE id = ?",
                    [id],
                    Workout::from_row,
                )
                .optional()?;

            let Some(mut workout) = workout else {
                return Ok(None);
            };

            let mut stmt = conn.prepare(
                "SELECT id, workout_id, name, sets, reps, duration_seconds, weight, notes, order_index
                 FROM exercises
                 WHERE workout_id = ?
                 ORDER BY order_index, id",
            )?;
            workout.exercises = stmt
                .query_map([id], Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(Some(workout))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Overwrites the workout's columns and replaces its whole exercise list.
    ///
    /// Previous exercise rows are deleted and the supplied list is inserted
    /// fresh, so exercise ids change on every update.
    pub async fn update(&self, workout: &Workout) -> Result<()> {
        workout.validate_fields()?;

        let pool = self.pool.clone();
        let mut workout = workout.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let rows = tx
                .execute(
                    "UPDATE workouts
                     SET title = ?, description = ?, duration_minutes = ?, calories_burned = ?,
                         updated_at = CURRENT_TIMESTAMP
                     WHERE id = ?",
                    params![
                        workout.title,
                        workout.description,
                        workout.duration_minutes,
                        workout.calories_burned,
                        workout.id
                    ],
                )
                .map_err(map_write_error)?;

            if rows == 0 {
                return Err(workout_not_found(workout.id));
            }

            tx.execute("DELETE FROM exercises WHERE workout_id = ?", [workout.id])?;
            insert_exercises(&tx, workout.id, &mut workout.exercises)?;

            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Exercises go with it through the `ON DELETE CASCADE` foreign key.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM workouts WHERE id = ?", [id])?;
            if rows == 0 {
                return Err(workout_not_found(id));
            }
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

/// Inserts `exercises` in order, filling in their ids. Each exercise is
/// validated right before its insert; a failure aborts the caller's transaction.
fn insert_exercises(tx: &Transaction, workout_id: i64, exercises: &mut [Exercise]) -> Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO exercises
            (workout_id, name, sets, reps, duration_seconds, weight, notes, order_index)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )?;

    for exercise in exercises.iter_mut() {
        exercise.validate()?;

        stmt.execute(params![
            workout_id,
            exercise.name,
            exercise.sets,
            exercise.reps,
            exercise.duration_seconds,
            exercise.weight,
            exercise.notes,
            exercise.order_index
        ])
        .map_err(map_write_error)?;

        exercise.id = tx.last_insert_rowid();
        exercise.workout_id = workout_id;
    }

    Ok(())
}

fn workout_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("workout {} not found", id))
}

/// CHECK constraints back up the model validation; report them the same way.
fn map_write_error(err: rusqlite::Error) -> AppError {
    if is_check_violation(&err) {
        AppError::Validation(format!("rejected by storage constraint: {}", err))
    } else {
        AppError::Database(err)
    }
}
