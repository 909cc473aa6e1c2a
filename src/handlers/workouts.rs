use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::{UpdateWorkout, Workout};
use crate::repositories::WorkoutRepository;

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
}

fn parse_workout_id(raw: &str) -> Result<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest("invalid workout id".to_string())),
    }
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    tracing::debug!("Rejected workout body: {}", rejection);
    AppError::BadRequest("invalid request body".to_string())
}

fn workout_not_found() -> AppError {
    AppError::NotFound("workout not found".to_string())
}

pub async fn show(State(state): State<WorkoutsState>, Path(id): Path<String>) -> Result<Response> {
    let id = parse_workout_id(&id)?;

    let workout = state
        .workout_repo
        .find_by_id(id)
        .await?
        .ok_or_else(workout_not_found)?;

    Ok(Json(json!({ "workout": workout })).into_response())
}

pub async fn create(
    State(state): State<WorkoutsState>,
    payload: std::result::Result<Json<Workout>, JsonRejection>,
) -> Result<Response> {
    let Json(mut workout) = payload.map_err(invalid_body)?;

    // Identifiers are always generated by storage
    workout.id = 0;
    for exercise in &mut workout.exercises {
        exercise.id = 0;
        exercise.workout_id = 0;
    }

    let created = state.workout_repo.create(workout).await?;
    tracing::info!(
        workout_id = created.id,
        exercises = created.exercises.len(),
        "Workout created"
    );

    Ok((StatusCode::CREATED, Json(json!({ "workout": created }))).into_response())
}

/// Applies the present fields onto the stored workout, persists it, and
/// returns the stored state.
pub async fn update(
    State(state): State<WorkoutsState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateWorkout>, JsonRejection>,
) -> Result<Response> {
    let id = parse_workout_id(&id)?;

    let mut workout = state
        .workout_repo
        .find_by_id(id)
        .await?
        .ok_or_else(workout_not_found)?;

    let Json(changes) = payload.map_err(invalid_body)?;
    changes.apply_to(&mut workout);

    state.workout_repo.update(&workout).await?;
    tracing::info!(workout_id = id, "Workout updated");

    let updated = state
        .workout_repo
        .find_by_id(id)
        .await?
        .ok_or_else(workout_not_found)?;

    Ok(Json(json!({ "workout": updated })).into_response())
}

pub async fn delete(State(state): State<WorkoutsState>, Path(id): Path<String>) -> Result<Response> {
    let id = parse_workout_id(&id)?;

    state.workout_repo.delete(id).await?;
    tracing::info!(workout_id = id, "Workout deleted");

    Ok(Json(json!({ "message": "workout deleted successfully" })).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workout_id() {
        assert_eq!(parse_workout_id("42").unwrap(), 42);
        assert!(matches!(parse_workout_id("0"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_workout_id("-3"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_workout_id("abc"), Err(AppError::BadRequest(_))));
    }
}
