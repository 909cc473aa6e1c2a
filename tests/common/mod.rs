#![allow(dead_code)]

use axum::Router;

use workoutlog::db::{create_memory_pool, DbPool};
use workoutlog::handlers::{health, users, workouts};
use workoutlog::migrations::run_migrations_for_tests;
use workoutlog::models::{Exercise, Workout};
use workoutlog::repositories::{UserRepository, WorkoutRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let workouts_state = workouts::WorkoutsState {
        workout_repo: WorkoutRepository::new(pool.clone()),
    };
    let users_state = users::UsersState {
        user_repo: UserRepository::new(pool.clone()),
    };
    let health_state = health::HealthState { pool };

    workoutlog::routes::create_router(workouts_state, users_state, health_state)
}

pub fn count_rows(pool: &DbPool, table: &str) -> i64 {
    let conn = pool.get().unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .unwrap()
}

// Test data creation helpers
pub fn rep_exercise(name: &str, sets: i32, reps: i32, order_index: i32) -> Exercise {
    Exercise {
        name: name.to_string(),
        sets,
        reps: Some(reps),
        order_index,
        ..Default::default()
    }
}

pub fn timed_exercise(name: &str, duration_seconds: i32, order_index: i32) -> Exercise {
    Exercise {
        name: name.to_string(),
        sets: 1,
        duration_seconds: Some(duration_seconds),
        order_index,
        ..Default::default()
    }
}

pub fn push_day() -> Workout {
    Workout {
        title: "Push Day".to_string(),
        description: "Chest, triceps and shoulders workout".to_string(),
        duration_minutes: 60,
        calories_burned: 400,
        exercises: vec![Exercise {
            name: "Bench Press".to_string(),
            sets: 3,
            reps: Some(8),
            weight: Some(82.5),
            notes: "Focus on form".to_string(),
            order_index: 1,
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub async fn create_test_workout(pool: &DbPool, workout: Workout) -> Workout {
    let workout_repo = WorkoutRepository::new(pool.clone());
    workout_repo.create(workout).await.unwrap()
}
