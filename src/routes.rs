use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, users, workouts};

pub fn create_router(
    workouts_state: workouts::WorkoutsState,
    users_state: users::UsersState,
    health_state: health::HealthState,
) -> Router {
    Router::new()
        // Workout routes
        .route("/workouts", post(workouts::create))
        .route(
            "/workouts/{id}",
            get(workouts::show)
                .put(workouts::update)
                .delete(workouts::delete),
        )
        .with_state(workouts_state)
        // User routes
        .route("/users", post(users::register))
        .with_state(users_state)
        .route("/health", get(health::health_check))
        .with_state(health_state)
        .layer(TraceLayer::new_for_http())
}
