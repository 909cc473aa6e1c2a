use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::RegisterUser;
use crate::password::hash_password;
use crate::repositories::UserRepository;

#[derive(Clone)]
pub struct UsersState {
    pub user_repo: UserRepository,
}

pub async fn register(
    State(state): State<UsersState>,
    payload: std::result::Result<Json<RegisterUser>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Rejected registration body: {}", rejection);
        AppError::BadRequest("invalid request body".to_string())
    })?;

    request.validate()?;

    let password_hash = hash_password(&request.password)?;
    let user = state
        .user_repo
        .create(request.into_new_user(password_hash))
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": user,
            "message": "User registered successfully",
        })),
    )
        .into_response())
}
