use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use workoutlog::error::AppError;

#[test]
fn test_not_found_returns_404() {
    let error = AppError::NotFound("workout not found".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_bad_request_returns_400() {
    let error = AppError::BadRequest("invalid workout id".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_validation_returns_400() {
    let error = AppError::Validation("Invalid field".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_conflict_returns_409() {
    let error = AppError::Conflict("username is already taken".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn test_internal_returns_500() {
    let error = AppError::Internal("Something went wrong".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_password_hash_returns_500() {
    let error = AppError::PasswordHash;
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_database_error_hides_detail() {
    let error = AppError::Database(rusqlite::Error::InvalidQuery);
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "internal server error");
}
