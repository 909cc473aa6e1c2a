use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{is_unique_violation, AppError, Result};
use crate::models::{FromSqliteRow, NewUser, User};

#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?")?;
            let result = stmt.query_row([id], User::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let pool = self.pool.clone();
        let username = username.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM users WHERE username = ?")?;
            let result = stmt.query_row([&username], User::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Inserts a user whose password has already been hashed.
    ///
    /// A taken username or email fails with `AppError::Conflict`.
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        let now = Utc::now();
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO users (username, email, password_hash, bio, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    new_user.username,
                    new_user.email,
                    new_user.password_hash,
                    new_user.bio,
                    now,
                    now
                ],
            )
            .map_err(map_insert_error)?;

            Ok(User {
                id: conn.last_insert_rowid(),
                username: new_user.username,
                email: new_user.email,
                bio: new_user.bio,
                password_hash: new_user.password_hash,
                created_at: now,
                updated_at: now,
            })
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

fn map_insert_error(err: rusqlite::Error) -> AppError {
    if !is_unique_violation(&err) {
        return AppError::Database(err);
    }

    // SQLite names the column: "UNIQUE constraint failed: users.email"
    match &err {
        rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("users.email") => {
            AppError::Conflict("email is already registered".to_string())
        }
        _ => AppError::Conflict("username is already taken".to_string()),
    }
}
