use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;
use crate::error::{AppError, Result};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

const USERNAME_MIN_LEN: usize = 4;
const USERNAME_MAX_LEN: usize = 50;
const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromSqliteRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
            email: row.get("email")?,
            bio: row.get("bio")?,
            password_hash: row.get("password_hash")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// A user row about to be inserted. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub bio: Option<String>,
}

impl RegisterUser {
    pub fn validate(&self) -> Result<()> {
        let username_len = self.username.chars().count();
        if username_len == 0 {
            return Err(AppError::validation("username is required"));
        }
        if username_len > USERNAME_MAX_LEN {
            return Err(AppError::validation("username is too long"));
        }
        if username_len < USERNAME_MIN_LEN {
            return Err(AppError::validation("username is too short"));
        }

        if self.email.is_empty() {
            return Err(AppError::validation("email is required"));
        }
        if !EMAIL_REGEX.is_match(&self.email) {
            return Err(AppError::validation("invalid email format"));
        }

        let password_len = self.password.chars().count();
        if password_len == 0 {
            return Err(AppError::validation("password is required"));
        }
        if password_len > PASSWORD_MAX_LEN {
            return Err(AppError::validation("password is too long"));
        }
        if password_len < PASSWORD_MIN_LEN {
            return Err(AppError::validation("password is too short"));
        }

        Ok(())
    }

    /// Empty bios are stored as NULL.
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
            bio: self.bio.filter(|b| !b.is_empty()),
            password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterUser {
        RegisterUser {
            username: "lifter".to_string(),
            email: "lifter@example.com".to_string(),
            password: "password123".to_string(),
            bio: None,
        }
    }

    fn validation_message(req: &RegisterUser) -> String {
        match req.validate() {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_username_bounds() {
        let mut req = request();
        req.username = String::new();
        assert_eq!(validation_message(&req), "username is required");

        req.username = "abc".to_string();
        assert_eq!(validation_message(&req), "username is too short");

        req.username = "a".repeat(51);
        assert_eq!(validation_message(&req), "username is too long");

        req.username = "abcd".to_string();
        assert!(req.validate().is_ok());

        req.username = "a".repeat(50);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_email_format() {
        let mut req = request();
        req.email = String::new();
        assert_eq!(validation_message(&req), "email is required");

        for bad in ["not-an-email", "a@b", "@example.com", "lifter@example.c"] {
            req.email = bad.to_string();
            assert_eq!(validation_message(&req), "invalid email format", "{}", bad);
        }

        req.email = "first.last+gym@sub.example.org".to_string();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_password_bounds() {
        let mut req = request();
        req.password = String::new();
        assert_eq!(validation_message(&req), "password is required");

        req.password = "short".to_string();
        assert_eq!(validation_message(&req), "password is too short");

        req.password = "p".repeat(51);
        assert_eq!(validation_message(&req), "password is too long");
    }

    #[test]
    fn test_empty_bio_becomes_none() {
        let mut req = request();
        req.bio = Some(String::new());
        let new_user = req.into_new_user("hash".to_string());
        assert_eq!(new_user.bio, None);
        assert_eq!(new_user.password_hash, "hash");
    }
}
