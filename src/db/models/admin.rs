//! Administrator credentials.
//!
//! Passwords are stored and compared exactly as entered.

use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Admin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Admin {
    /// Find the admin whose username and password both match
    pub async fn authenticate(
        db: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<Option<Admin>, sqlx::Error> {
        sqlx::query_as("SELECT username, password FROM admins WHERE username = ? AND password = ?")
            .bind(username)
            .bind(password)
            .fetch_optional(db)
            .await
    }

    pub async fn create(db: &SqlitePool, username: &str, password: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO admins (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(db)
            .await
    }
}
