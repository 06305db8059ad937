//! Database seeders for built-in data

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

use super::Admin;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "password";

/// Insert the default administrator when the admins table is empty.
/// Returns whether a row was inserted.
pub async fn seed_default_admin(pool: &SqlitePool) -> Result<bool> {
    if Admin::count(pool).await? > 0 {
        return Ok(false);
    }

    Admin::create(pool, DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).await?;
    info!("Seeded default admin account '{}'", DEFAULT_ADMIN_USERNAME);
    Ok(true)
}
