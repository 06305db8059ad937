pub mod api;
pub mod booking;
pub mod config;
pub mod db;
pub mod error;
pub mod ui;

pub use db::DbPool;
pub use error::AppError;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use config::Config;
use sha2::{Digest, Sha512};
use std::sync::Arc;

/// Shared handler state. Cheap to clone: every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DbPool,
    /// Signs the session and flash cookies
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Self {
        let cookie_key = cookie_key(config.auth.session_secret.as_deref());
        Self {
            config: Arc::new(config),
            db,
            cookie_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Derive the cookie signing key from the configured secret, or generate a
/// fresh one for this process
fn cookie_key(secret: Option<&str>) -> Key {
    match secret {
        // SHA-512 yields exactly the 64 bytes Key::from expects
        Some(secret) => Key::from(Sha512::digest(secret.as_bytes()).as_slice()),
        None => Key::generate(),
    }
}
