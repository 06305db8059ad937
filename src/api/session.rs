//! Signed cookies: the admin session flag and one-shot flash messages.
//!
//! Both cookies are signed with the process cookie key, so a browser cannot
//! forge a session or a flash. Neither carries an expiry.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Session cookie name
pub const SESSION_COOKIE: &str = "tripseat_session";

/// Flash message cookie name
pub const FLASH_COOKIE: &str = "tripseat_flash";

/// Value of the session cookie for a logged-in administrator
const ADMIN_FLAG: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }
}

/// A status message shown once on the page a redirect lands on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

fn cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

/// Queue a flash message for the next rendered page
pub fn set_flash(jar: SignedCookieJar, flash: Flash) -> SignedCookieJar {
    match serde_json::to_string(&flash) {
        Ok(value) => jar.add(cookie(FLASH_COOKIE, value)),
        Err(e) => {
            tracing::error!("Failed to encode flash message: {}", e);
            jar
        }
    }
}

/// Read and clear the pending flash message, if any
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<Flash>) {
    let Some(value) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = serde_json::from_str(value.value()).ok();
    (jar.remove(removal(FLASH_COOKIE)), flash)
}

/// Mark the browser as logged in
pub fn start_session(jar: SignedCookieJar) -> SignedCookieJar {
    jar.add(cookie(SESSION_COOKIE, ADMIN_FLAG.to_string()))
}

/// Remove the session flag; a no-op for anonymous browsers
pub fn end_session(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(removal(SESSION_COOKIE))
}

pub fn is_authenticated(jar: &SignedCookieJar) -> bool {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value() == ADMIN_FLAG)
        .unwrap_or(false)
}

/// Extractor for handlers that require a logged-in administrator.
/// Anonymous requests are redirected to the login form.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, state.cookie_key.clone());
        if is_authenticated(&jar) {
            Ok(AdminSession)
        } else {
            tracing::debug!(path = %parts.uri.path(), "Admin session required");
            Err(Redirect::to(super::LOGIN_PATH))
        }
    }
}
