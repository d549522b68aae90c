use crate::db::store::{KEY_CURRENT_USER, KEY_SESSION_COOKIE, LocalStore};
use crate::errors::{AppError, AppResult};
use crate::models::user::SessionUser;
use crate::utils::date;
use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Cookie lifetime, in hours.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Lightweight copy of the session read by the route gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    pub email: String,
    pub logged_in_at: String,
    pub expires_at: String,
}

impl SessionCookie {
    pub fn is_expired_at(&self, now: DateTime<Local>) -> bool {
        match DateTime::parse_from_rfc3339(&self.expires_at) {
            Ok(exp) => exp < now,
            Err(_) => true,
        }
    }
}

/// Build the profile stored at login; the name defaults to the local part
/// of the email.
pub fn build_user(email: &str, name: Option<&str>) -> AppResult<SessionUser> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::MissingFields("email".into()));
    }
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .or_else(|| email.split('@').next().filter(|n| !n.is_empty()))
        .unwrap_or("Usuário");

    Ok(SessionUser {
        id: date::now_millis_id(),
        name: name.to_string(),
        email: email.to_string(),
        created_at: date::now_rfc3339(),
    })
}

/// Explicit owner of the logged-in user, created once per run.
pub struct SessionContext<'a> {
    store: &'a LocalStore,
}

impl<'a> SessionContext<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.store.get(KEY_CURRENT_USER)
    }

    /// Cookie duplicate, if present and not expired.
    pub fn cookie(&self) -> Option<SessionCookie> {
        self.store
            .get::<SessionCookie>(KEY_SESSION_COOKIE)
            .filter(|c| !c.is_expired_at(Local::now()))
    }

    pub fn is_logged_in(&self) -> bool {
        self.cookie().is_some()
    }

    pub fn login(&self, user: &SessionUser) -> AppResult<()> {
        let now = Local::now();
        let cookie = SessionCookie {
            email: user.email.clone(),
            logged_in_at: user.created_at.clone(),
            expires_at: (now + Duration::hours(SESSION_TTL_HOURS)).to_rfc3339(),
        };

        self.store.put(KEY_CURRENT_USER, user)?;
        self.store.put(KEY_SESSION_COOKIE, &cookie)?;
        self.store.audit("login", &user.email, &format!("User {} logged in", user.name));
        info!(email = %user.email, "session started");
        Ok(())
    }

    pub fn logout(&self) -> AppResult<Option<SessionUser>> {
        let user = self.current_user();
        self.store.remove(KEY_CURRENT_USER)?;
        self.store.remove(KEY_SESSION_COOKIE)?;
        if let Some(u) = &user {
            self.store.audit("logout", &u.email, &format!("User {} logged out", u.name));
        }
        Ok(user)
    }
}
