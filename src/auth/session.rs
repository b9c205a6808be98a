use axum::http::{header, HeaderMap};
use rand::Rng;

use crate::auth::SessionIdentity;
use crate::db::{now_unix, DbResult, Executor, Param};

/// The admin behind a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

impl SessionIdentity for SessionUser {
    fn id(&self) -> Option<i64> {
        Some(self.id)
    }

    fn is_authenticated(&self) -> bool {
        true
    }
}

/// `hours` as seconds, clamped instead of overflowing.
fn hours_to_secs(hours: u64) -> u64 {
    hours.saturating_mul(3600)
}

/// Create a new session for a user. Returns the session token.
pub fn create_session(db: &mut dyn Executor, user_id: i64, hours: u64) -> DbResult<String> {
    let token = generate_token();
    let id = uuid::Uuid::now_v7().to_string();
    let lifetime = i64::try_from(hours_to_secs(hours)).unwrap_or(i64::MAX);
    let expires_at = now_unix().saturating_add(lifetime);

    db.execute(
        "INSERT INTO sessions (id, user_id, token, expires_at) VALUES ($1, $2, $3, $4)",
        &[
            Param::Text(&id),
            Param::Int(user_id),
            Param::Text(&token),
            Param::Int(expires_at),
        ],
    )?;

    Ok(token)
}

/// Resolve a token to its user, ignoring expired sessions.
pub fn find_session_user(db: &mut dyn Executor, token: &str) -> DbResult<Option<SessionUser>> {
    let row = db.query_opt(
        "SELECT u.id, u.username FROM sessions s \
         JOIN users u ON u.id = s.user_id \
         WHERE s.token = $1 AND s.expires_at > $2",
        &[Param::Text(token), Param::Int(now_unix())],
    )?;
    row.map(|row| {
        Ok(SessionUser {
            id: row.int(0)?,
            username: row.text(1)?,
        })
    })
    .transpose()
}

/// Delete a session by token.
pub fn delete_session(db: &mut dyn Executor, token: &str) -> DbResult<()> {
    db.execute("DELETE FROM sessions WHERE token = $1", &[Param::Text(token)])?;
    Ok(())
}

/// Generate a cryptographically random 32-byte hex token.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// -- Cookie helpers --

pub fn session_cookie(name: &str, token: &str, max_age_hours: u64) -> String {
    let max_age_secs = hours_to_secs(max_age_hours);
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        name, token, max_age_secs
    )
}

pub fn clear_session_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0", name)
}

pub fn get_cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == name && !val.is_empty() {
                Some(val)
            } else {
                None
            }
        })
}
