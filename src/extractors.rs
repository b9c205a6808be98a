use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::session::{self, SessionUser};
use crate::auth::SessionIdentity;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Extractor that requires a logged in admin.
/// Anonymous requests are sent to the login page and come back afterwards.
#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match lookup_session(parts, state).await? {
            Some(user) => Ok(AdminUser(user)),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str().to_string())
                    .unwrap_or_else(|| "/".to_string());
                tracing::debug!(%next, "Anonymous request to admin route");
                Err(AppError::LoginRequired { next })
            }
        }
    }
}

impl SessionIdentity for AdminUser {
    fn id(&self) -> Option<i64> {
        self.0.id()
    }

    fn is_authenticated(&self) -> bool {
        true
    }
}

/// Optional user extractor, `None` for anonymous visitors.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match lookup_session(parts, state).await {
            Ok(user) => Ok(MaybeUser(user)),
            Err(e) => {
                tracing::warn!("Session lookup failed, treating request as anonymous: {}", e);
                Ok(MaybeUser(None))
            }
        }
    }
}

impl SessionIdentity for MaybeUser {
    fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|user| user.id)
    }

    fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

async fn lookup_session(parts: &Parts, state: &AppState) -> AppResult<Option<SessionUser>> {
    let Some(token) = session::get_cookie_value(&parts.headers, &state.config.auth.cookie_name)
    else {
        return Ok(None);
    };

    let token = token.to_string();
    let user = state
        .db
        .interact(move |conn| session::find_session_user(conn, &token))
        .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> SessionUser {
        SessionUser {
            id: 7,
            username: "admin".to_string(),
        }
    }

    #[test]
    fn admin_user_reports_session_user_id() {
        let admin = AdminUser(admin());
        assert_eq!(admin.id(), Some(7));
        assert!(admin.is_authenticated());
    }

    #[test]
    fn anonymous_visitor_has_no_id() {
        let visitor = MaybeUser(None);
        assert_eq!(visitor.id(), None);
        assert!(!visitor.is_authenticated());

        let logged_in = MaybeUser(Some(admin()));
        assert_eq!(logged_in.id(), Some(7));
        assert!(logged_in.is_authenticated());
    }
}
