use askama::Template;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::auth::{password, session, SessionIdentity};
use crate::db::users;
use crate::error::AppResult;
use crate::extractors::MaybeUser;
use crate::forms::{FieldView, FormErrors, LoginForm};
use crate::routes::home::Html;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password.";

// -- Templates --

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub is_admin: bool,
    pub fields: Vec<FieldView>,
    pub error: Option<&'static str>,
    pub next: String,
}

#[derive(Deserialize, Default)]
pub struct NextQuery {
    pub next: Option<String>,
}

fn login_form(form: &LoginForm, errors: &FormErrors, error: Option<&'static str>) -> Html<LoginTemplate> {
    Html(LoginTemplate {
        is_admin: false,
        fields: form.fields(errors),
        error,
        next: form.next.clone().unwrap_or_default(),
    })
}

/// Only same-site paths are followed after login.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/",
    }
}

// -- Login handlers --

/// GET /login — render login form
pub async fn login_page(maybe_user: MaybeUser, Query(query): Query<NextQuery>) -> Response {
    if maybe_user.is_authenticated() {
        return Redirect::to("/").into_response();
    }

    let form = LoginForm {
        next: query.next,
        ..LoginForm::default()
    };
    login_form(&form, &FormErrors::default(), None).into_response()
}

/// POST /login — check credentials and start a session
pub async fn login_submit(
    State(state): State<AppState>,
    maybe_user: MaybeUser,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if maybe_user.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    let (username, plaintext) = match form.credentials() {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(login_form(&form, &errors, None).into_response()),
    };

    let user = {
        let username = username.to_string();
        state
            .db
            .interact(move |conn| users::find_by_username(conn, &username))
            .await?
    };

    let verified = match user {
        Some(user) => {
            let matches =
                password::verify_password_blocking(plaintext.to_string(), user.password.clone())
                    .await?;
            matches.then_some(user)
        }
        None => None,
    };

    let Some(user) = verified else {
        tracing::warn!(%username, "Failed login attempt");
        let errors = FormErrors::default();
        return Ok(login_form(&form, &errors, Some(INVALID_CREDENTIALS)).into_response());
    };

    let hours = state.config.auth.session_hours;
    let user_id = user.id;
    let token = state
        .db
        .interact(move |conn| session::create_session(conn, user_id, hours))
        .await?;
    tracing::info!(username = %user.username, user_id, "Admin logged in");

    let cookie = session::session_cookie(
        &state.config.auth.cookie_name,
        &token,
        state.config.auth.session_hours,
    );

    Ok((
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, safe_next(form.next.as_deref()).to_string()),
            (header::SET_COOKIE, cookie),
        ],
        "",
    )
        .into_response())
}

// -- Logout handler --

/// GET|POST /logout — delete session and redirect home
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let cookie_name = &state.config.auth.cookie_name;

    if let Some(token) = session::get_cookie_value(&headers, cookie_name) {
        let token = token.to_string();
        let deleted = state
            .db
            .interact(move |conn| session::delete_session(conn, &token))
            .await;
        if let Err(e) = deleted {
            tracing::warn!("Failed to delete session on logout: {}", e);
        }
    }

    Ok((
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/".to_string()),
            (header::SET_COOKIE, session::clear_session_cookie(cookie_name)),
        ],
        "",
    )
        .into_response())
}
