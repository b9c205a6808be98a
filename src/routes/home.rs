use askama::Template;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::auth::SessionIdentity;
use crate::extractors::MaybeUser;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub is_admin: bool,
}

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

pub async fn index(maybe_user: MaybeUser) -> Html<HomeTemplate> {
    Html(HomeTemplate {
        is_admin: maybe_user.is_authenticated(),
    })
}
