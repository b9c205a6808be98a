pub mod admin;
pub mod assets;
pub mod auth;
pub mod gallery;
pub mod home;
pub mod prices;
pub mod schedule;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// The whole site, ready to serve.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/schedule", get(schedule::schedule))
        .route("/prices", get(prices::prices))
        .route("/gallery", get(gallery::gallery))
        .route("/assets/{*path}", get(assets::asset))
        .merge(auth::router())
        .merge(admin::router())
        .fallback(|| async { AppError::NotFound })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
