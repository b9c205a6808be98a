use askama::Template;
use axum::extract::State;

use crate::auth::SessionIdentity;
use crate::db::content;
use crate::db::models::Coach;
use crate::error::AppResult;
use crate::extractors::MaybeUser;
use crate::routes::home::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/gallery.html")]
pub struct GalleryTemplate {
    pub is_admin: bool,
    pub coaches: Vec<Coach>,
}

/// GET /gallery — coach cards
pub async fn gallery(
    State(state): State<AppState>,
    maybe_user: MaybeUser,
) -> AppResult<Html<GalleryTemplate>> {
    let coaches = state.db.interact(|conn| content::list_coaches(conn)).await?;

    Ok(Html(GalleryTemplate {
        is_admin: maybe_user.is_authenticated(),
        coaches,
    }))
}
