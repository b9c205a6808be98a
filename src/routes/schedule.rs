use askama::Template;
use axum::extract::State;

use crate::auth::SessionIdentity;
use crate::db::content;
use crate::db::models::Workout;
use crate::error::AppResult;
use crate::extractors::MaybeUser;
use crate::routes::home::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/schedule.html")]
pub struct ScheduleTemplate {
    pub is_admin: bool,
    pub workouts: Vec<Workout>,
}

/// GET /schedule — workouts in calendar order
pub async fn schedule(
    State(state): State<AppState>,
    maybe_user: MaybeUser,
) -> AppResult<Html<ScheduleTemplate>> {
    let workouts = state.db.interact(|conn| content::list_workouts(conn)).await?;

    Ok(Html(ScheduleTemplate {
        is_admin: maybe_user.is_authenticated(),
        workouts,
    }))
}
