//! Authenticated create and delete routes for the content tables. Every
//! successful action redirects to the public page that lists the table.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use crate::auth::SessionIdentity;
use crate::db::{content, DbResult, Executor};
use crate::error::{AppError, AppResult};
use crate::extractors::AdminUser;
use crate::forms::{CoachForm, ContentForm, FormErrors, FormView, PriceForm, WorkoutForm};
use crate::routes::home::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/create_content.html")]
pub struct CreateContentTemplate {
    pub is_admin: bool,
    pub form: FormView,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/workout/new", get(new_workout).post(create_workout))
        .route("/admin/workout/delete/{id}", get(delete_workout))
        .route("/admin/price/new", get(new_price).post(create_price))
        .route("/admin/price/delete/{id}", get(delete_price))
        .route("/admin/coach/new", get(new_coach).post(create_coach))
        .route("/admin/coach/delete/{id}", get(delete_coach))
}

fn render_form<F: ContentForm>(form: &F, errors: &FormErrors) -> Html<CreateContentTemplate> {
    Html(CreateContentTemplate {
        is_admin: true,
        form: form.view(errors),
    })
}

fn empty_form<F: ContentForm>() -> Html<CreateContentTemplate> {
    render_form(&F::default(), &FormErrors::default())
}

/// Parse the id segment and delete the row, 404 when it is not a number or
/// nothing matched.
async fn delete_row(
    state: &AppState,
    admin: &AdminUser,
    kind: &'static str,
    raw_id: &str,
    delete: fn(&mut dyn Executor, i64) -> DbResult<bool>,
) -> AppResult<()> {
    let id: i64 = raw_id.parse().map_err(|_| AppError::NotFound)?;

    if !state.db.interact(move |conn| delete(conn, id)).await? {
        tracing::warn!(kind, id, "Delete requested for missing row");
        return Err(AppError::NotFound);
    }

    tracing::info!(kind, id, admin_id = admin.id(), "Row deleted");
    Ok(())
}

// -- Workouts --

async fn new_workout(_admin: AdminUser) -> Html<CreateContentTemplate> {
    empty_form::<WorkoutForm>()
}

async fn create_workout(
    admin: AdminUser,
    State(state): State<AppState>,
    Form(form): Form<WorkoutForm>,
) -> AppResult<Response> {
    let workout = match form.validate() {
        Ok(workout) => workout,
        Err(errors) => return Ok(render_form(&form, &errors).into_response()),
    };

    let day = workout.day.label;
    let id = state
        .db
        .interact(move |conn| content::insert_workout(conn, &workout))
        .await?;
    tracing::info!(id, day, admin_id = admin.id(), "Workout created");

    Ok(Redirect::to("/schedule").into_response())
}

async fn delete_workout(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    delete_row(&state, &admin, "workout", &id, content::delete_workout).await?;
    Ok(Redirect::to("/schedule"))
}

// -- Prices --

async fn new_price(_admin: AdminUser) -> Html<CreateContentTemplate> {
    empty_form::<PriceForm>()
}

async fn create_price(
    admin: AdminUser,
    State(state): State<AppState>,
    Form(form): Form<PriceForm>,
) -> AppResult<Response> {
    let price = match form.validate() {
        Ok(price) => price,
        Err(errors) => return Ok(render_form(&form, &errors).into_response()),
    };

    let featured = price.is_featured;
    let id = state
        .db
        .interact(move |conn| content::insert_price(conn, &price))
        .await?;
    tracing::info!(id, featured, admin_id = admin.id(), "Price plan created");

    Ok(Redirect::to("/prices").into_response())
}

async fn delete_price(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    delete_row(&state, &admin, "price", &id, content::delete_price).await?;
    Ok(Redirect::to("/prices"))
}

// -- Coaches --

async fn new_coach(_admin: AdminUser) -> Html<CreateContentTemplate> {
    empty_form::<CoachForm>()
}

async fn create_coach(
    admin: AdminUser,
    State(state): State<AppState>,
    Form(form): Form<CoachForm>,
) -> AppResult<Response> {
    let coach = match form.validate() {
        Ok(coach) => coach,
        Err(errors) => return Ok(render_form(&form, &errors).into_response()),
    };

    let id = state
        .db
        .interact(move |conn| content::insert_coach(conn, &coach))
        .await?;
    tracing::info!(id, admin_id = admin.id(), "Coach created");

    Ok(Redirect::to("/gallery").into_response())
}

async fn delete_coach(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    delete_row(&state, &admin, "coach", &id, content::delete_coach).await?;
    Ok(Redirect::to("/gallery"))
}
