use askama::Template;
use axum::extract::State;

use crate::auth::SessionIdentity;
use crate::db::content;
use crate::db::models::Price;
use crate::error::AppResult;
use crate::extractors::MaybeUser;
use crate::routes::home::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/prices.html")]
pub struct PricesTemplate {
    pub is_admin: bool,
    pub plans: Vec<Price>,
}

/// GET /prices
pub async fn prices(
    State(state): State<AppState>,
    maybe_user: MaybeUser,
) -> AppResult<Html<PricesTemplate>> {
    let plans = state.db.interact(|conn| content::list_prices(conn)).await?;

    Ok(Html(PricesTemplate {
        is_admin: maybe_user.is_authenticated(),
        plans,
    }))
}
