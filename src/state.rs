use crate::config::Config;

use crate::db::DbPool;

/// Everything a request handler needs, built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
}
