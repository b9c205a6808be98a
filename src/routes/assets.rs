//! Stylesheet and images compiled into the binary.

use axum::extract::Path;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

use crate::error::{AppError, AppResult};

#[derive(Embed)]
#[folder = "assets/"]
struct SiteAssets;

const CACHE_CONTROL: &str = "public, max-age=86400";

/// GET /assets/{*path}
pub async fn asset(Path(path): Path<String>) -> AppResult<Response> {
    let Some(file) = SiteAssets::get(&path) else {
        tracing::debug!(%path, "Unknown asset requested");
        return Err(AppError::NotFound);
    };

    let content_type = mime_guess::from_path(&path).first_or_octet_stream();
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        file.data,
    )
        .into_response())
}
