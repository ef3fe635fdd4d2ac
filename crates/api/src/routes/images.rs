use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Request body ceiling for multipart uploads.
///
/// Set well above the 10 MiB validation cap so oversized uploads reach
/// upload validation and get a 400, not a framework-level 413.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Mount the image processing and retrieval routes (nested under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/process-image", post(handlers::images::process_image))
        .route("/history", get(handlers::images::get_history))
        .route("/image/{id}", get(handlers::images::get_image))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
