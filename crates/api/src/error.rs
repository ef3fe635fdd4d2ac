use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use derain_core::error::CoreError;

use crate::processing::SubmitError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`SubmitError`] for the
/// orchestration pipeline, and implements [`IntoResponse`] to produce the
/// JSON error bodies the client contract expects.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `derain_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx (read paths).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A failure in the submission pipeline.
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    json!({ "error": format!("{entity} not found") }),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, json!({ "error": msg }))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "Server error", "details": msg }),
                    )
                }
            },

            AppError::Database(err) => match err {
                sqlx::Error::RowNotFound => (
                    StatusCode::NOT_FOUND,
                    json!({ "error": "Image not found" }),
                ),
                other => {
                    tracing::error!(error = %other, "Database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "Database error", "details": other.to_string() }),
                    )
                }
            },

            AppError::Submit(submit) => submit_error_body(submit),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Map a submission failure to a status and response body.
///
/// Every non-validation variant reports `500` with upstream detail; the
/// completed-but-unrecorded case gets a distinct message (and the job id)
/// so operators can reconcile instead of assuming the transformation was
/// lost.
fn submit_error_body(err: &SubmitError) -> (StatusCode, serde_json::Value) {
    match err {
        SubmitError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),

        SubmitError::Storage(source) => {
            tracing::error!(error = %source, "Failed to store upload");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to store uploaded image",
                    "details": source.to_string(),
                }),
            )
        }

        SubmitError::Persistence(source) => {
            tracing::error!(error = %source, "Failed to persist job record");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to create processing record",
                    "details": source.to_string(),
                }),
            )
        }

        SubmitError::Inference { job_id, source } => {
            tracing::error!(job_id, error = %source, "Inference failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to process image",
                    "details": source.to_string(),
                }),
            )
        }

        SubmitError::ResultUnrecorded { job_id, source, .. } => {
            tracing::error!(job_id, error = %source, "Completed job could not be recorded");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Image was processed but the result could not be recorded",
                    "details": source.to_string(),
                    "id": job_id,
                }),
            )
        }
    }
}
