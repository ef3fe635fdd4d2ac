//! Handlers for image processing and retrieval.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;

use derain_core::error::CoreError;
use derain_core::types::DbId;
use derain_core::upload::UploadedImage;
use derain_db::models::job::{Job, JobSummary};
use derain_db::repositories::JobRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response body for `POST /api/process-image`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessImageResponse {
    pub success: bool,
    pub id: DbId,
    pub original_image: String,
    pub derained_image: String,
    pub message: &'static str,
}

/// Response body for `GET /api/history`.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub images: Vec<JobSummary>,
}

/// Response body for `GET /api/image/{id}`.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub success: bool,
    pub image: Job,
}

/// POST /api/process-image
///
/// Accepts a multipart form with one `image` field, runs the upload
/// through the orchestrator, and returns the result references.
pub async fn process_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ProcessImageResponse>> {
    let mut upload: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("image") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let mime_type = field.content_type().unwrap_or("").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            upload = Some(UploadedImage {
                filename,
                mime_type,
                bytes: bytes.to_vec(),
            });
        }
        // ignore unknown fields
    }

    let upload =
        upload.ok_or_else(|| AppError::BadRequest("No image file provided".to_string()))?;

    let processed = state.orchestrator.submit(upload).await?;

    Ok(Json(ProcessImageResponse {
        success: true,
        id: processed.job_id,
        original_image: processed.result.original_image,
        derained_image: processed.result.derained_image,
        message: "Image processed successfully",
    }))
}

/// GET /api/history
///
/// Most recent jobs, newest first, capped at 50. The projection never
/// includes the transient upload path.
pub async fn get_history(State(state): State<AppState>) -> AppResult<Json<HistoryResponse>> {
    let images = JobRepo::list_recent(&state.pool, None).await?;
    Ok(Json(HistoryResponse {
        success: true,
        images,
    }))
}

/// GET /api/image/{id}
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ImageResponse>> {
    let image = JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Image", id }))?;
    Ok(Json(ImageResponse {
        success: true,
        image,
    }))
}
