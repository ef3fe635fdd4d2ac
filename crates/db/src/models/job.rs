//! Job entity models and projections for the de-raining pipeline.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use derain_core::types::{DbId, Timestamp};

use super::status::JobStatus;

/// A row from the `jobs` table.
///
/// `original_path` points at the transient upload artifact and is never
/// serialized to clients.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: DbId,
    pub original_filename: String,
    #[serde(skip_serializing)]
    pub original_path: Option<String>,
    pub status: JobStatus,
    pub created_at: Timestamp,
    pub result: Option<Json<JobResult>>,
}

/// Image references produced by a completed inference call. The strings are
/// opaque to this service (the inference backend returns data URIs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    pub original_image: String,
    pub derained_image: String,
}

/// Insert DTO for [`JobRepo::create`](crate::repositories::JobRepo::create).
#[derive(Debug)]
pub struct NewJob<'a> {
    pub original_filename: &'a str,
    pub original_path: &'a str,
}

/// Projection returned by `GET /api/history`. Excludes `original_path`
/// at the query level, not just at serialization time.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: DbId,
    pub original_filename: String,
    pub created_at: Timestamp,
    pub status: JobStatus,
    pub result: Option<Json<JobResult>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_serialization_omits_original_path() {
        let job = Job {
            id: 7,
            original_filename: "rainy.jpg".into(),
            original_path: Some("uploads/abc-rainy.jpg".into()),
            status: JobStatus::Completed,
            created_at: chrono::Utc::now(),
            result: Some(Json(JobResult {
                original_image: "data:image/png;base64,aaa".into(),
                derained_image: "data:image/png;base64,bbb".into(),
            })),
        };

        let json = serde_json::to_value(&job).unwrap();
        assert!(json.get("originalPath").is_none());
        assert!(json.get("original_path").is_none());
        assert_eq!(json["status"], "completed");
        assert_eq!(json["result"]["derainedImage"], "data:image/png;base64,bbb");
    }

    #[test]
    fn job_result_uses_camel_case_keys() {
        let result = JobResult {
            original_image: "o".into(),
            derained_image: "d".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["originalImage"], "o");
        assert_eq!(json["derainedImage"], "d");
    }
}
