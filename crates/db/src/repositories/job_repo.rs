//! Repository for the `jobs` table.
//!
//! A job is created in `processing` and updated exactly once more, to a
//! terminal status. `list_recent` returns the history projection only, so
//! transient upload paths never leave the database layer.

use sqlx::types::Json;
use sqlx::PgPool;

use derain_core::types::DbId;

use crate::models::job::{Job, JobResult, JobSummary, NewJob};
use crate::models::status::JobStatus;

/// Column list for full `jobs` queries.
const COLUMNS: &str = "id, original_filename, original_path, status, created_at, result";

/// Column list for the history projection. `original_path` is deliberately
/// absent.
const SUMMARY_COLUMNS: &str = "id, original_filename, created_at, status, result";

/// Maximum (and default) page size for the history listing.
const MAX_HISTORY_LIMIT: i64 = 50;

/// Provides CRUD operations for de-raining jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new job in `processing` status. Returns the full row,
    /// including the repository-assigned id and creation timestamp.
    pub async fn create(pool: &PgPool, input: &NewJob<'_>) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (original_filename, original_path, status) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(input.original_filename)
            .bind(input.original_path)
            .bind(JobStatus::Processing)
            .fetch_one(pool)
            .await
    }

    /// Mark a job as completed with the inference result references.
    pub async fn complete(
        pool: &PgPool,
        job_id: DbId,
        result: &JobResult,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE jobs SET status = $2, result = $3 WHERE id = $1")
            .bind(job_id)
            .bind(JobStatus::Completed)
            .bind(Json(result))
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Mark a job as failed. No result is recorded and no automatic retry
    /// is performed; the caller may resubmit as a new job.
    pub async fn fail(pool: &PgPool, job_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE jobs SET status = $2 WHERE id = $1")
            .bind(job_id)
            .bind(JobStatus::Failed)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the most recent jobs, newest first. `limit` defaults to 50 and
    /// is capped at 50.
    pub async fn list_recent(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<JobSummary>, sqlx::Error> {
        let limit = limit.unwrap_or(MAX_HISTORY_LIMIT).clamp(1, MAX_HISTORY_LIMIT);

        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM jobs \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, JobSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
