//! The job orchestrator: drives a single upload through validation,
//! artifact storage, inference, and persistence.
//!
//! The transient artifact is removed on every exit path after it was
//! stored. That cleanup is best-effort: a removal failure is logged and
//! never masks the primary outcome.

use std::sync::Arc;

use derain_core::artifacts::{ArtifactStore, StoredArtifact};
use derain_core::error::CoreError;
use derain_core::types::DbId;
use derain_core::upload::{self, UploadedImage};
use derain_db::models::job::{JobResult, NewJob};
use derain_db::repositories::JobRepo;
use derain_db::DbPool;
use derain_inference::{Derain, InferenceError};

/// Outcome of a successful submission.
#[derive(Debug)]
pub struct ProcessedImage {
    /// Repository-assigned job id.
    pub job_id: DbId,
    /// Result references recorded on the job.
    pub result: JobResult,
}

/// Everything that can go wrong while submitting one upload. Each variant
/// marks how far the pipeline got, which determines the side effects that
/// exist when the error is returned.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Rejected before any side effect: no artifact, no job row.
    #[error("{0}")]
    Validation(String),

    /// The upload could not be persisted to the artifact store. No job
    /// row was created.
    #[error("Failed to store uploaded image: {0}")]
    Storage(#[source] std::io::Error),

    /// The job row could not be created or the failure status could not
    /// be recorded. The artifact has been removed.
    #[error("Failed to persist job record: {0}")]
    Persistence(#[source] sqlx::Error),

    /// Inference failed; the job was marked failed (best effort) and the
    /// artifact removed.
    #[error("Failed to process image: {source}")]
    Inference {
        job_id: DbId,
        #[source]
        source: InferenceError,
    },

    /// Inference succeeded but the completion update failed. The job is
    /// left in `processing` and the successful result is carried here so
    /// callers can surface the inconsistency instead of discarding it.
    #[error("Image was processed but the result could not be recorded for job {job_id}: {source}")]
    ResultUnrecorded {
        job_id: DbId,
        result: JobResult,
        #[source]
        source: sqlx::Error,
    },
}

/// Single-job state machine over the injected collaborators.
pub struct Orchestrator {
    pool: DbPool,
    store: Arc<ArtifactStore>,
    derainer: Arc<dyn Derain>,
}

impl Orchestrator {
    pub fn new(pool: DbPool, store: Arc<ArtifactStore>, derainer: Arc<dyn Derain>) -> Self {
        Self {
            pool,
            store,
            derainer,
        }
    }

    /// Drive one upload to a terminal job state.
    ///
    /// Steps, in order, each durable before the next begins:
    /// 1. validate (no side effects on rejection),
    /// 2. store the artifact,
    /// 3. create the job row in `processing`,
    /// 4. call inference and record the terminal status,
    /// 5. remove the artifact (every path after step 2).
    pub async fn submit(&self, upload: UploadedImage) -> Result<ProcessedImage, SubmitError> {
        upload::validate(&upload).map_err(|e| match e {
            CoreError::Validation(msg) => SubmitError::Validation(msg),
            other => SubmitError::Validation(other.to_string()),
        })?;

        let artifact = self
            .store
            .save(&upload.filename, &upload.bytes)
            .await
            .map_err(SubmitError::Storage)?;

        let stored_path = artifact.path.to_string_lossy();
        let new_job = NewJob {
            original_filename: &upload.filename,
            original_path: &stored_path,
        };
        let job = match JobRepo::create(&self.pool, &new_job).await {
            Ok(job) => job,
            Err(e) => {
                self.discard(&artifact).await;
                return Err(SubmitError::Persistence(e));
            }
        };

        tracing::info!(job_id = job.id, filename = %upload.filename, "Dispatching image to inference");

        let outcome = self
            .derainer
            .transform(upload.bytes, &upload.filename, &upload.mime_type)
            .await;

        let result = match outcome {
            Ok(output) => {
                let result = JobResult {
                    original_image: output.original_image,
                    derained_image: output.derained_image,
                };
                match JobRepo::complete(&self.pool, job.id, &result).await {
                    Ok(()) => {
                        tracing::info!(job_id = job.id, "Job completed");
                        Ok(ProcessedImage {
                            job_id: job.id,
                            result,
                        })
                    }
                    // Deliberately NOT downgraded to `failed`: the
                    // transformation itself succeeded.
                    Err(e) => Err(SubmitError::ResultUnrecorded {
                        job_id: job.id,
                        result,
                        source: e,
                    }),
                }
            }
            Err(e) => {
                if let Err(update_err) = JobRepo::fail(&self.pool, job.id).await {
                    tracing::error!(
                        job_id = job.id,
                        error = %update_err,
                        "Failed to mark job as failed"
                    );
                }
                Err(SubmitError::Inference {
                    job_id: job.id,
                    source: e,
                })
            }
        };

        self.discard(&artifact).await;
        result
    }

    /// Best-effort artifact removal. Never escalated to the caller.
    async fn discard(&self, artifact: &StoredArtifact) {
        if let Err(e) = self.store.remove(artifact).await {
            tracing::warn!(
                path = %artifact.path.display(),
                error = %e,
                "Failed to remove transient upload artifact"
            );
        }
    }
}
