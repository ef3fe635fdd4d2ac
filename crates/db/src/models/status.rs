//! Job lifecycle status, mapped to the `job_status` Postgres enum.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a de-raining job.
///
/// Transitions are monotone: `Processing -> Completed | Failed`. `Pending`
/// exists in the schema for a future queued phase but is never set by the
/// orchestrator, which dispatches inference immediately on intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Whether the job has reached a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}
