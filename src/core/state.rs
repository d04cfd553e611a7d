//! Execution state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Run status shared by activities and pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RunStatus {
    /// Never executed
    #[default]
    NotStarted,
    /// Currently executing
    Running,
    /// Finished without failure
    Succeeded,
    /// Finished with a failure
    Failed,
    /// Reserved, never set by the engine
    Canceled,
}

impl RunStatus {
    /// Check if the status ends a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Succeeded | RunStatus::Failed | RunStatus::Canceled)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunStatus::NotStarted => "NotStarted",
            RunStatus::Running => "Running",
            RunStatus::Succeeded => "Succeeded",
            RunStatus::Failed => "Failed",
            RunStatus::Canceled => "Canceled",
        };
        f.write_str(label)
    }
}

/// Why a pipeline run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    ActivityFailed,
    /// Reserved, timeouts are not enforced
    Timeout,
    InvalidConfiguration,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FailureReason::ActivityFailed => "One or more activities failed",
            FailureReason::Timeout => "Pipeline execution timed out",
            FailureReason::InvalidConfiguration => "Invalid pipeline configuration",
        };
        f.write_str(text)
    }
}

/// Run state of a pipeline, rebuilt from scratch on every run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineRunState {
    /// Unique id of the latest run
    pub run_id: Option<Uuid>,

    pub status: RunStatus,

    pub failure_reason: Option<FailureReason>,

    /// Failure text of the activity (or output check) that failed the run
    pub failure_message: Option<String>,

    pub started_at: Option<DateTime<Utc>>,

    pub completed_at: Option<DateTime<Utc>>,
}

impl PipelineRunState {
    /// Create a state for a pipeline that has never run
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every field and mark the pipeline as running
    pub fn start(&mut self) {
        *self = Self {
            run_id: Some(Uuid::new_v4()),
            status: RunStatus::Running,
            failure_reason: None,
            failure_message: None,
            started_at: Some(Utc::now()),
            completed_at: None,
        };
    }

    /// Mark pipeline as succeeded
    pub fn succeed(&mut self) {
        self.status = RunStatus::Succeeded;
        self.completed_at = Some(Utc::now());
    }

    /// Mark pipeline as failed
    pub fn fail(&mut self, reason: FailureReason, message: Option<String>) {
        self.status = RunStatus::Failed;
        self.failure_reason = Some(reason);
        self.failure_message = message;
        self.completed_at = Some(Utc::now());
    }
}
