//! Orchestrator - runs a set of uniquely named pipelines in sequence

use crate::core::{ConstructionError, FailureReason, Pipeline, RunStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{error, info};
use uuid::Uuid;

/// Owns pipelines and runs them one after another
#[derive(Debug)]
pub struct Orchestrator {
    pipelines: Vec<Pipeline>,
}

/// Status of one activity after a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub name: String,
    pub status: RunStatus,
    pub failure_reason: Option<String>,
}

/// Serializable outcome of one pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub name: String,
    pub run_id: Option<Uuid>,
    pub status: RunStatus,
    pub failure_reason: Option<FailureReason>,
    pub failure_message: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub activities: Vec<ActivitySummary>,
}

impl PipelineSummary {
    /// Summarize the latest run of a pipeline
    pub fn from_pipeline(pipeline: &Pipeline) -> Self {
        let state = pipeline.state();
        Self {
            name: pipeline.name().to_string(),
            run_id: state.run_id,
            status: state.status,
            failure_reason: state.failure_reason,
            failure_message: state.failure_message.clone(),
            started_at: state.started_at,
            completed_at: state.completed_at,
            activities: pipeline
                .activities()
                .iter()
                .map(|a| ActivitySummary {
                    name: a.name().to_string(),
                    status: a.run_status(),
                    failure_reason: a.failure_reason().map(str::to_string),
                })
                .collect(),
        }
    }
}

impl Orchestrator {
    /// Create an orchestrator, failing if any pipeline name appears more than once
    pub fn new(pipelines: Vec<Pipeline>) -> Result<Self, ConstructionError> {
        let duplicates = duplicate_names(pipelines.iter().map(Pipeline::name));
        if !duplicates.is_empty() {
            return Err(ConstructionError::DuplicatePipelineNames(duplicates));
        }
        Ok(Self { pipelines })
    }

    pub fn pipelines(&self) -> &[Pipeline] {
        &self.pipelines
    }

    /// Get a pipeline by name
    pub fn pipeline(&self, name: &str) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| p.name() == name)
    }

    /// Run every pipeline in the order supplied
    ///
    /// Pipelines are independent: none sees another's output, and a failed
    /// pipeline does not stop the ones after it.
    pub async fn run_pipelines(&mut self, verbose: bool) {
        let total = self.pipelines.len();
        info!("Orchestrating {} pipelines", total);

        for (i, pipeline) in self.pipelines.iter_mut().enumerate() {
            if verbose {
                println!("\n[Orchestrator] --> ({}/{}) [Running Pipeline: {}]", i + 1, total, pipeline.name());
            }

            let status = pipeline.run(verbose).await;

            if status == RunStatus::Failed {
                error!(
                    "Pipeline {} failed: {}",
                    pipeline.name(),
                    pipeline.failure_message().unwrap_or_default()
                );
            }
            if verbose {
                println!(
                    "[Orchestrator] --> ({}/{}) [Pipeline: {}] Done with status = {}.\n",
                    i + 1,
                    total,
                    pipeline.name(),
                    status
                );
            }
        }
    }

    /// Snapshot of every pipeline's current status
    pub fn run_statuses(&self) -> HashMap<String, RunStatus> {
        self.pipelines
            .iter()
            .map(|p| (p.name().to_string(), p.run_status()))
            .collect()
    }

    /// Per-pipeline summaries, in pipeline order
    pub fn summaries(&self) -> Vec<PipelineSummary> {
        self.pipelines.iter().map(PipelineSummary::from_pipeline).collect()
    }

    /// Check if every pipeline succeeded
    pub fn all_succeeded(&self) -> bool {
        self.pipelines.iter().all(|p| p.run_status() == RunStatus::Succeeded)
    }
}

/// Names appearing more than once, each listed once in order of first appearance
fn duplicate_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for name in names {
        if !seen.insert(name) && reported.insert(name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}
