//! data-factory - run activities in pipelines, and pipelines under an orchestrator

pub mod cli;
pub mod core;
pub mod execution;
pub mod task;

// Re-export commonly used types
pub use crate::core::{Activity, ConstructionError, FailureReason, Parameters, Pipeline, RunStatus};
pub use crate::execution::{Orchestrator, PipelineSummary};
pub use crate::task::Task;
