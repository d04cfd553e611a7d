//! Pipeline orchestration

pub mod orchestrator;

pub use orchestrator::{ActivitySummary, Orchestrator, PipelineSummary};
