//! Errors raised while constructing activities, pipelines and orchestrators

use std::fmt;
use thiserror::Error;

/// Kind of named entity, used to attribute naming errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Activity,
    Pipeline,
    Dataset,
    LinkedService,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Activity => "activity",
            EntityKind::Pipeline => "pipeline",
            EntityKind::Dataset => "dataset",
            EntityKind::LinkedService => "linked service",
        };
        f.write_str(label)
    }
}

/// Error types for construction-time validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("The {kind} name '{name}' is not in snake_case")]
    InvalidName { kind: EntityKind, name: String },

    #[error("Duplicate pipeline names found: {}", .0.join(", "))]
    DuplicatePipelineNames(Vec<String>),

    #[error("Activity '{activity}' references unknown action '{action}'")]
    UnknownAction { activity: String, action: String },
}
