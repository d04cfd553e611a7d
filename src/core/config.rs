//! Orchestration configuration from YAML

use crate::core::{
    activity::{Activity, DEFAULT_TIMEOUT_SECS},
    dataset::{Dataset, DatasetType, LinkedService, ServiceType},
    error::ConstructionError,
    params::Parameters,
    pipeline::Pipeline,
};
use crate::execution::Orchestrator;
use crate::task;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Top-level orchestration configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationConfig {
    /// Pipelines, run in the listed order
    pub pipelines: Vec<PipelineConfig>,

    #[serde(default)]
    pub datasets: Vec<DatasetConfig>,

    #[serde(default)]
    pub linked_services: Vec<LinkedServiceConfig>,
}

/// Pipeline configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,

    /// Pipeline-level parameters, override same-named activity parameters
    #[serde(default)]
    pub parameters: Parameters,

    #[serde(default)]
    pub activities: Vec<ActivityConfig>,
}

/// Activity configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    pub name: String,

    /// Name of a built-in action
    pub action: String,

    #[serde(default)]
    pub parameters: Parameters,

    /// Advisory timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Dataset configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub name: String,

    pub data_location: String,

    #[serde(default = "default_dataset_type")]
    pub dataset_type: DatasetType,

    #[serde(default)]
    pub properties: Parameters,

    #[serde(default)]
    pub parameters: Parameters,
}

fn default_dataset_type() -> DatasetType {
    DatasetType::File
}

/// Linked service configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedServiceConfig {
    pub name: String,

    pub connection_string: String,

    pub service_type: ServiceType,

    #[serde(default)]
    pub properties: Parameters,
}

impl ActivityConfig {
    /// Build an activity backed by its built-in action
    pub fn to_activity(&self) -> Result<Activity, ConstructionError> {
        let action = task::builtin(&self.action).ok_or_else(|| ConstructionError::UnknownAction {
            activity: self.name.clone(),
            action: self.action.clone(),
        })?;

        Ok(Activity::with_shared_action(self.name.clone(), action)?
            .with_parameters(self.parameters.clone())
            .with_timeout_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)))
    }
}

impl PipelineConfig {
    /// Build a pipeline with all of its activities
    pub fn to_pipeline(&self) -> Result<Pipeline, ConstructionError> {
        let activities = self
            .activities
            .iter()
            .map(ActivityConfig::to_activity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Pipeline::new(self.name.clone())?
            .with_parameters(self.parameters.clone())
            .with_activities(activities))
    }
}

impl DatasetConfig {
    pub fn to_dataset(&self) -> Result<Dataset, ConstructionError> {
        Ok(Dataset::new(self.name.clone(), self.data_location.clone(), self.dataset_type)?
            .with_properties(self.properties.clone())
            .with_parameters(self.parameters.clone()))
    }
}

impl LinkedServiceConfig {
    pub fn to_linked_service(&self) -> Result<LinkedService, ConstructionError> {
        Ok(
            LinkedService::new(self.name.clone(), self.connection_string.clone(), self.service_type)?
                .with_properties(self.properties.clone()),
        )
    }
}

impl OrchestrationConfig {
    /// Load orchestration configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse orchestration configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: OrchestrationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration without running anything
    pub fn validate(&self) -> Result<()> {
        if self.pipelines.is_empty() {
            anyhow::bail!("Configuration defines no pipelines");
        }

        // Building checks names, actions and pipeline uniqueness
        self.to_orchestrator()?;

        for dataset in &self.datasets {
            dataset.to_dataset()?;
        }
        for service in &self.linked_services {
            service.to_linked_service()?;
        }

        let mut seen = HashSet::new();
        for dataset in &self.datasets {
            if !seen.insert(&dataset.name) {
                anyhow::bail!("Duplicate dataset name: {}", dataset.name);
            }
        }
        let mut seen = HashSet::new();
        for service in &self.linked_services {
            if !seen.insert(&service.name) {
                anyhow::bail!("Duplicate linked service name: {}", service.name);
            }
        }

        Ok(())
    }

    /// Set a parameter on every pipeline, replacing any configured value
    pub fn override_parameter(&mut self, key: &str, value: serde_json::Value) {
        for pipeline in &mut self.pipelines {
            pipeline.parameters.insert(key.to_string(), value.clone());
        }
    }

    /// Build an orchestrator owning every configured pipeline
    pub fn to_orchestrator(&self) -> Result<Orchestrator, ConstructionError> {
        let pipelines = self
            .pipelines
            .iter()
            .map(PipelineConfig::to_pipeline)
            .collect::<Result<Vec<_>, _>>()?;
        Orchestrator::new(pipelines)
    }

    pub fn datasets(&self) -> Result<Vec<Dataset>, ConstructionError> {
        self.datasets.iter().map(DatasetConfig::to_dataset).collect()
    }

    pub fn linked_services(&self) -> Result<Vec<LinkedService>, ConstructionError> {
        self.linked_services
            .iter()
            .map(LinkedServiceConfig::to_linked_service)
            .collect()
    }
}
