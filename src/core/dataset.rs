//! Dataset and linked service value objects

use crate::core::{
    error::{ConstructionError, EntityKind},
    naming::validate_name,
    params::{is_falsy, Parameters},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kinds of dataset storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetType {
    File,
}

/// A named data location, optionally with `<PLACEHOLDER>` segments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub name: String,
    pub data_location: String,
    pub dataset_type: DatasetType,
    pub properties: Parameters,
    pub parameters: Parameters,
}

impl Dataset {
    pub fn new(
        name: impl Into<String>,
        data_location: impl Into<String>,
        dataset_type: DatasetType,
    ) -> Result<Self, ConstructionError> {
        Ok(Self {
            name: validate_name(EntityKind::Dataset, name)?,
            data_location: data_location.into(),
            dataset_type,
            properties: Parameters::new(),
            parameters: Parameters::new(),
        })
    }

    pub fn with_properties(mut self, properties: Parameters) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Replace `<KEY>` placeholders in the data location
    ///
    /// Keys are matched upper-cased. Falsy values (null, false, zero, empty
    /// string, array or object) substitute as empty strings, strings without
    /// quotes, anything else as JSON text.
    pub fn build_parametrized_data_location(&self, values: &Parameters) -> String {
        let mut location = self.data_location.clone();
        for (key, value) in values {
            let placeholder = format!("<{}>", key.to_uppercase());
            if location.contains(&placeholder) {
                let replacement = match value {
                    v if is_falsy(v) => String::new(),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                location = location.replace(&placeholder, &replacement);
            }
        }
        location
    }
}

/// Kinds of external services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    HttpEndpoint,
}

/// Connection details for an external service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedService {
    pub name: String,
    pub connection_string: String,
    pub service_type: ServiceType,
    pub properties: Parameters,
}

impl LinkedService {
    pub fn new(
        name: impl Into<String>,
        connection_string: impl Into<String>,
        service_type: ServiceType,
    ) -> Result<Self, ConstructionError> {
        Ok(Self {
            name: validate_name(EntityKind::LinkedService, name)?,
            connection_string: connection_string.into(),
            service_type,
            properties: Parameters::new(),
        })
    }

    pub fn with_properties(mut self, properties: Parameters) -> Self {
        self.properties = properties;
        self
    }
}
