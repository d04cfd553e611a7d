//! Parameter tables and the rules for passing values between activities

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Named parameters handed to an activity's action
pub type Parameters = HashMap<String, Value>;

/// Output variables an activity may hand forward to the next activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropagatedVariable {
    DfSpark,
}

impl PropagatedVariable {
    /// Every recognized variable
    pub const ALL: &'static [PropagatedVariable] = &[PropagatedVariable::DfSpark];

    /// Key under which the variable appears in outputs and parameters
    pub fn key(&self) -> &'static str {
        match self {
            PropagatedVariable::DfSpark => "df_spark",
        }
    }

    /// Look up a recognized variable by key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|var| var.key() == key)
    }
}

/// The previous activity returned something other than a mapping
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Previous output must be a mapping, got: {output}")]
pub struct InvalidOutputError {
    pub output: Value,
}

/// Check whether a value is falsy: null, false, zero, or an empty string,
/// array or object
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Check whether an activity output carries nothing to propagate
pub fn is_empty_output(output: &Value) -> bool {
    is_falsy(output)
}

/// Extract the recognized variables from an activity's output.
///
/// Unrecognized keys are dropped. Empty outputs yield an empty table.
pub fn extract_propagated(output: &Value) -> Result<Parameters, InvalidOutputError> {
    if is_empty_output(output) {
        return Ok(Parameters::new());
    }

    let map = output.as_object().ok_or_else(|| InvalidOutputError {
        output: output.clone(),
    })?;

    Ok(PropagatedVariable::ALL
        .iter()
        .filter_map(|var| {
            map.get(var.key())
                .map(|value| (var.key().to_string(), value.clone()))
        })
        .collect())
}

/// Keys of an output that are not recognized and will not be passed on
pub fn dropped_keys(output: &Value) -> Vec<String> {
    let mut keys: Vec<String> = output
        .as_object()
        .map(|map| {
            map.keys()
                .filter(|key| PropagatedVariable::from_key(key).is_none())
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    keys.sort();
    keys
}

/// Overwrite every activity parameter that the pipeline also defines.
///
/// Returns the inherited keys, sorted.
pub fn inherit_pipeline_parameters(
    activity_params: &mut Parameters,
    pipeline_params: &Parameters,
) -> Vec<String> {
    let mut inherited = Vec::new();
    for (key, value) in pipeline_params {
        if let Some(slot) = activity_params.get_mut(key) {
            *slot = value.clone();
            inherited.push(key.clone());
        }
    }
    inherited.sort();
    inherited
}
