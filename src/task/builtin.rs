//! Built-in actions that need no external process

use crate::core::Parameters;
use crate::task::Task;
use async_trait::async_trait;
use serde_json::Value;

/// Does nothing and returns no output
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTask;

#[async_trait]
impl Task for NoopTask {
    async fn invoke(&self, _params: &Parameters) -> anyhow::Result<Value> {
        Ok(Value::Null)
    }
}

/// Returns its own parameter table as output
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitTask;

#[async_trait]
impl Task for EmitTask {
    async fn invoke(&self, params: &Parameters) -> anyhow::Result<Value> {
        Ok(Value::Object(
            params
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ))
    }
}

/// Always fails, with the `message` parameter as its error text
#[derive(Debug, Clone, Copy, Default)]
pub struct FailTask;

const DEFAULT_FAIL_MESSAGE: &str = "activity failed";

#[async_trait]
impl Task for FailTask {
    async fn invoke(&self, params: &Parameters) -> anyhow::Result<Value> {
        let message = match params.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => DEFAULT_FAIL_MESSAGE.to_string(),
        };
        anyhow::bail!(message)
    }
}
