//! Invocable units of work wrapped by activities

pub mod builtin;
pub mod shell;

use crate::core::Parameters;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub use builtin::{EmitTask, FailTask, NoopTask};
pub use shell::ShellTask;

/// Trait for activity actions - allows for different implementations
///
/// An action receives the effective parameter table of its activity and either
/// returns a value or fails. Returned objects may carry recognized variables
/// (such as `df_spark`) forward to the next activity in a pipeline.
#[async_trait]
pub trait Task: Send + Sync {
    async fn invoke(&self, params: &Parameters) -> anyhow::Result<Value>;
}

#[async_trait]
impl<F> Task for F
where
    F: Fn(&Parameters) -> anyhow::Result<Value> + Send + Sync,
{
    async fn invoke(&self, params: &Parameters) -> anyhow::Result<Value> {
        self(params)
    }
}

/// Resolve a built-in action by name
pub fn builtin(action: &str) -> Option<Arc<dyn Task>> {
    let task: Arc<dyn Task> = match action {
        "noop" => Arc::new(NoopTask),
        "emit" => Arc::new(EmitTask),
        "fail" => Arc::new(FailTask),
        "shell" => Arc::new(ShellTask::default()),
        _ => return None,
    };
    Some(task)
}

/// Names accepted by [`builtin`]
pub const BUILTIN_ACTIONS: &[&str] = &["noop", "emit", "fail", "shell"];
