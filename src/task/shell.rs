//! Shell action - runs a command through `sh -c`

use crate::core::Parameters;
use crate::task::Task;
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs the `command` parameter in a shell
///
/// Every other parameter is exported to the command's environment under its
/// upper-cased key. String values are exported verbatim, everything else as JSON.
#[derive(Debug, Clone)]
pub struct ShellTask {
    /// Shell executable
    shell: String,
}

impl Default for ShellTask {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }
}

fn env_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Task for ShellTask {
    async fn invoke(&self, params: &Parameters) -> anyhow::Result<Value> {
        let command = params
            .get("command")
            .and_then(Value::as_str)
            .context("shell action requires a string 'command' parameter")?;

        debug!("Spawning {} with command: {}", self.shell, command);

        let envs = params
            .iter()
            .filter(|(key, _)| key.as_str() != "command")
            .map(|(key, value)| (key.to_uppercase(), env_value(value)));

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .envs(envs)
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to spawn {}", self.shell))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            warn!("command exited with code {}: {}", exit_code, stderr.trim());
            anyhow::bail!("command exited with code {}: {}", exit_code, stderr.trim());
        }

        debug!("command wrote {} bytes to stdout", output.stdout.len());

        Ok(Value::Null)
    }
}
