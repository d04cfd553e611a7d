//! CLI command definitions

use clap::Args;
use serde_json::Value;

/// Run every pipeline in an orchestration file
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to orchestration YAML file
    #[arg(short, long)]
    pub file: String,

    /// Pipeline parameter overrides (key=value), applied to every pipeline
    #[arg(long, value_parser = parse_key_value)]
    pub param: Vec<(String, String)>,

    /// Print run summaries as JSON
    #[arg(long)]
    pub json: bool,
}

/// Validate an orchestration file
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to orchestration YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Parse key=value pairs
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid key=value pair: {}", s));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

/// Interpret an override value as JSON, falling back to a plain string
pub fn parse_param_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
