use anyhow::{Context, Result};
use data_factory::cli::commands::{parse_param_value, RunCommand, ValidateCommand};
use data_factory::cli::output::{format_pipeline_summary, style, CHECK, CROSS, INFO};
use data_factory::cli::{Cli, Command};
use data_factory::core::config::OrchestrationConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging, RUST_LOG wins over --verbose
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Run(cmd) => run_orchestration(cmd, cli.verbose).await?,
        Command::Validate(cmd) => validate_orchestration(cmd)?,
    }

    Ok(())
}

async fn run_orchestration(cmd: &RunCommand, verbose: bool) -> Result<()> {
    let mut config =
        OrchestrationConfig::from_file(&cmd.file).context("Failed to load orchestration config")?;

    for (key, raw) in &cmd.param {
        config.override_parameter(key, parse_param_value(raw));
        println!("{} Parameter override: {} = {}", INFO, style(key).cyan(), style(raw).dim());
    }

    let mut orchestrator = config.to_orchestrator()?;
    info!("Loaded {} pipelines from {}", orchestrator.pipelines().len(), cmd.file);

    orchestrator.run_pipelines(verbose).await;

    let summaries = orchestrator.summaries();
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!();
        for summary in &summaries {
            println!("{}", format_pipeline_summary(summary));
        }
    }

    if !orchestrator.all_succeeded() {
        let failed = summaries
            .iter()
            .filter(|s| s.status == data_factory::RunStatus::Failed)
            .count();
        println!("\n{} {} pipeline(s) {}", CROSS, failed, style("failed").red());
        std::process::exit(1);
    }

    println!("\n{} All pipelines completed {}", CHECK, style("successfully").green());
    Ok(())
}

fn validate_orchestration(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating orchestration...", INFO);

    match OrchestrationConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Orchestration configuration is valid!", CHECK);
            println!("  Pipelines: {}", style(config.pipelines.len()).cyan());
            for pipeline in &config.pipelines {
                println!(
                    "    {} ({} activities, {} parameters)",
                    style(&pipeline.name).bold(),
                    pipeline.activities.len(),
                    pipeline.parameters.len()
                );
            }
            println!("  Datasets: {}", style(config.datasets.len()).cyan());
            println!("  Linked services: {}", style(config.linked_services.len()).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}
