//! CLI output formatting

use crate::core::RunStatus;
use crate::execution::PipelineSummary;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");

/// Format a run status for display
pub fn format_status(status: RunStatus) -> String {
    match status {
        RunStatus::NotStarted => style("NOT STARTED").dim().to_string(),
        RunStatus::Running => style("RUNNING").yellow().to_string(),
        RunStatus::Succeeded => style("SUCCEEDED").green().to_string(),
        RunStatus::Failed => style("FAILED").red().to_string(),
        RunStatus::Canceled => style("CANCELED").yellow().to_string(),
    }
}

/// Format a pipeline summary for display, one line per activity
pub fn format_pipeline_summary(summary: &PipelineSummary) -> String {
    let icon = match summary.status {
        RunStatus::Succeeded => CHECK,
        RunStatus::Failed => CROSS,
        _ => INFO,
    };

    let mut out = format!(
        "{} {} - {}",
        icon,
        style(&summary.name).bold(),
        format_status(summary.status)
    );

    if let Some(run_id) = summary.run_id {
        out.push_str(&format!(" ({})", style(&run_id.to_string()[..8]).dim()));
    }

    if let Some(reason) = summary.failure_reason {
        out.push_str(&format!("\n    {}", style(reason).red()));
        if let Some(message) = &summary.failure_message {
            out.push_str(&format!(": {}", style(message).dim()));
        }
    }

    for activity in &summary.activities {
        out.push_str(&format!(
            "\n    {} {}",
            style(&activity.name).cyan(),
            format_status(activity.status)
        ));
    }

    out
}
