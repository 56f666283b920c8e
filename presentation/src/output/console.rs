//! Console output formatter for council results

use colored::{ColoredString, Colorize};
use council_domain::{
    Agreement, ConsensusResult, Mood, OperationStatus, OperationSummary, OutputFormat,
    ProviderFailure, ProviderStatus, Reflection, StatusSnapshot,
};

/// Formats council results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn off ANSI colors for every later call
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// Render a result in the requested format
    pub fn render(result: &ConsensusResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result),
            OutputFormat::Summary => Self::format_summary(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format the complete result
    pub fn format(result: &ConsensusResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("AI Council Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Request:".cyan().bold(),
            result.kind.label()
        ));
        output.push_str(&format!("{} {}\n", "Input:".cyan().bold(), result.input));

        output.push_str(&Self::section_header("Responses"));
        for response in &result.responses {
            let title = format!(
                "── {} ({:.2}) ──",
                response.provider.display_name(),
                response.confidence
            );
            let title = if response.provider == result.best.provider {
                format!("{} *", title).green().bold()
            } else {
                title.yellow().bold()
            };
            output.push_str(&format!("\n{}\n{}\n", title, response.content));
            if let Some(rationale) = &response.rationale {
                output.push_str(&format!("{}\n", rationale.dimmed()));
            }
        }

        if !result.failures.is_empty() {
            output.push_str(&Self::section_header("Failures"));
            output.push_str(&Self::format_failures(&result.failures));
        }

        output.push_str(&Self::section_header("Consensus"));
        output.push_str(&format!(
            "{} {}\n{} {:.3}\n{} {}\n{} {}/{}\n",
            "Best:".bold(),
            result.best.provider.display_name(),
            "Mean confidence:".bold(),
            result.mean_confidence(),
            "Agreement:".bold(),
            Self::agreement(result.agreement()),
            "Responded:".bold(),
            result.summary.responded,
            result.summary.responded + result.summary.failed,
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &ConsensusResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Best response with the consensus line (concise output)
    pub fn format_summary(result: &ConsensusResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== AI Council Consensus ===".cyan().bold()
        ));
        output.push_str(&format!(
            "{} {} {} {:.2}\n\n",
            "Best:".bold(),
            result.best.provider.display_name(),
            "confidence".dimmed(),
            result.best.confidence
        ));
        output.push_str(&result.best.content);
        output.push_str("\n\n");
        output.push_str(&format!(
            "{} mean {:.3}, agreement {} ({} of {} providers)\n",
            "Consensus:".bold(),
            result.mean_confidence(),
            Self::agreement(result.agreement()),
            result.summary.responded,
            result.summary.responded + result.summary.failed,
        ));

        output
    }

    /// Message for a dispatch where nobody answered
    pub fn format_no_response(failures: &[ProviderFailure]) -> String {
        let mut output = format!("{}\n", "No providers responded".red().bold());
        if failures.is_empty() {
            output.push_str(&format!("{}\n", "(no providers are enabled)".dimmed()));
        } else {
            output.push_str(&Self::format_failures(failures));
        }
        output
    }

    fn format_failures(failures: &[ProviderFailure]) -> String {
        failures
            .iter()
            .map(|f| {
                format!(
                    "  {} {}: {}\n",
                    "x".red(),
                    f.provider.display_name(),
                    f.reason
                )
            })
            .collect()
    }

    /// Provider table plus recent operations
    pub fn format_status(status: &StatusSnapshot) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("AI Council Status"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}/{}\n",
            "Enabled providers:".cyan().bold(),
            status.enabled_count,
            status.total_providers
        ));

        output.push_str(&Self::section_header("Providers"));
        output.push_str(&Self::format_providers(&status.providers));

        output.push_str(&format!(
            "{} {} total, {} succeeded, {} failed\n",
            "Operations:".cyan().bold(),
            status.total_operations,
            status.succeeded_operations.to_string().green(),
            status.failed_operations.to_string().red()
        ));

        output.push_str(&Self::section_header("Recent operations"));
        output.push_str(&Self::format_history(&status.recent_operations));

        if !status.recent_errors.is_empty() {
            output.push_str(&Self::section_header("Recent errors"));
            output.push_str(&Self::format_history(&status.recent_errors));
        }

        output.push_str(&Self::footer());
        output
    }

    pub fn format_status_json(status: &StatusSnapshot) -> String {
        serde_json::to_string_pretty(status).unwrap_or_else(|_| "{}".to_string())
    }

    /// One line per provider
    pub fn format_providers(providers: &[ProviderStatus]) -> String {
        providers
            .iter()
            .map(|p| {
                let state = if p.enabled {
                    "enabled ".green()
                } else {
                    "disabled".red()
                };
                format!(
                    "  {:<11} {} {:<16} {} requests\n",
                    p.id.display_name(),
                    state,
                    p.model,
                    p.requests
                )
            })
            .collect()
    }

    /// One line per operation, oldest first
    pub fn format_history(operations: &[OperationSummary]) -> String {
        if operations.is_empty() {
            return format!("  {}\n", "(none)".dimmed());
        }

        operations
            .iter()
            .map(|op| {
                let outcome = match op.status {
                    OperationStatus::Succeeded => format!(
                        "{} {} {:.3} {}",
                        "ok".green(),
                        op.best_provider.map(|p| p.display_name()).unwrap_or("-"),
                        op.mean_confidence.unwrap_or_default(),
                        op.agreement.map(Self::agreement).unwrap_or_default()
                    ),
                    OperationStatus::Failed => format!(
                        "{} {}",
                        "failed".red(),
                        op.error.as_deref().unwrap_or("unknown error")
                    ),
                };
                format!(
                    "  #{:<4} {:<15} {:<32} {}\n",
                    op.sequence,
                    op.kind.as_str(),
                    op.input_preview.replace('\n', " "),
                    outcome
                )
            })
            .collect()
    }

    /// Emotion levels with the dominant one highlighted, then recent reflections
    pub fn format_mood(mood: &Mood, reflections: &[Reflection]) -> String {
        let (dominant, _) = mood.dominant();
        let mut output = format!("{}\n", "Persona mood".cyan().bold());
        for (emotion, level) in mood.levels() {
            let bar = "#".repeat((level * 20.0).round() as usize);
            let line = format!("  {:<14} {:<20} {:.2}", emotion.as_str(), bar, level);
            if emotion == dominant {
                output.push_str(&format!("{}\n", line.bold()));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }
        if mood.reflection_pending {
            output.push_str(&format!("  {}\n", "(reflecting on the last result)".dimmed()));
        }
        if !reflections.is_empty() {
            output.push_str(&format!("{}\n", "Reflections".cyan().bold()));
            for reflection in reflections {
                output.push_str(&Self::format_reflection(reflection));
            }
        }
        output
    }

    pub fn format_reflection(reflection: &Reflection) -> String {
        let marker = if reflection.adjustments_needed {
            "!".yellow()
        } else {
            "-".dimmed()
        };
        format!(
            "  {} {} ({:.2})\n",
            marker, reflection.context, reflection.significance
        )
    }

    fn agreement(agreement: Agreement) -> ColoredString {
        match agreement {
            Agreement::High => agreement.as_str().green(),
            Agreement::Medium => agreement.as_str().yellow(),
            Agreement::Low => agreement.as_str().red(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
