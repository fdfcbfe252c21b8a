//! Console output formatter for debate results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use debate_application::RoundUpdate;
use debate_domain::{DebateResult, RoundResponse};

/// Formats debate results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colored output on or off
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format the complete debate result
    pub fn format(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Model Debate Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Topic:".cyan().bold(), result.topic));

        let participants = Self::participants(result);
        output.push_str(&format!(
            "{} {}\n",
            "Models:".cyan().bold(),
            participants.join(", ")
        ));

        for (index, round) in result.rounds.rounds().iter().enumerate() {
            output.push_str(&Self::section_header(&format!("Round {}", index + 1)));
            for response in round {
                output.push_str(&Self::response(response));
            }
        }

        output.push_str(&Self::section_header("Synthesis"));
        output.push_str(&format!("\n{}\n", result.synthesis));

        if !result.models_failed.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                "Failed models:".red().bold(),
                result.models_failed.join(", ")
            ));
        }

        output.push_str(&format!(
            "\n{} {:.1}s, ~{} tokens, est. {}\n",
            "Stats:".dimmed(),
            result.stats.duration_ms as f64 / 1000.0,
            result.stats.estimated_tokens,
            result.stats.estimated_cost
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &DebateResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format synthesis only (concise output)
    pub fn format_synthesis_only(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Debate Conclusion ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Topic:".bold(), result.topic));

        output.push_str(&format!(
            "{} {}\n\n",
            "Models consulted:".dimmed(),
            Self::participants(result).join(", ")
        ));

        output.push_str(&result.synthesis);
        output.push('\n');

        output
    }

    /// Format one round of an interactive debate
    pub fn format_round(update: &RoundUpdate) -> String {
        let mut output = Self::section_header(&format!(
            "Round {} of {}",
            update.round, update.total_rounds
        ));
        for response in &update.responses {
            output.push_str(&Self::response(response));
        }
        output
    }

    fn response(response: &RoundResponse) -> String {
        match &response.error {
            None => format!(
                "\n{}\n{}\n",
                format!("── {} ──", response.model).yellow().bold(),
                response.content
            ),
            Some(error) => format!(
                "\n{}\nError: {}\n",
                format!("── {} ──", response.model).red().bold(),
                error
            ),
        }
    }

    /// External participants in first-seen order
    fn participants(result: &DebateResult) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for response in result.rounds.responses().filter(|r| !r.is_host()) {
            if !seen.contains(&response.model.as_str()) {
                seen.push(&response.model);
            }
        }
        seen
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

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &DebateResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &DebateResult) -> String {
        Self::format_json(result)
    }

    fn format_synthesis_only(&self, result: &DebateResult) -> String {
        Self::format_synthesis_only(result)
    }
}
