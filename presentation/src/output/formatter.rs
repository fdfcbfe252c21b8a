//! Output formatter trait

use debate_domain::{DebateResult, OutputFormat};

/// Trait for formatting debate results
pub trait OutputFormatter {
    /// Format the complete debate result
    fn format(&self, result: &DebateResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &DebateResult) -> String;

    /// Format synthesis only (concise output)
    fn format_synthesis_only(&self, result: &DebateResult) -> String;

    /// Format in the requested output format
    fn render(&self, format: OutputFormat, result: &DebateResult) -> String {
        match format {
            OutputFormat::Full => self.format(result),
            OutputFormat::Synthesis => self.format_synthesis_only(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
