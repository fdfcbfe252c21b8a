//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every round, failures, synthesis and statistics
    Full,
    /// Only the final synthesis
    Synthesis,
    /// JSON output
    Json,
}

impl From<OutputFormat> for debate_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => debate_domain::OutputFormat::Full,
            OutputFormat::Synthesis => debate_domain::OutputFormat::Synthesis,
            OutputFormat::Json => debate_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for model-debate
#[derive(Parser, Debug)]
#[command(name = "model-debate")]
#[command(author, version, about = "Multi-round debate between LLMs with a synthesized conclusion")]
#[command(long_about = r#"
model-debate puts several models in a structured debate about a topic.

Each round every model answers concurrently. From round 2 on, every model
sees what was said before and critiques or builds on it. A synthesizer model
then summarizes consensus, disagreements and a conclusion.

With --interactive you take part as the host: after every round you add your
own turn before the next round runs.

Models are written as provider:model. Built-in providers (used when none are
configured) are openai, openrouter and ollama.

Configuration files are loaded from (in priority order):
1. DEBATE_* environment variables
2. --config <path>     Explicit config file
3. ./debate.toml       Project-level config
4. ~/.config/model-debate/config.toml   Global config

Example:
  model-debate -m openai:gpt-4o -m openrouter:anthropic/claude-sonnet-4 "Is TDD worth it?"
  model-debate -r 3 --synthesizer openai:o3-mini -m openai:gpt-4o -m ollama:llama3.1 "Tabs or spaces?"
  model-debate --interactive -r 2 -m openai:gpt-4o -m ollama:llama3.1 "Should we adopt a monorepo?"
"#)]
pub struct Cli {
    /// The topic to debate
    pub topic: Option<String>,

    /// Participating models (can be specified multiple times)
    #[arg(short, long, value_name = "PROVIDER:MODEL")]
    pub model: Vec<String>,

    /// Number of rounds (1-10)
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Model that writes the final synthesis (default: first model)
    #[arg(long, value_name = "PROVIDER:MODEL")]
    pub synthesizer: Option<String>,

    /// Custom instruction for round 1
    #[arg(long, value_name = "TEXT")]
    pub instruction: Option<String>,

    /// Take part as the host between rounds
    #[arg(short, long)]
    pub interactive: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List registered providers and exit
    #[arg(long)]
    pub list_providers: bool,

    /// Also write daily-rolling log files to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write every debate event as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,
}
