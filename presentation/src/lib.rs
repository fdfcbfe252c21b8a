//! Presentation layer for model-debate
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive host prompt.

pub mod cli;
pub mod host;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use host::HostRepl;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
