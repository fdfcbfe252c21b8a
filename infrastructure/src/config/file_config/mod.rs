//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod debate;
mod output;
mod providers;

pub use debate::FileDebateConfig;
pub use output::FileOutputConfig;
pub use providers::{FileProviderConfig, FileProvidersConfig};

use debate_domain::{ConfigIssue, ProviderRegistry};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Debate defaults
    pub debate: FileDebateConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// OpenAI-compatible providers keyed by name
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.debate.validate();
        issues.extend(providers::validate(&self.providers));
        issues
    }

    /// The provider registry described by `[providers]`.
    pub fn provider_registry(&self) -> ProviderRegistry {
        providers::to_provider_registry(&self.providers)
    }
}
