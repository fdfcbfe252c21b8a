//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished debate is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every round, failures, synthesis and statistics (default)
    #[default]
    Full,
    /// Only the final synthesis
    Synthesis,
    /// The debate result as pretty-printed JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "synthesis" => Ok(Self::Synthesis),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown output format '{}' (expected full, synthesis or json)",
                other
            )),
        }
    }
}
