//! Debate settings from TOML (`[debate]` section)

use debate_application::{BehaviorConfig, MAX_ROUNDS};
use debate_domain::{ConfigIssue, DEFAULT_HISTORY_BUDGET};
use serde::{Deserialize, Serialize};

/// Raw debate configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Participant identifiers (`provider:model`)
    pub models: Vec<String>,
    /// Number of rounds (1..=10)
    pub rounds: u32,
    /// Synthesizer identifier; the first model when unset
    pub synthesizer: Option<String>,
    /// Per-call timeout in seconds
    pub timeout_seconds: u64,
    /// Character budget for history shown to later rounds
    pub history_budget_chars: usize,
    /// Output token cap per call
    pub max_output_tokens: u32,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        let behavior = BehaviorConfig::default();
        Self {
            models: Vec::new(),
            rounds: 3,
            synthesizer: None,
            timeout_seconds: behavior.timeout.as_secs(),
            history_budget_chars: DEFAULT_HISTORY_BUDGET,
            max_output_tokens: behavior.max_output_tokens,
        }
    }
}

impl FileDebateConfig {
    /// Convert to application-level behavior settings.
    pub fn to_behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig::default()
            .with_timeout_seconds(self.timeout_seconds)
            .with_history_budget(self.history_budget_chars)
            .with_max_output_tokens(self.max_output_tokens)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (index, model) in self.models.iter().enumerate() {
            if model.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    format!("debate.models[{}]", index),
                    "model identifier cannot be empty",
                ));
            }
        }
        if let Some(synthesizer) = &self.synthesizer {
            if synthesizer.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    "debate.synthesizer",
                    "model identifier cannot be empty",
                ));
            }
        }
        if !(1..=MAX_ROUNDS).contains(&self.rounds) {
            issues.push(ConfigIssue::error(
                "debate.rounds",
                format!("must be between 1 and {}, got {}", MAX_ROUNDS, self.rounds),
            ));
        }
        if self.timeout_seconds == 0 {
            issues.push(ConfigIssue::error("debate.timeout_seconds", "cannot be 0"));
        }
        if self.history_budget_chars == 0 {
            issues.push(ConfigIssue::error("debate.history_budget_chars", "cannot be 0"));
        }
        if self.max_output_tokens == 0 {
            issues.push(ConfigIssue::warning(
                "debate.max_output_tokens",
                "0 leaves no room for a response",
            ));
        }

        issues
    }
}
