//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as per-call timeouts and the history budget.

use debate_domain::DEFAULT_HISTORY_BUDGET;
use std::time::Duration;

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default `max_tokens` sent with every completion.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

/// Application behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorConfig {
    /// Maximum time to wait for one backend call before it is cancelled.
    pub timeout: Duration,
    /// Character budget for rendered history in later-round prompts.
    pub history_budget: usize,
    /// Output token cap sent with each request.
    pub max_output_tokens: u32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            history_budget: DEFAULT_HISTORY_BUDGET,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl BehaviorConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        self.with_timeout(Duration::from_secs(seconds))
    }

    pub fn with_history_budget(mut self, chars: usize) -> Self {
        self.history_budget = chars;
        self
    }

    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }
}
