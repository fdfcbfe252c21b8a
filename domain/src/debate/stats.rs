//! Debate statistics and cost estimation

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Characters per token used for estimation.
const CHARS_PER_TOKEN: usize = 4;

/// Blended USD price per token ($5 per million).
const USD_PER_TOKEN: f64 = 0.000_005;

/// Aggregate statistics attached to a finished debate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebateStats {
    pub duration_ms: u64,
    /// Characters sent to and received from backends, host turns included
    pub processed_chars: usize,
    pub estimated_tokens: usize,
    /// Formatted like `$0.0123`
    pub estimated_cost: String,
}

impl DebateStats {
    pub fn estimate(duration: Duration, processed_chars: usize) -> Self {
        let estimated_tokens = processed_chars.div_ceil(CHARS_PER_TOKEN);
        Self {
            duration_ms: duration.as_millis() as u64,
            processed_chars,
            estimated_tokens,
            estimated_cost: format!("${:.4}", estimated_tokens as f64 * USD_PER_TOKEN),
        }
    }
}
