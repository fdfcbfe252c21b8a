//! History compaction for multi-round prompts.
//!
//! Later rounds see every earlier response through [`HistoryCompactor::render`].
//! When the transcript grows past the budget, each response gets the same
//! share of it (`budget / response_count`), so one long answer cannot crowd
//! the others out. Failed responses still count toward the divisor but render
//! as a short failure marker that uses none of the budget.

use super::value_objects::RoundResponse;
use crate::core::string::{char_len, truncate_chars};

/// Default character budget for rendered history.
pub const DEFAULT_HISTORY_BUDGET: usize = 12_000;

/// Appended to any response cut down to its share.
pub const TRUNCATION_MARKER: &str = "\n[...truncated]";

/// Renders prior rounds into one bounded text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCompactor {
    budget: usize,
}

impl Default for HistoryCompactor {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_BUDGET)
    }
}

impl HistoryCompactor {
    pub fn new(budget: usize) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Content characters each response may keep, or `None` when the whole
    /// history fits.
    pub fn per_response_limit(&self, rounds: &[Vec<RoundResponse>]) -> Option<usize> {
        let total: usize = rounds
            .iter()
            .flatten()
            .map(|r| char_len(&r.content))
            .sum();
        if total <= self.budget {
            return None;
        }
        let count: usize = rounds.iter().map(Vec::len).sum();
        Some(self.budget / count.max(1))
    }

    /// Render `rounds` grouped by round, each response tagged with its model.
    pub fn render(&self, rounds: &[Vec<RoundResponse>]) -> String {
        let limit = self.per_response_limit(rounds);
        let mut out = String::new();

        for (index, round) in rounds.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&format!("=== Round {} ===\n", index + 1));
            for response in round {
                out.push('\n');
                out.push_str(&render_response(response, limit));
                out.push('\n');
            }
        }

        out
    }
}

fn render_response(response: &RoundResponse, limit: Option<usize>) -> String {
    if let Some(error) = &response.error {
        return format!("[{}]: [FAILED: {}]", response.model, error);
    }

    match limit {
        Some(limit) if char_len(&response.content) > limit => format!(
            "[{}]:\n{}{}",
            response.model,
            truncate_chars(&response.content, limit),
            TRUNCATION_MARKER
        ),
        _ => format!("[{}]:\n{}", response.model, response.content),
    }
}
