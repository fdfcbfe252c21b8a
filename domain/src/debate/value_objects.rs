//! Debate value objects - immutable result types for debate rounds.

use super::stats::DebateStats;
use super::transcript::Transcript;
use serde::{Deserialize, Serialize};

/// Participant label used for contributions typed in by the host.
pub const HOST_PARTICIPANT: &str = "host";

/// One participant's contribution to one round.
///
/// A failed response has empty `content` and a populated `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResponse {
    /// Model identifier (`provider:model`) or [`HOST_PARTICIPANT`]
    pub model: String,
    /// 1-based round number
    pub round: u32,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RoundResponse {
    pub fn success(model: impl Into<String>, round: u32, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            round,
            content: content.into(),
            error: None,
        }
    }

    pub fn failure(model: impl Into<String>, round: u32, error: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            round,
            content: String::new(),
            error: Some(error.into()),
        }
    }

    /// A host turn. Host contributions cannot fail.
    pub fn host(round: u32, content: impl Into<String>) -> Self {
        Self::success(HOST_PARTICIPANT, round, content)
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_host(&self) -> bool {
        self.model == HOST_PARTICIPANT
    }
}

/// Model identifiers that failed at least once, in first-failure order.
///
/// Only ever grows; a model that fails in round 1 and recovers in round 2
/// stays listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailedModels(Vec<String>);

impl FailedModels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. Returns `true` if the model was not already listed.
    pub fn insert(&mut self, model: impl Into<String>) -> bool {
        let model = model.into();
        if self.contains(&model) {
            return false;
        }
        self.0.push(model);
        true
    }

    pub fn extend<I, S>(&mut self, models: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for model in models {
            self.insert(model);
        }
    }

    pub fn contains(&self, model: &str) -> bool {
        self.0.iter().any(|m| m == model)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Complete result of a debate. Built once, when the workflow finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateResult {
    pub topic: String,
    pub rounds: Transcript,
    pub synthesis: String,
    /// Models that failed in any round
    pub models_failed: Vec<String>,
    pub stats: DebateStats,
}

impl DebateResult {
    pub fn new(
        topic: impl Into<String>,
        rounds: Transcript,
        synthesis: impl Into<String>,
        models_failed: FailedModels,
        stats: DebateStats,
    ) -> Self {
        Self {
            topic: topic.into(),
            rounds,
            synthesis: synthesis.into(),
            models_failed: models_failed.into_vec(),
            stats,
        }
    }

    /// Returns `true` if no model produced content in any round.
    pub fn all_models_failed(&self) -> bool {
        !self
            .rounds
            .responses()
            .any(|r| r.is_success() && !r.is_host())
    }
}
