//! Run Debate use case
//!
//! Orchestrates the full non-interactive flow: every round in sequence,
//! then synthesis.

use super::error::{DebateError, MAX_ROUNDS};
use super::run_round::{RunRoundInput, RunRoundUseCase};
use super::run_synthesis::{RunSynthesisUseCase, SynthesisInput};
use crate::config::BehaviorConfig;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use debate_domain::{DebateResult, DebateStats, FailedModels, ProviderRegistry, Topic, Transcript};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Input for a debate
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub topic: Topic,
    pub models: Vec<String>,
    pub rounds: u32,
    /// Defaults to the first model
    pub synthesizer: Option<String>,
    /// Replaces the default round 1 framing
    pub instruction: Option<String>,
}

impl RunDebateInput {
    pub fn new(topic: Topic, models: Vec<String>, rounds: u32) -> Self {
        Self {
            topic,
            models,
            rounds,
            synthesizer: None,
            instruction: None,
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: impl Into<String>) -> Self {
        self.synthesizer = Some(synthesizer.into());
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Check the shape of the request before any call is made.
    pub fn validate(&self) -> Result<(), DebateError> {
        if self.models.is_empty() {
            return Err(DebateError::NoModels);
        }
        if !(1..=MAX_ROUNDS).contains(&self.rounds) {
            return Err(DebateError::InvalidRounds(self.rounds));
        }
        Ok(())
    }

    /// The configured synthesizer, or the first participant.
    pub fn synthesizer(&self) -> &str {
        self.synthesizer
            .as_deref()
            .or_else(|| self.models.first().map(String::as_str))
            .unwrap_or_default()
    }
}

/// Use case for running a whole debate end to end
pub struct RunDebateUseCase<G: LlmGateway + 'static> {
    rounds: RunRoundUseCase<G>,
    synthesis: RunSynthesisUseCase<G>,
}

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    pub fn new(gateway: Arc<G>, registry: Arc<ProviderRegistry>, config: BehaviorConfig) -> Self {
        Self {
            rounds: RunRoundUseCase::new(Arc::clone(&gateway), Arc::clone(&registry), config.clone()),
            synthesis: RunSynthesisUseCase::new(gateway, registry, config),
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateResult, DebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Only request validation and total resolution failure are errors. A
    /// debate in which every call failed still returns a result; callers
    /// can check [`DebateResult::all_models_failed`].
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateResult, DebateError> {
        input.validate()?;
        let start = Instant::now();

        info!(
            models = input.models.len(),
            rounds = input.rounds,
            "Starting debate"
        );

        let mut transcript = Transcript::new();
        let mut failed = FailedModels::new();
        let mut processed_chars = 0;

        for round in 1..=input.rounds {
            let outcome = self
                .rounds
                .execute_with_progress(
                    RunRoundInput {
                        topic: input.topic.content(),
                        models: &input.models,
                        round,
                        total_rounds: input.rounds,
                        prior: &transcript,
                        instruction: input.instruction.as_deref(),
                    },
                    progress,
                )
                .await?;

            failed.extend(outcome.failed_models);
            processed_chars += outcome.processed_chars;
            transcript.push_round(outcome.responses);
        }

        let synthesis = self
            .synthesis
            .execute_with_progress(
                SynthesisInput {
                    topic: input.topic.content(),
                    transcript: &transcript,
                    synthesizer: input.synthesizer(),
                    participants: &input.models,
                },
                progress,
            )
            .await;
        processed_chars += synthesis.processed_chars;

        let stats = DebateStats::estimate(start.elapsed(), processed_chars);
        info!(
            duration_ms = stats.duration_ms,
            failed = failed.len(),
            "Debate complete"
        );

        Ok(DebateResult::new(
            input.topic.into_content(),
            transcript,
            synthesis.text,
            failed,
            stats,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::testing::{Behavior, MockGateway, models, registry};
    use debate_domain::SYNTHESIS_FALLBACK;
    use std::time::Duration;

    fn use_case(gateway: MockGateway) -> (Arc<MockGateway>, RunDebateUseCase<MockGateway>) {
        let gateway = Arc::new(gateway);
        let config = BehaviorConfig::default().with_timeout(Duration::from_millis(50));
        let use_case = RunDebateUseCase::new(Arc::clone(&gateway), Arc::new(registry()), config);
        (gateway, use_case)
    }

    fn topic() -> Topic {
        Topic::try_new("Should we rewrite it in Rust?").unwrap()
    }

    #[tokio::test]
    async fn test_three_models_two_rounds_all_succeed() {
        let (gateway, use_case) = use_case(MockGateway::new());
        let input = RunDebateInput::new(topic(), models(&["a:1", "b:1", "c:1"]), 2);

        let result = use_case.execute(input).await.unwrap();

        assert_eq!(result.rounds.len(), 2);
        assert!(result.rounds.rounds().iter().all(|round| round.len() == 3));
        assert!(result.models_failed.is_empty());
        assert!(!result.synthesis.is_empty());
        assert_eq!(result.topic, "Should we rewrite it in Rust?");

        // Two rounds of three, then one synthesis call by the first model.
        let calls = gateway.recorded();
        assert_eq!(calls.len(), 7);
        assert!(calls[6].is_synthesis());
        assert_eq!(calls[6].model, "a:1");
        assert!(result.stats.processed_chars > 0);
        assert!(result.stats.estimated_cost.starts_with('$'));
    }

    #[tokio::test]
    async fn test_timeout_in_round_one_is_recorded() {
        let (_, use_case) = use_case(MockGateway::new().with("a:1", Behavior::Hang));
        let input = RunDebateInput::new(topic(), models(&["a:1", "b:1"]), 1)
            .with_synthesizer("b:1");

        let result = use_case.execute(input).await.unwrap();

        let round = &result.rounds.rounds()[0];
        assert_eq!(round.len(), 2);
        assert!(round[0].content.is_empty());
        assert!(round[0].error.as_deref().unwrap().starts_with("Timeout"));
        assert_eq!(round[1].content, "b:1 says hello");
        assert_eq!(result.models_failed, vec!["a:1".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_models_accumulate_across_rounds() {
        let (_, use_case) = use_case(
            MockGateway::new()
                .with("b:1", Behavior::Fail(GatewayError::Other("down".into())))
                .with("c:1", Behavior::Empty),
        );
        let input = RunDebateInput::new(topic(), models(&["a:1", "b:1", "c:1"]), 3);

        let result = use_case.execute(input).await.unwrap();

        assert_eq!(result.rounds.len(), 3);
        assert_eq!(result.models_failed, vec!["b:1".to_string(), "c:1".to_string()]);
    }

    #[tokio::test]
    async fn test_every_model_failing_still_completes() {
        let down = Behavior::Fail(GatewayError::RequestFailed("offline".into()));
        let (_, use_case) = use_case(
            MockGateway::new()
                .with("a:1", down.clone())
                .with("b:1", down),
        );
        let input = RunDebateInput::new(topic(), models(&["a:1", "b:1"]), 2);

        let result = use_case.execute(input).await.unwrap();

        assert!(result.all_models_failed());
        assert_eq!(result.synthesis, SYNTHESIS_FALLBACK);
        assert_eq!(result.models_failed.len(), 2);
    }

    #[tokio::test]
    async fn test_custom_instruction_only_frames_round_one() {
        let (gateway, use_case) = use_case(MockGateway::new());
        let input = RunDebateInput::new(topic(), models(&["a:1"]), 2)
            .with_instruction("Answer in one sentence.");

        use_case.execute(input).await.unwrap();

        let prompts = gateway.prompts_for("a:1");
        assert!(prompts[0].user.starts_with("Answer in one sentence."));
        assert!(!prompts[1].user.contains("Answer in one sentence."));
        assert!(prompts[1].user.contains("a:1 says hello"));
    }

    #[tokio::test]
    async fn test_invalid_requests_are_rejected() {
        let (gateway, use_case) = use_case(MockGateway::new());

        let err = use_case
            .execute(RunDebateInput::new(topic(), vec![], 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DebateError::NoModels));

        let err = use_case
            .execute(RunDebateInput::new(topic(), models(&["a:1"]), 11))
            .await
            .unwrap_err();
        assert!(matches!(err, DebateError::InvalidRounds(11)));

        let err = use_case
            .execute(RunDebateInput::new(topic(), models(&["zzz:1"]), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DebateError::Unresolvable(_)));
        assert!(gateway.recorded().is_empty());
    }
}
