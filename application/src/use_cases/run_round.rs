//! Run Round use case
//!
//! Fans one prompt out to every participant concurrently and waits for all
//! calls to settle. Per-model failures become data on the round, never
//! errors out of it.

use super::error::DebateError;
use super::invoke::InvocationClient;
use crate::config::BehaviorConfig;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use debate_domain::{
    DebatePromptTemplate, HistoryCompactor, ProviderRegistry, ResolveError, ResolvedModel,
    RoundResponse, Transcript,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Input for one external round.
#[derive(Debug, Clone, Copy)]
pub struct RunRoundInput<'a> {
    pub topic: &'a str,
    /// Participant identifiers in submission order
    pub models: &'a [String],
    /// 1-based
    pub round: u32,
    pub total_rounds: u32,
    /// Every round before this one
    pub prior: &'a Transcript,
    /// Replaces the default framing of round 1; ignored afterwards
    pub instruction: Option<&'a str>,
}

/// Settled result of one round.
#[derive(Debug, Clone, Default)]
pub struct RoundOutcome {
    /// One entry per requested model, in submission order
    pub responses: Vec<RoundResponse>,
    /// Models that failed this round, in submission order
    pub failed_models: Vec<String>,
    /// Prompt characters sent plus response characters received
    pub processed_chars: usize,
}

/// Use case for running a single debate round
pub struct RunRoundUseCase<G: LlmGateway + 'static> {
    client: InvocationClient<G>,
    registry: Arc<ProviderRegistry>,
    config: BehaviorConfig,
}

impl<G: LlmGateway + 'static> Clone for RunRoundUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            registry: Arc::clone(&self.registry),
            config: self.config.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> RunRoundUseCase<G> {
    pub fn new(gateway: Arc<G>, registry: Arc<ProviderRegistry>, config: BehaviorConfig) -> Self {
        Self {
            client: InvocationClient::new(gateway, config.max_output_tokens),
            registry,
            config,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunRoundInput<'_>) -> Result<RoundOutcome, DebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Fails only when `models` is empty or when not a single model could be
    /// resolved.
    pub async fn execute_with_progress(
        &self,
        input: RunRoundInput<'_>,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<RoundOutcome, DebateError> {
        if input.models.is_empty() {
            return Err(DebateError::NoModels);
        }

        let resolved: Vec<(&String, Result<ResolvedModel, ResolveError>)> = input
            .models
            .iter()
            .map(|id| (id, self.registry.resolve(id)))
            .collect();

        if resolved.iter().all(|(_, r)| r.is_err()) {
            let errors = resolved.into_iter().filter_map(|(_, r)| r.err()).collect();
            return Err(DebateError::Unresolvable(errors));
        }

        let user = self.build_prompt(&input);
        let system = DebatePromptTemplate::participant_system();
        let prompt_chars = system.chars().count() + user.chars().count();

        info!(
            round = input.round,
            total_rounds = input.total_rounds,
            "Starting round with {} models",
            input.models.len()
        );
        progress.on_round_start(input.round, input.total_rounds, input.models.len());

        let mut slots: Vec<Option<RoundResponse>> = vec![None; input.models.len()];
        let mut processed_chars = 0;
        let mut join_set = JoinSet::new();

        for (index, (label, resolution)) in resolved.into_iter().enumerate() {
            let model = match resolution {
                Ok(model) => model,
                Err(e) => {
                    warn!(model = %label, "Resolution failed: {}", e);
                    let response = RoundResponse::failure(label.as_str(), input.round, e.to_string());
                    progress.on_model_complete(&response);
                    slots[index] = Some(response);
                    continue;
                }
            };

            processed_chars += prompt_chars;
            let client = self.client.clone();
            let label = label.clone();
            let user = user.clone();
            let timeout = self.config.timeout;

            join_set.spawn(async move {
                let result = client.invoke(&model, &label, system, &user, timeout).await;
                (index, label, result)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, label, Ok(content))) => {
                    debug!(model = %label, round = input.round, "Model responded");
                    processed_chars += content.chars().count();
                    let response = RoundResponse::success(label, input.round, content);
                    progress.on_model_complete(&response);
                    slots[index] = Some(response);
                }
                Ok((index, label, Err(e))) => {
                    warn!(model = %label, round = input.round, "Model failed: {}", e);
                    let response = RoundResponse::failure(label, input.round, e.to_string());
                    progress.on_model_complete(&response);
                    slots[index] = Some(response);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        let responses: Vec<RoundResponse> = slots
            .into_iter()
            .zip(input.models)
            .map(|(slot, label)| {
                slot.unwrap_or_else(|| {
                    RoundResponse::failure(label.as_str(), input.round, "Call aborted before settling")
                })
            })
            .collect();

        let failed_models: Vec<String> = responses
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| r.model.clone())
            .collect();

        info!(
            round = input.round,
            failed = failed_models.len(),
            "Round complete"
        );
        progress.on_round_complete(input.round, &failed_models);

        Ok(RoundOutcome {
            responses,
            failed_models,
            processed_chars,
        })
    }

    fn build_prompt(&self, input: &RunRoundInput<'_>) -> String {
        if input.round <= 1 {
            DebatePromptTemplate::initial_prompt(input.topic, input.instruction)
        } else {
            let history =
                HistoryCompactor::new(self.config.history_budget).render(input.prior.rounds());
            DebatePromptTemplate::round_prompt(input.topic, &history, input.round, input.total_rounds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::testing::{Behavior, MockGateway, models, registry};
    use debate_domain::DEFAULT_INITIAL_INSTRUCTION;
    use std::time::Duration;

    fn use_case(gateway: MockGateway) -> (Arc<MockGateway>, RunRoundUseCase<MockGateway>) {
        let gateway = Arc::new(gateway);
        let config = BehaviorConfig::default().with_timeout(Duration::from_millis(50));
        let use_case = RunRoundUseCase::new(Arc::clone(&gateway), Arc::new(registry()), config);
        (gateway, use_case)
    }

    fn first_round<'a>(models: &'a [String], prior: &'a Transcript) -> RunRoundInput<'a> {
        RunRoundInput {
            topic: "Tabs or spaces?",
            models,
            round: 1,
            total_rounds: 2,
            prior,
            instruction: None,
        }
    }

    #[tokio::test]
    async fn test_one_failing_model_still_yields_every_response() {
        let (_, use_case) = use_case(MockGateway::new().with(
            "b:1",
            Behavior::Fail(GatewayError::RequestFailed("connection refused".into())),
        ));
        let ids = models(&["a:1", "b:1", "c:1"]);
        let prior = Transcript::new();

        let outcome = use_case.execute(first_round(&ids, &prior)).await.unwrap();

        assert_eq!(outcome.responses.len(), 3);
        assert_eq!(outcome.failed_models, vec!["b:1".to_string()]);
        let failed = &outcome.responses[1];
        assert_eq!(failed.model, "b:1");
        assert!(failed.content.is_empty());
        assert!(failed.error.as_deref().unwrap().contains("connection refused"));
        assert_eq!(outcome.responses.iter().filter(|r| r.is_success()).count(), 2);
    }

    #[tokio::test]
    async fn test_responses_keep_submission_order_and_round_number() {
        let (_, use_case) = use_case(MockGateway::new());
        let ids = models(&["c:1", "a:1", "b:1"]);
        let prior = Transcript::new();

        let outcome = use_case.execute(first_round(&ids, &prior)).await.unwrap();

        let order: Vec<_> = outcome.responses.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(order, vec!["c:1", "a:1", "b:1"]);
        assert!(outcome.responses.iter().all(|r| r.round == 1));
    }

    #[tokio::test]
    async fn test_round_waits_for_slow_models() {
        let (_, use_case) = use_case(MockGateway::new().with("a:1", Behavior::Hang));
        let ids = models(&["a:1", "b:1"]);
        let prior = Transcript::new();

        let outcome = use_case.execute(first_round(&ids, &prior)).await.unwrap();

        assert_eq!(outcome.responses.len(), 2);
        assert!(outcome.responses[0].error.as_deref().unwrap().starts_with("Timeout"));
        assert_eq!(outcome.responses[1].content, "b:1 says hello");
    }

    #[tokio::test]
    async fn test_unresolvable_model_does_not_block_others() {
        let (gateway, use_case) = use_case(MockGateway::new());
        let ids = models(&["nope:1", "a:1", "missing-colon"]);
        let prior = Transcript::new();

        let outcome = use_case.execute(first_round(&ids, &prior)).await.unwrap();

        assert_eq!(outcome.responses.len(), 3);
        assert_eq!(
            outcome.failed_models,
            vec!["nope:1".to_string(), "missing-colon".to_string()]
        );
        assert!(outcome.responses[0].error.as_deref().unwrap().contains("registered providers: a, b, c"));
        assert_eq!(gateway.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_all_unresolvable_is_an_error() {
        let (gateway, use_case) = use_case(MockGateway::new());
        let ids = models(&["x:1", "y:2"]);
        let prior = Transcript::new();

        let err = use_case.execute(first_round(&ids, &prior)).await.unwrap_err();

        match err {
            DebateError::Unresolvable(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(gateway.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_no_models_is_an_error() {
        let (_, use_case) = use_case(MockGateway::new());
        let prior = Transcript::new();

        let err = use_case.execute(first_round(&[], &prior)).await.unwrap_err();
        assert!(matches!(err, DebateError::NoModels));
    }

    #[tokio::test]
    async fn test_round_one_uses_instruction() {
        let (gateway, use_case) = use_case(MockGateway::new());
        let ids = models(&["a:1"]);
        let prior = Transcript::new();

        use_case.execute(first_round(&ids, &prior)).await.unwrap();
        let input = RunRoundInput {
            instruction: Some("Argue like a pirate."),
            ..first_round(&ids, &prior)
        };
        use_case.execute(input).await.unwrap();

        let prompts = gateway.prompts_for("a:1");
        assert!(prompts[0].user.starts_with(DEFAULT_INITIAL_INSTRUCTION));
        assert!(prompts[0].user.contains("Tabs or spaces?"));
        assert!(prompts[1].user.starts_with("Argue like a pirate."));
        assert_eq!(prompts[0].system, DebatePromptTemplate::participant_system());
    }

    #[tokio::test]
    async fn test_later_round_includes_compacted_history() {
        let (gateway, use_case) = use_case(MockGateway::new());
        let ids = models(&["a:1", "b:1"]);
        let mut prior = Transcript::new();
        prior.push_round(vec![
            RoundResponse::success("a:1", 1, "Spaces render the same everywhere."),
            RoundResponse::failure("b:1", 1, "Timeout after 120s"),
        ]);

        let input = RunRoundInput {
            round: 2,
            prior: &prior,
            instruction: Some("ignored after round one"),
            ..first_round(&ids, &prior)
        };
        let outcome = use_case.execute(input).await.unwrap();

        assert!(outcome.failed_models.is_empty());
        let user = &gateway.prompts_for("b:1")[0].user;
        assert!(user.contains("=== Round 1 ==="));
        assert!(user.contains("Spaces render the same everywhere."));
        assert!(user.contains("[b:1]: [FAILED: Timeout after 120s]"));
        assert!(user.contains("round 2 of 2"));
        assert!(!user.contains("ignored after round one"));
    }

    #[tokio::test]
    async fn test_processed_chars_counts_prompts_and_replies() {
        let (gateway, use_case) = use_case(
            MockGateway::new()
                .with("a:1", Behavior::Reply("12345".into()))
                .with("b:1", Behavior::Fail(GatewayError::Other("boom".into()))),
        );
        let ids = models(&["a:1", "b:1"]);
        let prior = Transcript::new();

        let outcome = use_case.execute(first_round(&ids, &prior)).await.unwrap();

        let sent: usize = gateway
            .recorded()
            .iter()
            .map(|r| r.system.chars().count() + r.user.chars().count())
            .sum();
        assert_eq!(outcome.processed_chars, sent + 5);
    }
}
