//! Run Synthesis use case
//!
//! Asks the designated synthesizer to consolidate the transcript. If it
//! fails, every other participant is tried in order; if all of them fail
//! the fixed fallback text is returned. Synthesis never errors.

use super::invoke::InvocationClient;
use crate::config::BehaviorConfig;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use debate_domain::{
    DebatePromptTemplate, HistoryCompactor, ProviderRegistry, SYNTHESIS_FALLBACK, Transcript,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the synthesis step.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    pub topic: &'a str,
    pub transcript: &'a Transcript,
    pub synthesizer: &'a str,
    /// Fallback candidates, tried in this order after the synthesizer
    pub participants: &'a [String],
}

/// What synthesis produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutcome {
    pub text: String,
    /// Model that produced `text`, `None` for the fallback
    pub model: Option<String>,
    pub processed_chars: usize,
}

/// Use case for the final synthesis step
pub struct RunSynthesisUseCase<G: LlmGateway + 'static> {
    client: InvocationClient<G>,
    registry: Arc<ProviderRegistry>,
    config: BehaviorConfig,
}

impl<G: LlmGateway + 'static> Clone for RunSynthesisUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            registry: Arc::clone(&self.registry),
            config: self.config.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> RunSynthesisUseCase<G> {
    pub fn new(gateway: Arc<G>, registry: Arc<ProviderRegistry>, config: BehaviorConfig) -> Self {
        Self {
            client: InvocationClient::new(gateway, config.max_output_tokens),
            registry,
            config,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: SynthesisInput<'_>) -> SynthesisOutcome {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: SynthesisInput<'_>,
        progress: &dyn DebateProgressNotifier,
    ) -> SynthesisOutcome {
        let history =
            HistoryCompactor::new(self.config.history_budget).render(input.transcript.rounds());
        let user = DebatePromptTemplate::synthesis_prompt(input.topic, &history);
        let system = DebatePromptTemplate::synthesis_system();
        let prompt_chars = system.chars().count() + user.chars().count();

        info!(synthesizer = %input.synthesizer, "Starting synthesis");
        progress.on_synthesis_start(input.synthesizer);

        let mut processed_chars = 0;
        for candidate in candidates(input.synthesizer, input.participants) {
            let model = match self.registry.resolve(candidate) {
                Ok(model) => model,
                Err(e) => {
                    warn!(model = %candidate, "Synthesis candidate unresolvable: {}", e);
                    progress.on_synthesis_attempt_failed(candidate, &e.to_string());
                    continue;
                }
            };

            processed_chars += prompt_chars;
            match self
                .client
                .invoke(&model, candidate, system, &user, self.config.timeout)
                .await
            {
                Ok(text) => {
                    info!(model = %candidate, "Synthesis complete");
                    processed_chars += text.chars().count();
                    progress.on_synthesis_complete(Some(candidate), &text);
                    return SynthesisOutcome {
                        text,
                        model: Some(candidate.to_string()),
                        processed_chars,
                    };
                }
                Err(e) => {
                    warn!(model = %candidate, "Synthesis attempt failed: {}", e);
                    progress.on_synthesis_attempt_failed(candidate, &e.to_string());
                }
            }
        }

        warn!("Every synthesis candidate failed, using fallback text");
        progress.on_synthesis_complete(None, SYNTHESIS_FALLBACK);
        SynthesisOutcome {
            text: SYNTHESIS_FALLBACK.to_string(),
            model: None,
            processed_chars,
        }
    }
}

/// The synthesizer first, then every other participant in list order.
fn candidates<'a>(synthesizer: &'a str, participants: &'a [String]) -> Vec<&'a str> {
    let mut ordered = vec![synthesizer];
    for participant in participants {
        if !ordered.contains(&participant.as_str()) {
            ordered.push(participant);
        }
    }
    ordered
}
