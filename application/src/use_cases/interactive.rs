//! Interactive debate use case
//!
//! Runs a debate one external round at a time, pausing in the session store
//! after each round so a human host can add a turn.
//!
//! ```text
//! start ──► round 1 ──► AwaitingHost ──host──► round n+1 ──► AwaitingHost ...
//!                                      └─(final round)──► synthesis ──► Complete (deleted)
//! ```

use super::error::DebateError;
use super::run_debate::RunDebateInput;
use super::run_round::{RunRoundInput, RunRoundUseCase};
use super::run_synthesis::{RunSynthesisUseCase, SynthesisInput};
use crate::config::BehaviorConfig;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::DebateProgressNotifier;
use crate::session_store::SessionStore;
use chrono::Utc;
use debate_domain::{
    DebateResult, DebateStats, ProviderRegistry, RoundResponse, Session, SessionParams,
};
use std::sync::Arc;
use tracing::{debug, info};

/// External responses of the round that just ran.
#[derive(Debug, Clone)]
pub struct RoundUpdate {
    pub session_id: String,
    pub round: u32,
    pub total_rounds: u32,
    pub responses: Vec<RoundResponse>,
    /// Models that failed in this round
    pub failed_models: Vec<String>,
}

/// Result of submitting a host turn.
#[derive(Debug, Clone)]
pub enum HostTurnOutcome {
    /// The next round ran; the session awaits another host turn
    NextRound(RoundUpdate),
    /// The final round was closed and synthesized; the session is gone
    Complete(DebateResult),
}

/// Use case driving session-based debates
pub struct InteractiveDebateUseCase<G: LlmGateway + 'static> {
    rounds: RunRoundUseCase<G>,
    synthesis: RunSynthesisUseCase<G>,
    store: Arc<SessionStore>,
}

impl<G: LlmGateway + 'static> InteractiveDebateUseCase<G> {
    pub fn new(
        gateway: Arc<G>,
        registry: Arc<ProviderRegistry>,
        config: BehaviorConfig,
        store: Arc<SessionStore>,
    ) -> Self {
        Self {
            rounds: RunRoundUseCase::new(Arc::clone(&gateway), Arc::clone(&registry), config.clone()),
            synthesis: RunSynthesisUseCase::new(gateway, registry, config),
            store,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Create a session and run round 1.
    ///
    /// On error no session is left behind.
    pub async fn start(
        &self,
        input: RunDebateInput,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<RoundUpdate, DebateError> {
        input.validate()?;

        let synthesizer = input.synthesizer().to_string();
        let mut session = self.store.create(SessionParams {
            topic: input.topic,
            models: input.models,
            total_rounds: input.rounds,
            synthesizer,
            instruction: input.instruction,
        });
        info!(session = %session.id, rounds = session.total_rounds, "Interactive debate started");

        let update = match self.advance(&mut session, progress).await {
            Ok(update) => update,
            Err(e) => {
                self.store.delete(&session.id);
                return Err(e);
            }
        };
        self.save(session)?;
        Ok(update)
    }

    /// Add the host's turn to the current round, then run the next round or,
    /// after the final round, synthesis.
    pub async fn submit_host_response(
        &self,
        session_id: &str,
        content: &str,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<HostTurnOutcome, DebateError> {
        let mut session = self
            .store
            .get(session_id)
            .ok_or_else(|| DebateError::SessionNotFound(session_id.to_string()))?;
        if session.is_complete() {
            return Err(DebateError::SessionComplete(session_id.to_string()));
        }

        let content = content.trim();
        if content.is_empty() {
            return Err(DebateError::HostResponseEmpty);
        }

        session.add_host_response(content);
        if let Some(response) = session.transcript.rounds().last().and_then(|r| r.last()) {
            progress.on_host_response(response);
        }
        debug!(session = %session.id, round = session.current_round, "Host turn recorded");

        if session.is_final_round() {
            return self.finish(session, progress).await.map(HostTurnOutcome::Complete);
        }

        let update = self.advance(&mut session, progress).await?;
        self.save(session)?;
        Ok(HostTurnOutcome::NextRound(update))
    }

    /// Drop a session without synthesizing. Returns `false` if it was not stored.
    pub fn abandon(&self, session_id: &str) -> bool {
        let removed = self.store.delete(session_id).is_some();
        if removed {
            info!(session = %session_id, "Interactive debate abandoned");
        }
        removed
    }

    /// Run the round after `session.current_round` and record it.
    async fn advance(
        &self,
        session: &mut Session,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<RoundUpdate, DebateError> {
        let round = session.current_round + 1;
        let outcome = self
            .rounds
            .execute_with_progress(
                RunRoundInput {
                    topic: session.topic.content(),
                    models: &session.models,
                    round,
                    total_rounds: session.total_rounds,
                    prior: &session.transcript,
                    instruction: session.instruction.as_deref(),
                },
                progress,
            )
            .await?;

        let update = RoundUpdate {
            session_id: session.id.clone(),
            round,
            total_rounds: session.total_rounds,
            responses: outcome.responses.clone(),
            failed_models: outcome.failed_models.clone(),
        };
        session.record_round(
            outcome.responses,
            outcome.failed_models,
            outcome.processed_chars,
        );
        Ok(update)
    }

    async fn finish(
        &self,
        mut session: Session,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateResult, DebateError> {
        session.complete();
        self.save(session.clone())?;

        let synthesis = self
            .synthesis
            .execute_with_progress(
                SynthesisInput {
                    topic: session.topic.content(),
                    transcript: &session.transcript,
                    synthesizer: &session.synthesizer,
                    participants: &session.models,
                },
                progress,
            )
            .await;
        self.store.delete(&session.id);

        let elapsed = session.age(Utc::now()).to_std().unwrap_or_default();
        let stats = DebateStats::estimate(elapsed, session.processed_chars + synthesis.processed_chars);
        info!(session = %session.id, duration_ms = stats.duration_ms, "Interactive debate complete");

        Ok(DebateResult::new(
            session.topic.into_content(),
            session.transcript,
            synthesis.text,
            session.failed_models,
            stats,
        ))
    }

    /// Write `session` back; fails if it was deleted or expired meanwhile.
    fn save(&self, session: Session) -> Result<(), DebateError> {
        let id = session.id.clone();
        if self.store.update(session) {
            Ok(())
        } else {
            Err(DebateError::SessionNotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::testing::{Behavior, MockGateway, models, registry};
    use debate_domain::{HOST_PARTICIPANT, SessionStatus, Topic};
    use std::time::Duration;

    const HOST_TURN: &str =
        "As the host I think both sides ignore the cost of retraining the team on a new toolchain.";

    fn use_case(gateway: MockGateway) -> (Arc<MockGateway>, InteractiveDebateUseCase<MockGateway>) {
        let gateway = Arc::new(gateway);
        let config = BehaviorConfig::default().with_timeout(Duration::from_millis(50));
        let use_case = InteractiveDebateUseCase::new(
            Arc::clone(&gateway),
            Arc::new(registry()),
            config,
            Arc::new(SessionStore::new()),
        );
        (gateway, use_case)
    }

    fn input(rounds: u32) -> RunDebateInput {
        RunDebateInput::new(
            Topic::try_new("Should we adopt a monorepo?").unwrap(),
            models(&["a:1", "b:1"]),
            rounds,
        )
    }

    #[tokio::test]
    async fn test_full_interactive_flow() {
        let (gateway, use_case) = use_case(MockGateway::new());
        assert!(HOST_TURN.chars().count() >= 50);

        let first = use_case.start(input(2), &NoProgress).await.unwrap();
        assert_eq!(first.round, 1);
        assert_eq!(first.total_rounds, 2);
        assert_eq!(first.responses.len(), 2);
        let stored = use_case.store().get(&first.session_id).unwrap();
        assert_eq!(stored.current_round, 1);
        assert_eq!(stored.status, SessionStatus::AwaitingHost);

        let second = match use_case
            .submit_host_response(&first.session_id, HOST_TURN, &NoProgress)
            .await
            .unwrap()
        {
            HostTurnOutcome::NextRound(update) => update,
            HostTurnOutcome::Complete(_) => panic!("expected round 2"),
        };
        assert_eq!(second.round, 2);
        assert_eq!(second.session_id, first.session_id);
        assert_eq!(second.responses.len(), 2);

        let round_two_prompt = &gateway.prompts_for("b:1")[1].user;
        assert!(round_two_prompt.contains(HOST_TURN));
        assert!(round_two_prompt.contains(&format!("[{}]:", HOST_PARTICIPANT)));

        let result = match use_case
            .submit_host_response(&first.session_id, "Final word from the host.", &NoProgress)
            .await
            .unwrap()
        {
            HostTurnOutcome::Complete(result) => result,
            HostTurnOutcome::NextRound(_) => panic!("expected completion"),
        };
        assert_eq!(result.rounds.len(), 2);
        assert_eq!(result.rounds.rounds()[0].len(), 3);
        assert_eq!(result.rounds.rounds()[1].len(), 3);
        assert!(result.models_failed.is_empty());
        assert!(!result.synthesis.is_empty());

        let synthesis_prompt = gateway.recorded().into_iter().find(|r| r.is_synthesis()).unwrap();
        assert!(synthesis_prompt.user.contains("Final word from the host."));

        let err = use_case
            .submit_host_response(&first.session_id, "anyone there?", &NoProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, DebateError::SessionNotFound(_)));
        assert!(use_case.store().is_empty());
    }

    #[tokio::test]
    async fn test_single_round_goes_straight_to_synthesis() {
        let (_, use_case) = use_case(MockGateway::new());
        let first = use_case.start(input(1), &NoProgress).await.unwrap();

        let outcome = use_case
            .submit_host_response(&first.session_id, HOST_TURN, &NoProgress)
            .await
            .unwrap();

        assert!(matches!(outcome, HostTurnOutcome::Complete(_)));
        assert!(use_case.store().get(&first.session_id).is_none());
    }

    #[tokio::test]
    async fn test_failures_accumulate_in_session() {
        let (_, use_case) = use_case(
            MockGateway::new().with("b:1", Behavior::Fail(GatewayError::Other("down".into()))),
        );
        let first = use_case.start(input(2), &NoProgress).await.unwrap();
        assert_eq!(first.failed_models, vec!["b:1".to_string()]);

        use_case
            .submit_host_response(&first.session_id, HOST_TURN, &NoProgress)
            .await
            .unwrap();
        let outcome = use_case
            .submit_host_response(&first.session_id, HOST_TURN, &NoProgress)
            .await
            .unwrap();

        match outcome {
            HostTurnOutcome::Complete(result) => {
                assert_eq!(result.models_failed, vec!["b:1".to_string()]);
            }
            HostTurnOutcome::NextRound(_) => panic!("expected completion"),
        }
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let (_, use_case) = use_case(MockGateway::new());
        let err = use_case
            .submit_host_response("does-not-exist", HOST_TURN, &NoProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, DebateError::SessionNotFound(id) if id == "does-not-exist"));
    }

    #[tokio::test]
    async fn test_completed_session_is_rejected() {
        let (_, use_case) = use_case(MockGateway::new());
        let first = use_case.start(input(2), &NoProgress).await.unwrap();

        let mut session = use_case.store().get(&first.session_id).unwrap();
        session.complete();
        assert!(use_case.store().update(session));

        let err = use_case
            .submit_host_response(&first.session_id, HOST_TURN, &NoProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, DebateError::SessionComplete(_)));
    }

    #[tokio::test]
    async fn test_empty_host_turn_leaves_session_untouched() {
        let (_, use_case) = use_case(MockGateway::new());
        let first = use_case.start(input(2), &NoProgress).await.unwrap();

        let err = use_case
            .submit_host_response(&first.session_id, "   \n", &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, DebateError::HostResponseEmpty));
        let session = use_case.store().get(&first.session_id).unwrap();
        assert_eq!(session.current_round, 1);
        assert_eq!(session.transcript.rounds()[0].len(), 2);
    }

    #[tokio::test]
    async fn test_abandon_deletes_session() {
        let (_, use_case) = use_case(MockGateway::new());
        let first = use_case.start(input(3), &NoProgress).await.unwrap();

        assert!(use_case.abandon(&first.session_id));
        assert!(!use_case.abandon(&first.session_id));
        let err = use_case
            .submit_host_response(&first.session_id, HOST_TURN, &NoProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, DebateError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn test_failed_start_leaves_no_session() {
        let (_, use_case) = use_case(MockGateway::new());
        let input = RunDebateInput::new(
            Topic::try_new("t").unwrap(),
            models(&["nobody:1"]),
            2,
        );

        let err = use_case.start(input, &NoProgress).await.unwrap_err();

        assert!(matches!(err, DebateError::Unresolvable(_)));
        assert!(use_case.store().is_empty());
    }
}
