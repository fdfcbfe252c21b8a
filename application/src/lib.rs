//! Application layer for model-debate
//!
//! This crate contains use cases, port definitions, the session store and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session_store;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    composite_progress::CompositeProgress,
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    progress::{DebateProgressNotifier, NoProgress},
};
pub use session_store::{MAX_SESSIONS, SESSION_TTL, SessionStore};
pub use use_cases::error::{DebateError, MAX_ROUNDS};
pub use use_cases::interactive::{HostTurnOutcome, InteractiveDebateUseCase, RoundUpdate};
pub use use_cases::invoke::InvocationClient;
pub use use_cases::run_debate::{RunDebateInput, RunDebateUseCase};
pub use use_cases::run_round::{RoundOutcome, RunRoundInput, RunRoundUseCase};
pub use use_cases::run_synthesis::{RunSynthesisUseCase, SynthesisInput, SynthesisOutcome};
