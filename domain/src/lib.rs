//! Domain layer for model-debate
//!
//! This crate contains the core debate entities, value objects and the
//! pure algorithms that operate on them. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Several models answer the same topic over multiple **rounds**. From
//! round 2 on, every model sees what was said before (compacted by the
//! [`HistoryCompactor`]) and is asked to critique or build on it. A
//! designated **synthesizer** then consolidates the whole transcript.
//!
//! ## Session
//!
//! In interactive mode a [`Session`] holds the debate between rounds so a
//! human host can add a turn of their own before the next round runs.

pub mod config;
pub mod core;
pub mod debate;
pub mod prompt;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigIssue, OutputFormat, Severity};
pub use crate::core::{
    error::ResolveError,
    model::{ModelId, ModelIdParseError},
    topic::Topic,
};
pub use debate::{
    history::{DEFAULT_HISTORY_BUDGET, HistoryCompactor, TRUNCATION_MARKER},
    stats::DebateStats,
    transcript::Transcript,
    value_objects::{DebateResult, FailedModels, HOST_PARTICIPANT, RoundResponse},
};
pub use prompt::{DEFAULT_INITIAL_INSTRUCTION, DebatePromptTemplate, SYNTHESIS_FALLBACK};
pub use providers::{ProviderConfig, ProviderRegistry, ResolvedModel};
pub use session::entities::{Session, SessionParams, SessionStatus};
