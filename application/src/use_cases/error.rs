//! Errors that escape a debate workflow

use debate_domain::ResolveError;
use thiserror::Error;

/// Errors returned by the debate use cases.
///
/// Per-model call failures never appear here: they are recorded on the
/// model's round response and in the failed-model list instead.
#[derive(Error, Debug)]
pub enum DebateError {
    #[error("No models configured")]
    NoModels,

    #[error("Invalid round count {0}: must be between 1 and {max}", max = MAX_ROUNDS)]
    InvalidRounds(u32),

    #[error("None of the requested models could be resolved: {}", format_errors(.0))]
    Unresolvable(Vec<ResolveError>),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session already complete: {0}")]
    SessionComplete(String),

    #[error("Host response must not be empty")]
    HostResponseEmpty,
}

/// Upper bound on the number of rounds a debate may request.
pub const MAX_ROUNDS: u32 = 10;

fn format_errors(errors: &[ResolveError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
