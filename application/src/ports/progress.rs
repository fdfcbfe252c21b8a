//! Progress notification port
//!
//! Defines the interface for reporting progress while a debate runs.

use debate_domain::RoundResponse;

/// Observer for debate progress
///
/// Implementations live in the presentation and infrastructure layers and
/// can display progress in various ways (progress bars, plain lines, JSONL
/// files). Events are advisory: nothing in a debate depends on them.
pub trait DebateProgressNotifier: Send + Sync {
    /// Called before a round's calls are issued
    fn on_round_start(&self, round: u32, total_rounds: u32, participants: usize);

    /// Called as each model's response settles, success or failure
    fn on_model_complete(&self, response: &RoundResponse);

    /// Called once every call in the round has settled
    fn on_round_complete(&self, round: u32, failed: &[String]);

    /// Called when the host's contribution is added to a round
    fn on_host_response(&self, _response: &RoundResponse) {}

    /// Called before the first synthesis attempt
    fn on_synthesis_start(&self, _synthesizer: &str) {}

    /// Called when one synthesis attempt fails and the next model is tried
    fn on_synthesis_attempt_failed(&self, _model: &str, _error: &str) {}

    /// Called when synthesis finishes. `model` is `None` if every attempt failed.
    fn on_synthesis_complete(&self, _model: Option<&str>, _synthesis: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DebateProgressNotifier for NoProgress {
    fn on_round_start(&self, _round: u32, _total_rounds: u32, _participants: usize) {}
    fn on_model_complete(&self, _response: &RoundResponse) {}
    fn on_round_complete(&self, _round: u32, _failed: &[String]) {}
}
