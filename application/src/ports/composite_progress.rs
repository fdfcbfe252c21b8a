//! Composite progress notifier that delegates to multiple notifiers.
//!
//! Used to fan debate events out to the terminal reporter and the JSONL
//! transcript logger at the same time.

use super::progress::DebateProgressNotifier;
use debate_domain::RoundResponse;

/// A progress notifier that delegates to multiple inner notifiers.
///
/// Uses borrowed references so both owned and borrowed notifiers can be
/// composed without wrapper types.
pub struct CompositeProgress<'a> {
    delegates: Vec<&'a dyn DebateProgressNotifier>,
}

impl<'a> CompositeProgress<'a> {
    pub fn new(delegates: Vec<&'a dyn DebateProgressNotifier>) -> Self {
        Self { delegates }
    }
}

/// Macro to delegate a method call to all inner notifiers.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        for d in &$self.delegates {
            d.$method($($arg),*);
        }
    };
}

impl DebateProgressNotifier for CompositeProgress<'_> {
    fn on_round_start(&self, round: u32, total_rounds: u32, participants: usize) {
        delegate!(self, on_round_start, round, total_rounds, participants);
    }

    fn on_model_complete(&self, response: &RoundResponse) {
        delegate!(self, on_model_complete, response);
    }

    fn on_round_complete(&self, round: u32, failed: &[String]) {
        delegate!(self, on_round_complete, round, failed);
    }

    fn on_host_response(&self, response: &RoundResponse) {
        delegate!(self, on_host_response, response);
    }

    fn on_synthesis_start(&self, synthesizer: &str) {
        delegate!(self, on_synthesis_start, synthesizer);
    }

    fn on_synthesis_attempt_failed(&self, model: &str, error: &str) {
        delegate!(self, on_synthesis_attempt_failed, model, error);
    }

    fn on_synthesis_complete(&self, model: Option<&str>, synthesis: &str) {
        delegate!(self, on_synthesis_complete, model, synthesis);
    }
}
