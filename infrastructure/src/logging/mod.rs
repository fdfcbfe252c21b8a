//! Logging infrastructure: structured debate transcripts.
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer that implements
//! the [`DebateProgressNotifier`](debate_application::DebateProgressNotifier) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlTranscriptLogger;
