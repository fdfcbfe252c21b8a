//! JSONL file writer for debate events.
//!
//! Each progress event is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer. The
//! result is a replayable record of how a debate unfolded.

use debate_application::DebateProgressNotifier;
use debate_domain::RoundResponse;
use serde_json::{Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL transcript logger that writes one JSON object per event.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlTranscriptLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn log(&self, event_type: &str, payload: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match payload {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        record.insert("type".to_string(), Value::String(event_type.to_string()));
        record.insert("timestamp".to_string(), Value::String(timestamp));

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

fn response_payload(response: &RoundResponse) -> Value {
    json!({
        "model": response.model,
        "round": response.round,
        "content": response.content,
        "error": response.error,
    })
}

impl DebateProgressNotifier for JsonlTranscriptLogger {
    fn on_round_start(&self, round: u32, total_rounds: u32, participants: usize) {
        self.log(
            "round_start",
            json!({ "round": round, "total_rounds": total_rounds, "participants": participants }),
        );
    }

    fn on_model_complete(&self, response: &RoundResponse) {
        self.log("model_response", response_payload(response));
    }

    fn on_round_complete(&self, round: u32, failed: &[String]) {
        self.log("round_complete", json!({ "round": round, "failed": failed }));
    }

    fn on_host_response(&self, response: &RoundResponse) {
        self.log("host_response", response_payload(response));
    }

    fn on_synthesis_start(&self, synthesizer: &str) {
        self.log("synthesis_start", json!({ "synthesizer": synthesizer }));
    }

    fn on_synthesis_attempt_failed(&self, model: &str, error: &str) {
        self.log(
            "synthesis_attempt_failed",
            json!({ "model": model, "error": error }),
        );
    }

    fn on_synthesis_complete(&self, model: Option<&str>, synthesis: &str) {
        self.log(
            "synthesis_complete",
            json!({ "model": model, "synthesis": synthesis }),
        );
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
