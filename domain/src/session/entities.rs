//! Session entity

use crate::core::topic::Topic;
use crate::debate::transcript::Transcript;
use crate::debate::value_objects::{FailedModels, RoundResponse};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Waiting for the host's contribution to the current round
    AwaitingHost,
    /// Synthesis has run; the session is about to be removed
    Complete,
}

/// Inputs for starting an interactive debate.
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub topic: Topic,
    pub models: Vec<String>,
    pub total_rounds: u32,
    pub synthesizer: String,
    pub instruction: Option<String>,
}

/// One interactive debate between external rounds (Entity).
///
/// Owned by the session store. `current_round` starts at 0, becomes 1 once
/// round 1 is recorded and never exceeds `total_rounds`.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub topic: Topic,
    pub models: Vec<String>,
    pub total_rounds: u32,
    pub current_round: u32,
    pub transcript: Transcript,
    pub synthesizer: String,
    pub instruction: Option<String>,
    pub failed_models: FailedModels,
    pub created_at: DateTime<Utc>,
    pub processed_chars: usize,
    pub status: SessionStatus,
}

impl Session {
    pub fn new(id: impl Into<String>, params: SessionParams, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            topic: params.topic,
            models: params.models,
            total_rounds: params.total_rounds,
            current_round: 0,
            transcript: Transcript::new(),
            synthesizer: params.synthesizer,
            instruction: params.instruction,
            failed_models: FailedModels::new(),
            created_at,
            processed_chars: 0,
            status: SessionStatus::AwaitingHost,
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    /// Expired once its age reaches `ttl`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }

    pub fn is_final_round(&self) -> bool {
        self.current_round >= self.total_rounds
    }

    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Complete
    }

    /// Append an external round and advance the round counter.
    pub fn record_round<I, S>(&mut self, responses: Vec<RoundResponse>, failed: I, chars: usize)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transcript.push_round(responses);
        self.failed_models.extend(failed);
        self.processed_chars += chars;
        self.current_round = self.transcript.len() as u32;
    }

    /// Add the host's contribution to the current round.
    ///
    /// Returns `false` if no round has been recorded yet.
    pub fn add_host_response(&mut self, content: impl Into<String>) -> bool {
        let response = RoundResponse::host(self.current_round, content);
        let chars = response.content.chars().count();
        let added = self.transcript.append_to_last(response);
        if added {
            self.processed_chars += chars;
        }
        added
    }

    pub fn complete(&mut self) {
        self.status = SessionStatus::Complete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(total_rounds: u32) -> SessionParams {
        SessionParams {
            topic: Topic::try_new("Monorepo or polyrepo?").unwrap(),
            models: vec!["a:1".to_string(), "b:1".to_string()],
            total_rounds,
            synthesizer: "a:1".to_string(),
            instruction: None,
        }
    }

    #[test]
    fn test_new_session_starts_at_round_zero() {
        let session = Session::new("s1", params(2), Utc::now());
        assert_eq!(session.current_round, 0);
        assert!(session.transcript.is_empty());
        assert_eq!(session.status, SessionStatus::AwaitingHost);
        assert!(!session.is_final_round());
    }

    #[test]
    fn test_record_round_and_host_turn() {
        let mut session = Session::new("s1", params(2), Utc::now());
        assert!(!session.add_host_response("too early"));

        session.record_round(
            vec![
                RoundResponse::success("a:1", 1, "yes"),
                RoundResponse::failure("b:1", 1, "Timeout"),
            ],
            ["b:1"],
            100,
        );
        assert_eq!(session.current_round, 1);
        assert!(session.failed_models.contains("b:1"));

        assert!(session.add_host_response("host view"));
        assert_eq!(session.transcript.rounds()[0].len(), 3);
        assert_eq!(session.transcript.rounds()[0][2].round, 1);
        assert_eq!(session.processed_chars, 109);
    }

    #[test]
    fn test_final_round_detection() {
        let mut session = Session::new("s1", params(1), Utc::now());
        session.record_round(vec![RoundResponse::success("a:1", 1, "x")], Vec::<String>::new(), 0);
        assert!(session.is_final_round());
    }

    #[test]
    fn test_expiry() {
        let created = Utc::now();
        let session = Session::new("s1", params(2), created);
        let ttl = Duration::minutes(10);
        assert!(!session.is_expired(created + Duration::minutes(9), ttl));
        assert!(session.is_expired(created + Duration::minutes(10), ttl));
    }
}
