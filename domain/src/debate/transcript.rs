//! Append-only debate transcript

use super::value_objects::RoundResponse;
use crate::core::string::char_len;
use serde::{Deserialize, Serialize};

/// Ordered rounds of a debate.
///
/// Round `i` (1-based) holds only responses numbered `i`, and rounds are
/// only ever appended, so the sequence has no gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    rounds: Vec<Vec<RoundResponse>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next round.
    ///
    /// Responses must carry round number `self.len() + 1`.
    pub fn push_round(&mut self, responses: Vec<RoundResponse>) {
        let expected = self.next_round();
        debug_assert!(
            responses.iter().all(|r| r.round == expected),
            "responses must belong to round {expected}"
        );
        self.rounds.push(responses);
    }

    /// Add one response to the latest round (host turns).
    ///
    /// Returns `false` when there is no round yet.
    pub fn append_to_last(&mut self, response: RoundResponse) -> bool {
        match self.rounds.last_mut() {
            Some(round) => {
                round.push(response);
                true
            }
            None => false,
        }
    }

    pub fn rounds(&self) -> &[Vec<RoundResponse>] {
        &self.rounds
    }

    /// Number of completed rounds.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Round number the next `push_round` must use.
    pub fn next_round(&self) -> u32 {
        self.rounds.len() as u32 + 1
    }

    /// Every response, round by round.
    pub fn responses(&self) -> impl Iterator<Item = &RoundResponse> {
        self.rounds.iter().flatten()
    }

    pub fn response_count(&self) -> usize {
        self.rounds.iter().map(Vec::len).sum()
    }

    /// Sum of content lengths, in characters.
    pub fn content_chars(&self) -> usize {
        self.responses().map(|r| char_len(&r.content)).sum()
    }
}
