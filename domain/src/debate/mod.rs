//! Debate domain.
//!
//! - [`value_objects::RoundResponse`]: one participant's contribution to one round
//! - [`transcript::Transcript`]: the append-only sequence of rounds
//! - [`history::HistoryCompactor`]: renders prior rounds within a character budget
//! - [`stats::DebateStats`]: duration and token/cost estimates
//! - [`value_objects::DebateResult`]: the finished debate

pub mod history;
pub mod stats;
pub mod transcript;
pub mod value_objects;
