//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod error;
pub mod interactive;
pub mod invoke;
pub mod run_debate;
pub mod run_round;
pub mod run_synthesis;

#[cfg(test)]
pub(crate) mod testing;
