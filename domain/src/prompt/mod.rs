//! Prompt domain
//!
//! Templates for the prompts sent in each debate round and in synthesis.

mod template;

pub use template::{DEFAULT_INITIAL_INSTRUCTION, DebatePromptTemplate, SYNTHESIS_FALLBACK};
