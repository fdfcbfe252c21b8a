//! LLM provider adapters
//!
//! [`OpenAiCompatibleGateway`] implements the
//! [`LlmGateway`](debate_application::LlmGateway) port over HTTP.
//! [`RequestShapeTable`] decides which token-cap field a backend accepts.

mod openai_compat;
mod request_shape;

pub use openai_compat::OpenAiCompatibleGateway;
pub use request_shape::{RequestShape, RequestShapeTable};
