//! In-memory gateway used by the use case tests.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use async_trait::async_trait;
use debate_domain::{DebatePromptTemplate, ProviderConfig, ProviderRegistry};
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted behavior for one model.
#[derive(Debug, Clone)]
pub enum Behavior {
    Reply(String),
    Fail(GatewayError),
    /// Never answers; only a caller-side timeout ends the call
    Hang,
    Empty,
}

/// A request as the gateway saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub model: String,
    pub system: String,
    pub user: String,
}

impl Recorded {
    pub fn is_synthesis(&self) -> bool {
        self.system == DebatePromptTemplate::synthesis_system()
    }
}

/// Mock gateway keyed by `provider:model`.
///
/// Models without a scripted behavior reply with `"<model> says hello"`.
#[derive(Default)]
pub struct MockGateway {
    behaviors: HashMap<String, Behavior>,
    synthesis: HashMap<String, Behavior>,
    recorded: Mutex<Vec<Recorded>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, model: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(model.to_string(), behavior);
        self
    }

    /// Override the behavior of `model` for synthesis calls only.
    pub fn with_synthesis(mut self, model: &str, behavior: Behavior) -> Self {
        self.synthesis.insert(model.to_string(), behavior);
        self
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn prompts_for(&self, model: &str) -> Vec<Recorded> {
        self.recorded()
            .into_iter()
            .filter(|r| r.model == model)
            .collect()
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let model = request.model.id.to_string();
        let recorded = Recorded {
            model: model.clone(),
            system: request.system,
            user: request.user,
        };
        let scripted = if recorded.is_synthesis() {
            self.synthesis.get(&model).or_else(|| self.behaviors.get(&model))
        } else {
            self.behaviors.get(&model)
        }
        .cloned();
        self.recorded.lock().unwrap().push(recorded);

        match scripted {
            None => Ok(format!("{} says hello", model)),
            Some(Behavior::Reply(text)) => Ok(text),
            Some(Behavior::Fail(e)) => Err(e),
            Some(Behavior::Hang) => std::future::pending().await,
            Some(Behavior::Empty) => Ok("   ".to_string()),
        }
    }
}

/// Registry with providers `a`, `b` and `c`.
pub fn registry() -> ProviderRegistry {
    ["a", "b", "c"]
        .into_iter()
        .fold(ProviderRegistry::new(), |registry, name| {
            registry.with_provider(ProviderConfig::new(name, format!("http://{}.test/v1", name)))
        })
}

pub fn models(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}
