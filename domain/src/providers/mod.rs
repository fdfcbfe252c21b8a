//! Provider registry and model resolution (provider-neutral, serde-free).
//!
//! The registry is loaded once at startup by the infrastructure layer and
//! then only read. [`ProviderRegistry::resolve`] is the Model Resolver: it
//! turns a `"provider:model"` string into the connection parameters the
//! gateway needs, without touching the network.

use crate::core::error::ResolveError;
use crate::core::model::ModelId;
use std::collections::BTreeMap;

/// Connection settings for one named provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Registry key, the part before the colon in a model identifier.
    pub name: String,
    /// Base URL of an OpenAI-compatible API (e.g. `https://api.openai.com/v1`).
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    ///
    /// `None` means the backend accepts unauthenticated requests.
    pub credential_ref: Option<String>,
    /// Model used when only the provider is known.
    pub default_model: Option<String>,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            credential_ref: None,
            default_model: None,
        }
    }

    pub fn with_credential_ref(mut self, env_var: impl Into<String>) -> Self {
        self.credential_ref = Some(env_var.into());
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }
}

/// A model identifier joined with its provider's connection settings.
///
/// Recomputed on every call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub id: ModelId,
    pub endpoint: String,
    pub credential_ref: Option<String>,
}

impl ResolvedModel {
    pub fn provider(&self) -> &str {
        self.id.provider()
    }

    pub fn model(&self) -> &str {
        self.id.model()
    }
}

/// Registered providers, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, ProviderConfig>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// OpenAI-compatible providers registered when nothing is configured.
    pub fn builtin() -> Self {
        Self::new()
            .with_provider(
                ProviderConfig::new("openai", "https://api.openai.com/v1")
                    .with_credential_ref("OPENAI_API_KEY")
                    .with_default_model("gpt-4o"),
            )
            .with_provider(
                ProviderConfig::new("openrouter", "https://openrouter.ai/api/v1")
                    .with_credential_ref("OPENROUTER_API_KEY")
                    .with_default_model("anthropic/claude-sonnet-4"),
            )
            .with_provider(
                ProviderConfig::new("ollama", "http://localhost:11434/v1")
                    .with_default_model("llama3.1"),
            )
    }

    pub fn with_provider(mut self, config: ProviderConfig) -> Self {
        self.register(config);
        self
    }

    /// Register (or replace) a provider.
    pub fn register(&mut self, config: ProviderConfig) {
        self.providers.insert(config.name.clone(), config);
    }

    pub fn get(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    /// All providers in name order.
    pub fn list(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.values()
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolve a `"provider:model"` identifier.
    pub fn resolve(&self, identifier: &str) -> Result<ResolvedModel, ResolveError> {
        let id = identifier
            .parse::<ModelId>()
            .map_err(|_| ResolveError::InvalidIdentifier {
                identifier: identifier.to_string(),
                available: self.names(),
            })?;
        self.resolve_id(&id)
    }

    /// Resolve an already-parsed identifier.
    pub fn resolve_id(&self, id: &ModelId) -> Result<ResolvedModel, ResolveError> {
        let provider = self
            .get(id.provider())
            .ok_or_else(|| ResolveError::UnknownProvider {
                identifier: id.to_string(),
                provider: id.provider().to_string(),
                available: self.names(),
            })?;

        Ok(ResolvedModel {
            id: id.clone(),
            endpoint: provider.endpoint.clone(),
            credential_ref: provider.credential_ref.clone(),
        })
    }
}
