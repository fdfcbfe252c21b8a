//! Provider configuration from TOML (`[providers.<name>]` tables)

use debate_domain::{ConfigIssue, ProviderConfig, ProviderRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One OpenAI-compatible provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    /// Environment variable holding the API key. Unset for local backends.
    pub api_key_env: Option<String>,
    pub default_model: Option<String>,
}

/// All `[providers.*]` tables keyed by provider name.
pub type FileProvidersConfig = BTreeMap<String, FileProviderConfig>;

/// Build the registry from configured providers, or the built-ins if none
/// are configured.
pub fn to_provider_registry(providers: &FileProvidersConfig) -> ProviderRegistry {
    if providers.is_empty() {
        return ProviderRegistry::builtin();
    }

    providers
        .iter()
        .fold(ProviderRegistry::new(), |registry, (name, file)| {
            let mut config = ProviderConfig::new(name, file.base_url.trim_end_matches('/'));
            if let Some(env) = file.api_key_env.as_deref().filter(|s| !s.is_empty()) {
                config = config.with_credential_ref(env);
            }
            if let Some(model) = &file.default_model {
                config = config.with_default_model(model);
            }
            registry.with_provider(config)
        })
}

pub(super) fn validate(providers: &FileProvidersConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    for (name, provider) in providers {
        if provider.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                format!("providers.{}.base_url", name),
                "base URL cannot be empty",
            ));
        }
        if name.contains(':') {
            issues.push(ConfigIssue::error(
                format!("providers.{}", name),
                "provider names cannot contain ':'",
            ));
        }
    }
    issues
}
