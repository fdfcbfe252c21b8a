//! Model identity value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A backend model addressed as `"provider:modelId"` (Value Object)
///
/// The split happens at the first colon, so model ids that contain colons
/// themselves (e.g. `ollama:llama3:8b`) keep everything after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId {
    provider: String,
    model: String,
}

/// Reasons a string is not a well-formed identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelIdParseError {
    MissingSeparator,
    EmptyProvider,
    EmptyModel,
}

impl std::fmt::Display for ModelIdParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            ModelIdParseError::MissingSeparator => "missing ':' separator",
            ModelIdParseError::EmptyProvider => "provider portion is empty",
            ModelIdParseError::EmptyModel => "model portion is empty",
        };
        write!(f, "{}", msg)
    }
}

impl std::error::Error for ModelIdParseError {}

impl ModelId {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.provider, self.model)
    }
}

impl std::str::FromStr for ModelId {
    type Err = ModelIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (provider, model) = s
            .split_once(':')
            .ok_or(ModelIdParseError::MissingSeparator)?;
        let (provider, model) = (provider.trim(), model.trim());
        if provider.is_empty() {
            return Err(ModelIdParseError::EmptyProvider);
        }
        if model.is_empty() {
            return Err(ModelIdParseError::EmptyModel);
        }
        Ok(Self::new(provider, model))
    }
}

impl Serialize for ModelId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ModelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| serde::de::Error::custom(format!("'{}': {}", s, e)))
    }
}
