//! Domain error types

use thiserror::Error;

/// Errors raised while turning an identifier string into a resolved model.
///
/// Both variants carry the registered provider names so the message tells
/// the caller what would have been accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid model identifier '{identifier}': expected 'provider:model' ({})", describe_providers(.available))]
    InvalidIdentifier {
        identifier: String,
        available: Vec<String>,
    },

    #[error("Unknown provider '{provider}' in '{identifier}' ({})", describe_providers(.available))]
    UnknownProvider {
        identifier: String,
        provider: String,
        available: Vec<String>,
    },
}

impl ResolveError {
    /// The identifier string that failed to resolve.
    pub fn identifier(&self) -> &str {
        match self {
            ResolveError::InvalidIdentifier { identifier, .. }
            | ResolveError::UnknownProvider { identifier, .. } => identifier,
        }
    }

    /// Provider names that were registered when resolution failed.
    pub fn available_providers(&self) -> &[String] {
        match self {
            ResolveError::InvalidIdentifier { available, .. }
            | ResolveError::UnknownProvider { available, .. } => available,
        }
    }
}

fn describe_providers(available: &[String]) -> String {
    if available.is_empty() {
        "no providers are registered".to_string()
    } else {
        format!("registered providers: {}", available.join(", "))
    }
}
