//! Request-shape compatibility table
//!
//! OpenAI-compatible backends disagree on the name of the output token cap.
//! Older models take `max_tokens`; newer OpenAI families reject it and
//! require `max_completion_tokens`. The table maps model-id patterns to the
//! field a backend accepts, so a new model family is one more row.

use regex::Regex;

/// How the output token cap is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestShape {
    /// `max_tokens`
    LegacyMaxTokens,
    /// `max_completion_tokens`
    MaxCompletionTokens,
}

impl RequestShape {
    /// JSON field carrying the output token cap.
    pub fn token_field(self) -> &'static str {
        match self {
            RequestShape::LegacyMaxTokens => "max_tokens",
            RequestShape::MaxCompletionTokens => "max_completion_tokens",
        }
    }
}

/// Ordered `(pattern, shape)` rows; the first matching row wins.
#[derive(Debug, Clone)]
pub struct RequestShapeTable {
    rules: Vec<(Regex, RequestShape)>,
    fallback: RequestShape,
}

impl Default for RequestShapeTable {
    fn default() -> Self {
        Self::empty()
            .with_builtin(r"^o\d", RequestShape::MaxCompletionTokens)
            .with_builtin(r"^gpt-5", RequestShape::MaxCompletionTokens)
            .with_builtin(r"^gpt-4\.1", RequestShape::MaxCompletionTokens)
    }
}

impl RequestShapeTable {
    /// A table with no rows; everything uses the legacy shape.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            fallback: RequestShape::LegacyMaxTokens,
        }
    }

    fn with_builtin(mut self, pattern: &str, shape: RequestShape) -> Self {
        if let Ok(regex) = Regex::new(pattern) {
            self.rules.push((regex, shape));
        }
        self
    }

    /// Append a row. Rows added later lose to earlier matches.
    pub fn with_rule(mut self, pattern: &str, shape: RequestShape) -> Result<Self, regex::Error> {
        self.rules.push((Regex::new(pattern)?, shape));
        Ok(self)
    }

    /// Shape for `model`, the part after `provider:`.
    ///
    /// Routed ids such as `openai/gpt-5` are matched on their last segment.
    pub fn shape_for(&self, model: &str) -> RequestShape {
        let name = model.rsplit('/').next().unwrap_or(model);
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(name))
            .map(|(_, shape)| *shape)
            .unwrap_or(self.fallback)
    }
}
