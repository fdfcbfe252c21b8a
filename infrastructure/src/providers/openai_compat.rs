//! OpenAI-compatible chat completion gateway
//!
//! One HTTP adapter covers every backend that speaks the
//! `POST {endpoint}/chat/completions` dialect (OpenAI, OpenRouter, Ollama,
//! vLLM, ...). Clients are pooled per `(endpoint, credential_ref)` and kept
//! for the life of the process.

use super::request_shape::RequestShapeTable;
use async_trait::async_trait;
use debate_application::{CompletionRequest, GatewayError, LlmGateway};
use debate_domain::ResolvedModel;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, trace};

/// Maximum number of error-body bytes kept in [`GatewayError::Http`].
const MAX_ERROR_BODY: usize = 500;

type PoolKey = (String, Option<String>);

/// Gateway for any OpenAI-compatible endpoint.
pub struct OpenAiCompatibleGateway {
    clients: Mutex<HashMap<PoolKey, reqwest::Client>>,
    shapes: RequestShapeTable,
}

impl Default for OpenAiCompatibleGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAiCompatibleGateway {
    pub fn new() -> Self {
        Self::with_shapes(RequestShapeTable::default())
    }

    pub fn with_shapes(shapes: RequestShapeTable) -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
            shapes,
        }
    }

    /// Number of pooled clients.
    pub fn pool_size(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Pooled client for the model's backend, created on first use.
    fn client_for(&self, model: &ResolvedModel) -> Result<reqwest::Client, GatewayError> {
        let key = (model.endpoint.clone(), model.credential_ref.clone());
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = clients.get(&key) {
            return Ok(client.clone());
        }

        let client = build_client(model.credential_ref.as_deref())?;
        debug!(endpoint = %model.endpoint, "Created HTTP client");
        clients.insert(key, client.clone());
        Ok(client)
    }

    /// JSON body for a chat completion, shaped for the target model.
    fn build_body(&self, request: &CompletionRequest) -> Value {
        let shape = self.shapes.shape_for(request.model.model());
        let mut body = Map::new();
        body.insert("model".into(), json!(request.model.model()));
        body.insert(
            "messages".into(),
            json!([
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ]),
        );
        body.insert(shape.token_field().into(), json!(request.max_output_tokens));
        Value::Object(body)
    }
}

fn build_client(credential_ref: Option<&str>) -> Result<reqwest::Client, GatewayError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    // An unset variable means the backend takes anonymous requests (e.g. Ollama).
    if let Some(env_var) = credential_ref
        && let Ok(api_key) = std::env::var(env_var)
    {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|_| GatewayError::Credential(format!("{} is not a valid header value", env_var)))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| GatewayError::Other(format!("Failed to create HTTP client: {}", e)))
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

#[derive(Deserialize)]
struct ChatApiResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatApiResponse {
    /// Text of the first choice; empty when the backend sent none.
    fn into_text(self) -> String {
        self.choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let client = self.client_for(&request.model)?;
        let url = format!("{}/chat/completions", request.model.endpoint.trim_end_matches('/'));
        let body = self.build_body(&request);
        trace!(model = %request.model.id, %url, "Sending chat completion");

        let response = client
            .post(&url)
            .timeout(request.deadline)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout(request.deadline)
                } else {
                    GatewayError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        let parsed: ChatApiResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::Other(format!("Invalid JSON response: {}", e)))?;
        Ok(parsed.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::request_shape::RequestShape;
    use debate_domain::{ProviderConfig, ProviderRegistry};
    use std::time::Duration;

    fn registry() -> ProviderRegistry {
        ProviderRegistry::new()
            .with_provider(
                ProviderConfig::new("openai", "https://api.openai.com/v1")
                    .with_credential_ref("DEBATE_TEST_UNSET_OPENAI_KEY"),
            )
            .with_provider(
                ProviderConfig::new("router", "https://api.openai.com/v1")
                    .with_credential_ref("DEBATE_TEST_UNSET_ROUTER_KEY"),
            )
            .with_provider(ProviderConfig::new("local", "http://localhost:11434/v1"))
    }

    fn request(model: &str) -> CompletionRequest {
        CompletionRequest {
            model: registry().resolve(model).unwrap(),
            system: "be brief".into(),
            user: "hello".into(),
            max_output_tokens: 321,
            deadline: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_legacy_body_shape() {
        let gateway = OpenAiCompatibleGateway::new();
        let body = gateway.build_body(&request("openai:gpt-4o"));

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be brief");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert_eq!(body["max_tokens"], 321);
        assert!(body.get("max_completion_tokens").is_none());
    }

    #[test]
    fn test_newer_models_use_max_completion_tokens() {
        let gateway = OpenAiCompatibleGateway::new();
        let body = gateway.build_body(&request("openai:o3-mini"));

        assert_eq!(body["max_completion_tokens"], 321);
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_custom_shape_table() {
        let shapes = RequestShapeTable::empty()
            .with_rule("^llama", RequestShape::MaxCompletionTokens)
            .unwrap();
        let gateway = OpenAiCompatibleGateway::with_shapes(shapes);

        let body = gateway.build_body(&request("local:llama3.1"));
        assert_eq!(body["max_completion_tokens"], 321);
    }

    #[test]
    fn test_pool_keyed_by_endpoint_and_credential() {
        let gateway = OpenAiCompatibleGateway::new();
        let registry = registry();

        gateway.client_for(&registry.resolve("openai:gpt-4o").unwrap()).unwrap();
        gateway.client_for(&registry.resolve("openai:o1").unwrap()).unwrap();
        assert_eq!(gateway.pool_size(), 1);

        // Same endpoint, different credential.
        gateway.client_for(&registry.resolve("router:gpt-4o").unwrap()).unwrap();
        assert_eq!(gateway.pool_size(), 2);

        gateway.client_for(&registry.resolve("local:llama3.1").unwrap()).unwrap();
        assert_eq!(gateway.pool_size(), 3);
    }

    #[test]
    fn test_missing_content_is_empty_text() {
        let parsed: ChatApiResponse = serde_json::from_str(r#"{"choices":[{"message":{}}]}"#).unwrap();
        assert_eq!(parsed.into_text(), "");

        let parsed: ChatApiResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(parsed.into_text(), "");

        let parsed: ChatApiResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"hi"}}]}"#).unwrap();
        assert_eq!(parsed.into_text(), "hi");
    }

    #[test]
    fn test_error_body_truncated_on_char_boundary() {
        let short = "bad request";
        assert_eq!(truncate_body(short), short);

        let long = "é".repeat(400);
        let truncated = truncate_body(&long);
        assert!(truncated.len() <= MAX_ERROR_BODY);
        assert_eq!(truncated.chars().count(), 250);
    }
}
