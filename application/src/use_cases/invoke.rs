//! Invocation client
//!
//! Wraps the gateway port with the per-call deadline and the empty-response
//! check shared by rounds and synthesis.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use debate_domain::ResolvedModel;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Issues one bounded-time completion call.
pub struct InvocationClient<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    max_output_tokens: u32,
}

impl<G: LlmGateway + 'static> Clone for InvocationClient<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            max_output_tokens: self.max_output_tokens,
        }
    }
}

impl<G: LlmGateway + 'static> InvocationClient<G> {
    pub fn new(gateway: Arc<G>, max_output_tokens: u32) -> Self {
        Self {
            gateway,
            max_output_tokens,
        }
    }

    /// Send `system` + `user` to `model` and wait at most `timeout`.
    ///
    /// `label` only attributes log lines. When the deadline elapses the
    /// in-flight call is dropped, which cancels the underlying request.
    pub async fn invoke(
        &self,
        model: &ResolvedModel,
        label: &str,
        system: &str,
        user: &str,
        timeout: Duration,
    ) -> Result<String, GatewayError> {
        let request = CompletionRequest {
            model: model.clone(),
            system: system.to_string(),
            user: user.to_string(),
            max_output_tokens: self.max_output_tokens,
            deadline: timeout,
        };

        let start = Instant::now();
        let result = match tokio::time::timeout(timeout, self.gateway.complete(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(model = %label, ?timeout, "Call timed out");
                return Err(GatewayError::Timeout(timeout));
            }
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let text = result?;
        let text = text.trim();
        if text.is_empty() {
            debug!(model = %label, elapsed_ms, "Backend returned no text");
            return Err(GatewayError::EmptyResponse);
        }

        debug!(model = %label, elapsed_ms, chars = text.chars().count(), "Call completed");
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{Behavior, MockGateway, registry};

    fn client(gateway: MockGateway) -> InvocationClient<MockGateway> {
        InvocationClient::new(Arc::new(gateway), 256)
    }

    #[tokio::test]
    async fn test_returns_trimmed_text() {
        let client = client(MockGateway::new().with("a:1", Behavior::Reply("  hi \n".into())));
        let model = registry().resolve("a:1").unwrap();

        let text = client
            .invoke(&model, "a:1", "sys", "user", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(text, "hi");
    }

    #[tokio::test]
    async fn test_blank_text_is_empty_response() {
        let client = client(MockGateway::new().with("a:1", Behavior::Empty));
        let model = registry().resolve("a:1").unwrap();

        let err = client
            .invoke(&model, "a:1", "sys", "user", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_deadline_surfaces_timeout() {
        let client = client(MockGateway::new().with("a:1", Behavior::Hang));
        let model = registry().resolve("a:1").unwrap();
        let timeout = Duration::from_millis(20);

        let err = client
            .invoke(&model, "a:1", "sys", "user", timeout)
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Timeout(timeout));
    }

    #[tokio::test]
    async fn test_backend_error_passes_through() {
        let failure = GatewayError::Http {
            status: 429,
            body: "rate limited".into(),
        };
        let client = client(MockGateway::new().with("a:1", Behavior::Fail(failure.clone())));
        let model = registry().resolve("a:1").unwrap();

        let err = client
            .invoke(&model, "a:1", "sys", "user", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err, failure);
    }
}
