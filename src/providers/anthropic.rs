use reqwest::blocking::Client; // single-threaded loop, so the blocking API is enough
use serde_json::{json, Value};
use tracing::debug;

use super::{
    base::{Completion, CompletionRequest, Provider},
    utils::{anthropic_response_to_completion, messages_to_anthropic_spec, tools_to_anthropic_spec},
};
use crate::configs::anthropic::{AnthropicProviderConfig, ANTHROPIC_VERSION};
use crate::errors::{AgentError, AgentResult};

pub struct AnthropicProvider {
    client: Client,
    config: AnthropicProviderConfig,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicProviderConfig) -> AgentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn post(&self, payload: Value) -> AgentResult<Value> {
        let url = format!("{}/v1/messages", self.config.host.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .map_err(AgentError::transport)?;

        let status = response.status();
        if !status.is_success() {
            // Not retried: any failure here ends the invocation.
            let body = response.text().unwrap_or_default();
            return Err(AgentError::TransportFailure {
                status: Some(status.as_u16()),
                body,
            });
        }

        // Reading the body can still time out
        let body = response.text().map_err(AgentError::transport)?;
        serde_json::from_str(&body)
            .map_err(|e| AgentError::InvalidResponse(format!("body is not JSON: {}", e)))
    }
}

impl Provider for AnthropicProvider {
    fn complete(&self, request: &CompletionRequest<'_>) -> AgentResult<Completion> {
        let mut payload = json!({
            "model": request.model,
            "max_tokens": request.max_tokens,
            "messages": messages_to_anthropic_spec(request.messages),
        });

        let tools_spec = tools_to_anthropic_spec(request.tools, request.server_tools)?;
        if let Some(object) = payload.as_object_mut() {
            if !tools_spec.is_empty() {
                object.insert("tools".to_string(), json!(tools_spec));
            }
            if let Some(system) = request.system {
                object.insert("system".to_string(), json!(system));
            }
        }

        let response = self.post(payload)?;
        let completion = anthropic_response_to_completion(&response)?;

        debug!(
            stop_reason = %completion.stop_reason,
            input_tokens = ?completion.usage.input_tokens,
            output_tokens = ?completion.usage.output_tokens,
            "completion received"
        );

        Ok(completion)
    }
}
