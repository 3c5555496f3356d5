use tracing::debug;

use crate::configs::anthropic::DEFAULT_MODEL;
use crate::conversation::Conversation;
use crate::errors::AgentResult;
use crate::providers::base::{CompletionRequest, Provider};
use crate::providers::types::tool::ServerTool;
use crate::providers::utils::concat_response_text;

pub const DEFAULT_ASK_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone)]
pub struct AskSettings {
    pub model: String,
    pub max_tokens: u32,
    pub server_tools: Vec<ServerTool>,
}

impl Default for AskSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_ASK_MAX_TOKENS,
            server_tools: Vec::new(),
        }
    }
}

/// Ask a single question, letting the endpoint run any hosted tools it was given.
///
/// There is no local tool loop: whatever the endpoint returns is the answer, formed by
/// concatenating its text blocks as-is (hosted search results interleave several).
pub fn ask(provider: &dyn Provider, settings: &AskSettings, prompt: &str) -> AgentResult<String> {
    let conversation = Conversation::new(prompt)?;
    let completion = provider.complete(&CompletionRequest {
        model: &settings.model,
        system: None,
        max_tokens: settings.max_tokens,
        messages: conversation.messages(),
        tools: &[],
        server_tools: &settings.server_tools,
    })?;

    debug!(stop_reason = %completion.stop_reason, "ask answered");
    Ok(concat_response_text(&completion.message))
}
