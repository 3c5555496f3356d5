use tracing::{debug, info, info_span, trace};

use crate::configs::anthropic::DEFAULT_MODEL;
use crate::conversation::Conversation;
use crate::errors::{AgentError, AgentResult};
use crate::providers::base::{CompletionRequest, Provider, StopReason};
use crate::providers::types::tool::Tool;
use crate::tools::ToolRegistry;

pub const DEFAULT_MAX_TURNS: usize = 10;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub model: String,
    pub max_tokens: u32,
    pub max_turns: usize,
    pub system: Option<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_turns: DEFAULT_MAX_TURNS,
            system: None,
        }
    }
}

/// The final answer of an invocation, with the history that produced it
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub turns: usize,
    pub conversation: Conversation,
}

/// Agent drives a model endpoint through tool calls until it produces an answer
pub struct Agent {
    provider: Box<dyn Provider>,
    registry: ToolRegistry,
    settings: AgentSettings,
}

impl Agent {
    pub fn new(provider: Box<dyn Provider>, registry: ToolRegistry, settings: AgentSettings) -> Self {
        Self {
            provider,
            registry,
            settings,
        }
    }

    /// Run the tool-use loop for a single prompt.
    ///
    /// Each turn sends the whole conversation. `end_turn` finishes with the newline-joined
    /// text of that response; `tool_use` dispatches every call in order and appends the
    /// assistant message and its results before the next turn. Any other stop reason, a
    /// transport failure, or running out of turns ends the invocation with an error.
    pub fn run(&self, prompt: &str) -> AgentResult<Reply> {
        let tools: Vec<Tool> = self.registry.tools();
        let mut conversation = Conversation::new(prompt)?;

        for turn in 0..self.settings.max_turns {
            let _span = info_span!("turn", turn = turn + 1).entered();

            let completion = self.provider.complete(&CompletionRequest {
                model: &self.settings.model,
                system: self.settings.system.as_deref(),
                max_tokens: self.settings.max_tokens,
                messages: conversation.messages(),
                tools: &tools,
                server_tools: &[],
            })?;
            trace!(message = %completion.message.summary(), "assistant replied");

            match completion.stop_reason {
                StopReason::EndTurn => {
                    info!(turns = turn + 1, "agent finished");
                    let text = completion.message.text();
                    conversation.push_answer(completion.message)?;
                    return Ok(Reply {
                        text,
                        turns: turn + 1,
                        conversation,
                    });
                }
                StopReason::ToolUse => {
                    let calls = completion.message.tool_use();
                    debug!(calls = calls.len(), "dispatching tool calls");
                    let results = self.registry.dispatch_all(&calls);
                    conversation.push_turn(completion.message, results)?;
                }
                StopReason::Other(reason) => return Err(AgentError::UnexpectedStopReason(reason)),
            }
        }

        Err(AgentError::TurnLimitExceeded(self.settings.max_turns))
    }
}
