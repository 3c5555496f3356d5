use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::message::Message;
use super::types::tool::{ServerTool, Tool};
use crate::errors::AgentResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
}

impl Usage {
    pub fn new(input_tokens: Option<i32>, output_tokens: Option<i32>) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }
}

/// Why the endpoint stopped generating. Anything other than `end_turn` and `tool_use` is
/// kept verbatim so the caller can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    ToolUse,
    Other(String),
}

impl From<&str> for StopReason {
    fn from(value: &str) -> Self {
        match value {
            "end_turn" => StopReason::EndTurn,
            "tool_use" => StopReason::ToolUse,
            other => StopReason::Other(other.to_string()),
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndTurn => write!(f, "end_turn"),
            StopReason::ToolUse => write!(f, "tool_use"),
            StopReason::Other(other) => write!(f, "{}", other),
        }
    }
}

/// Everything one round-trip to the endpoint needs.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub system: Option<&'a str>,
    pub max_tokens: u32,
    pub messages: &'a [Message],
    pub tools: &'a [Tool],
    pub server_tools: &'a [ServerTool],
}

/// The assistant message produced by one round-trip, with its stop reason.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub message: Message,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

/// Base trait for model endpoints
pub trait Provider: Send + Sync {
    /// Perform a single request/response cycle. Any non-success transport outcome is an error.
    fn complete(&self, request: &CompletionRequest<'_>) -> AgentResult<Completion>;
}
