use regex::Regex;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::OnceLock;

use super::base::{Completion, StopReason, Usage};
use super::types::{
    content::{Content, Raw, Text, ToolUse},
    message::{Message, Role},
    tool::{ServerTool, Tool},
};
use crate::errors::{AgentError, AgentResult};

/// Convert internal Message format to the Messages API specification.
///
/// Only `role` and `content` go over the wire; our `id` and `created` stay local.
pub fn messages_to_anthropic_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            let content: Vec<Value> = message.content.iter().map(content_to_spec).collect();
            json!({
                "role": message.role,
                "content": content,
            })
        })
        .collect()
}

fn content_to_spec(content: &Content) -> Value {
    match content {
        Content::Text(Text { text }) => json!({"type": "text", "text": text}),
        Content::ToolUse(tool_use) => json!({
            "type": "tool_use",
            "id": tool_use.id,
            "name": tool_use.name,
            "input": tool_use.input,
        }),
        Content::ToolResult(result) => {
            let mut spec = json!({
                "type": "tool_result",
                "tool_use_id": result.tool_use_id,
                "content": result.content,
            });
            if result.is_error {
                spec["is_error"] = json!(true);
            }
            spec
        }
        Content::Raw(raw) => raw.body.clone(),
    }
}

/// Convert tool declarations to the Messages API specification
pub fn tools_to_anthropic_spec(tools: &[Tool], server_tools: &[ServerTool]) -> AgentResult<Vec<Value>> {
    let mut tool_names = HashSet::new();
    let mut result = Vec::new();

    for tool in tools {
        if !is_valid_tool_name(&tool.name) {
            return Err(AgentError::Config(format!(
                "Tool name '{}' must match [a-zA-Z0-9_-]{{1,64}}",
                tool.name
            )));
        }
        if !tool_names.insert(tool.name.as_str()) {
            return Err(AgentError::Config(format!("Duplicate tool name: {}", tool.name)));
        }

        result.push(json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": tool.input_schema,
        }));
    }

    for server_tool in server_tools {
        if !tool_names.insert(server_tool.name.as_str()) {
            return Err(AgentError::Config(format!(
                "Duplicate tool name: {}",
                server_tool.name
            )));
        }
        result.push(json!(server_tool));
    }

    Ok(result)
}

/// Convert a Messages API response body into a validated `Completion`
pub fn anthropic_response_to_completion(response: &Value) -> AgentResult<Completion> {
    let stop_reason = response
        .get("stop_reason")
        .and_then(Value::as_str)
        .ok_or_else(|| AgentError::InvalidResponse("missing stop_reason".to_string()))?;

    let blocks = response
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| AgentError::InvalidResponse("missing content array".to_string()))?;

    let content = blocks
        .iter()
        .map(block_to_content)
        .collect::<AgentResult<Vec<_>>>()?;

    // An empty turn (e.g. end_turn with no text) is still a valid answer.
    let message = if content.is_empty() {
        Message::assistant("")?
    } else {
        Message::new(Role::Assistant, content)
            .map_err(|e| AgentError::InvalidResponse(e.to_string()))?
    };

    Ok(Completion {
        message,
        stop_reason: StopReason::from(stop_reason),
        usage: get_usage(response),
    })
}

fn block_to_content(block: &Value) -> AgentResult<Content> {
    let block_type = block
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| AgentError::InvalidResponse("content block without type".to_string()))?;

    match block_type {
        "text" => {
            let text = block
                .get("text")
                .and_then(Value::as_str)
                .ok_or_else(|| AgentError::InvalidResponse("text block without text".to_string()))?;
            Ok(Content::text(text))
        }
        "tool_use" => {
            let id = required_str(block, "id")?;
            let name = required_str(block, "name")?;
            let input = block.get("input").cloned().unwrap_or_else(|| json!({}));
            if !input.is_object() {
                return Err(AgentError::InvalidResponse(format!(
                    "tool_use {} has non-object input",
                    id
                )));
            }
            Ok(Content::ToolUse(ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input,
            }))
        }
        "tool_result" => Err(AgentError::InvalidResponse(
            "assistant content cannot contain tool_result".to_string(),
        )),
        other => Ok(Content::Raw(Raw {
            block_type: other.to_string(),
            body: block.clone(),
        })),
    }
}

fn required_str<'a>(block: &'a Value, field: &str) -> AgentResult<&'a str> {
    block
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AgentError::InvalidResponse(format!("tool_use block without {}", field)))
}

fn get_usage(data: &Value) -> Usage {
    let read = |key: &str| {
        data.get("usage")
            .and_then(|usage| usage.get(key))
            .and_then(Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
    };
    Usage::new(read("input_tokens"), read("output_tokens"))
}

pub fn is_valid_tool_name(name: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]{1,64}$").expect("valid tool name regex"))
        .is_match(name)
}

/// Concatenate every text block of a message, with no separator.
pub fn concat_response_text(message: &Message) -> String {
    message.content.iter().filter_map(Content::as_text).collect()
}
