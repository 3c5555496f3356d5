use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use super::content::{Content, ToolResult, ToolUse};
use super::objectid::create_object_id;
use crate::errors::{AgentError, AgentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub id: String,
    pub created: i64,
    pub content: Vec<Content>,
}

impl Message {
    pub fn new(role: Role, content: Vec<Content>) -> AgentResult<Self> {
        let msg = Self {
            role,
            id: create_object_id("msg"),
            created: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or_default(),
            content,
        };
        msg.validate()?;
        Ok(msg)
    }

    fn validate(&self) -> AgentResult<()> {
        let invalid = |reason: &str| Err(AgentError::InvalidMessage(reason.to_string()));
        match self.role {
            Role::User => {
                if !self.has_text() && !self.has_tool_result() {
                    return invalid("User message must include a Text or ToolResult");
                }
                if self.has_tool_use() {
                    return invalid("User message does not support ToolUse");
                }
            }
            Role::Assistant => {
                if !self.has_text() && !self.has_tool_use() && !self.has_raw() {
                    return invalid("Assistant message must include a Text or ToolUse");
                }
                if self.has_tool_result() {
                    return invalid("Assistant message does not support ToolResult");
                }
            }
        }
        Ok(())
    }

    /// All text blocks, in order, joined with newlines.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(Content::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn tool_use(&self) -> Vec<ToolUse> {
        self.content
            .iter()
            .filter_map(|content| content.as_tool_use().cloned())
            .collect()
    }

    pub fn tool_result(&self) -> Vec<ToolResult> {
        self.content
            .iter()
            .filter_map(|content| match content {
                Content::ToolResult(tool_result) => Some(tool_result.clone()),
                _ => None,
            })
            .collect()
    }

    fn has_text(&self) -> bool {
        self.content.iter().any(|c| matches!(c, Content::Text(_)))
    }

    fn has_tool_use(&self) -> bool {
        self.content.iter().any(|c| matches!(c, Content::ToolUse(_)))
    }

    fn has_tool_result(&self) -> bool {
        self.content.iter().any(|c| matches!(c, Content::ToolResult(_)))
    }

    fn has_raw(&self) -> bool {
        self.content.iter().any(|c| matches!(c, Content::Raw(_)))
    }

    pub fn user(text: &str) -> AgentResult<Self> {
        Self::new(Role::User, vec![Content::text(text)])
    }

    pub fn assistant(text: &str) -> AgentResult<Self> {
        Self::new(Role::Assistant, vec![Content::text(text)])
    }

    pub fn tool_results(results: Vec<ToolResult>) -> AgentResult<Self> {
        Self::new(
            Role::User,
            results.into_iter().map(Content::ToolResult).collect(),
        )
    }

    pub fn summary(&self) -> String {
        let content_summaries: Vec<String> = self.content.iter().map(|c| c.summary()).collect();
        format!("message:{:?}\n{}", self.role, content_summaries.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::{json, Value};

    #[test]
    fn test_user_message() -> Result<()> {
        let user_message = Message::user("abcd")?;
        assert_eq!(user_message.role, Role::User);
        assert_eq!(user_message.text(), "abcd");
        Ok(())
    }

    #[test]
    fn test_text_joins_blocks_in_order() -> Result<()> {
        let message = Message::new(
            Role::Assistant,
            vec![
                Content::text("A"),
                Content::tool_use("1", "get_weather", json!({"station": "KJFK"})),
                Content::text("B"),
            ],
        )?;
        assert_eq!(message.text(), "A\nB");
        assert_eq!(message.tool_use().len(), 1);
        Ok(())
    }

    #[test]
    fn test_message_tool_result() -> Result<()> {
        let message = Message::tool_results(vec![
            ToolResult::from_payload("1", &json!({"ok": true}), false),
            ToolResult::from_payload("2", &json!({"error": "nope"}), true),
        ])?;

        let tool_results = message.tool_result();
        assert_eq!(message.role, Role::User);
        assert_eq!(tool_results.len(), 2);
        assert_eq!(tool_results[0].tool_use_id, "1");
        assert!(tool_results[1].is_error);
        Ok(())
    }

    #[test]
    fn test_message_validation() {
        // User with tool_use
        let result = Message::new(
            Role::User,
            vec![
                Content::text(""),
                Content::tool_use("1", "tool", json!({})),
            ],
        );
        assert!(matches!(result, Err(AgentError::InvalidMessage(_))));

        // Assistant with tool_result
        let result = Message::new(
            Role::Assistant,
            vec![
                Content::text(""),
                Content::ToolResult(ToolResult::from_payload("1", &json!({}), false)),
            ],
        );
        assert!(matches!(result, Err(AgentError::InvalidMessage(_))));

        // Empty messages
        assert!(Message::new(Role::User, vec![]).is_err());
        assert!(Message::new(Role::Assistant, vec![]).is_err());
    }

    #[test]
    fn test_serialization() -> Result<()> {
        let message = Message::new(
            Role::Assistant,
            vec![
                Content::text("Using tool"),
                Content::tool_use("toolu_1", "get_weather", json!({"station": "EGLL"})),
            ],
        )?;

        let serialized = serde_json::to_string(&message)?;
        let deserialized: Message = serde_json::from_str(&serialized)?;
        assert_eq!(message, deserialized);

        let json_value: Value = serde_json::from_str(&serialized)?;
        assert_eq!(json_value["role"], "assistant");
        assert_eq!(json_value["content"][1]["type"], "tool_use");
        assert!(json_value.get("id").is_some());
        assert!(json_value.get("created").is_some());
        Ok(())
    }
}
