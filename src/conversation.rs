use serde::Serialize;

use crate::errors::{AgentError, AgentResult};
use crate::providers::types::content::ToolResult;
use crate::providers::types::message::{Message, Role};

/// Append-only history of one agent invocation.
///
/// It starts with the caller's prompt and only ever grows by whole turns: an assistant
/// message followed by the user message answering each of its tool calls. A finished run
/// ends with the assistant's answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(prompt: &str) -> AgentResult<Self> {
        Ok(Self {
            messages: vec![Message::user(prompt)?],
        })
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a tool round. `results` must answer the assistant's tool calls one to one, in
    /// call order.
    pub fn push_turn(&mut self, assistant: Message, results: Vec<ToolResult>) -> AgentResult<()> {
        if assistant.role != Role::Assistant {
            return Err(AgentError::ProtocolViolation(
                "tool round must start with an assistant message".to_string(),
            ));
        }

        let call_ids: Vec<String> = assistant.tool_use().into_iter().map(|t| t.id).collect();
        let result_ids: Vec<&str> = results.iter().map(|r| r.tool_use_id.as_str()).collect();
        if call_ids.is_empty() {
            return Err(AgentError::ProtocolViolation(
                "assistant requested tool use without any tool_use block".to_string(),
            ));
        }
        if call_ids != result_ids {
            return Err(AgentError::ProtocolViolation(format!(
                "tool results {:?} do not answer tool calls {:?}",
                result_ids, call_ids
            )));
        }

        let answer = Message::tool_results(results)?;
        self.messages.push(assistant);
        self.messages.push(answer);
        Ok(())
    }

    /// Append the final assistant message of a finished run
    pub fn push_answer(&mut self, assistant: Message) -> AgentResult<()> {
        if assistant.role != Role::Assistant {
            return Err(AgentError::ProtocolViolation(
                "answer must be an assistant message".to_string(),
            ));
        }
        self.messages.push(assistant);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::types::content::Content;
    use anyhow::Result;
    use serde_json::json;

    fn assistant_calling(ids: &[&str]) -> Result<Message> {
        let content = ids
            .iter()
            .map(|id| Content::tool_use(*id, "get_weather", json!({"station": "KJFK"})))
            .collect();
        Ok(Message::new(Role::Assistant, content)?)
    }

    fn result(id: &str) -> ToolResult {
        ToolResult::from_payload(id, &json!({}), false)
    }

    #[test]
    fn test_new_holds_only_the_prompt() -> Result<()> {
        let conversation = Conversation::new("What's the weather?")?;
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].role, Role::User);
        assert_eq!(conversation.messages()[0].text(), "What's the weather?");
        Ok(())
    }

    #[test]
    fn test_push_turn_appends_pair() -> Result<()> {
        let mut conversation = Conversation::new("hi")?;
        conversation.push_turn(assistant_calling(&["a", "b"])?, vec![result("a"), result("b")])?;

        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.messages()[1].role, Role::Assistant);
        let answered: Vec<_> = conversation.messages()[2]
            .tool_result()
            .into_iter()
            .map(|r| r.tool_use_id)
            .collect();
        assert_eq!(answered, vec!["a", "b"]);
        Ok(())
    }

    #[test]
    fn test_push_turn_rejects_mismatched_results() -> Result<()> {
        let mut conversation = Conversation::new("hi")?;

        let out_of_order = conversation.push_turn(
            assistant_calling(&["a", "b"])?,
            vec![result("b"), result("a")],
        );
        assert!(matches!(out_of_order, Err(AgentError::ProtocolViolation(_))));

        let missing = conversation.push_turn(assistant_calling(&["a", "b"])?, vec![result("a")]);
        assert!(matches!(missing, Err(AgentError::ProtocolViolation(_))));

        let no_calls = conversation.push_turn(Message::assistant("just text")?, vec![]);
        assert!(matches!(no_calls, Err(AgentError::ProtocolViolation(_))));

        // Nothing was appended by the failed attempts
        assert_eq!(conversation.len(), 1);
        Ok(())
    }

    #[test]
    fn test_push_answer() -> Result<()> {
        let mut conversation = Conversation::new("hi")?;

        let from_user = conversation.push_answer(Message::user("me again")?);
        assert!(matches!(from_user, Err(AgentError::ProtocolViolation(_))));
        assert_eq!(conversation.len(), 1);

        conversation.push_answer(Message::assistant("Sunny.")?)?;
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.messages()[1].text(), "Sunny.");
        Ok(())
    }
}
