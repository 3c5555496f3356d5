use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
}

/// A request from the model to run a locally registered tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUse {
    pub id: String,
    pub name: String,
    pub input: Value,
}

/// The answer to one `ToolUse`, paired through `tool_use_id`.
///
/// `content` holds the JSON text of the payload, which is what goes over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_use_id: String,
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn from_payload<S: Into<String>>(tool_use_id: S, payload: &Value, is_error: bool) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: payload.to_string(),
            is_error,
        }
    }

    /// The payload as JSON; content that isn't valid JSON comes back as a string value.
    pub fn payload(&self) -> Value {
        serde_json::from_str(&self.content).unwrap_or_else(|_| Value::String(self.content.clone()))
    }
}

/// A block we don't interpret but must hand back verbatim, e.g. `server_tool_use` and
/// `web_search_tool_result` produced by hosted tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raw {
    pub block_type: String,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Text(Text),
    ToolUse(ToolUse),
    ToolResult(ToolResult),
    Raw(Raw),
}

impl Content {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Content::Text(Text { text: text.into() })
    }

    pub fn tool_use<I, N>(id: I, name: N, input: Value) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        Content::ToolUse(ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(&text.text),
            _ => None,
        }
    }

    pub fn as_tool_use(&self) -> Option<&ToolUse> {
        match self {
            Content::ToolUse(tool_use) => Some(tool_use),
            _ => None,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Content::Text(t) => format!("content:text\n{}", t.text),
            Content::ToolUse(t) => format!("content:tool_use:{}\ninput:{}", t.name, t.input),
            Content::ToolResult(t) => {
                format!("content:tool_result:error={}\noutput:{}", t.is_error, t.content)
            }
            Content::Raw(r) => format!("content:{}", r.block_type),
        }
    }
}
