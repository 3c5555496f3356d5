//! Local tools the model may call, and the registry that dispatches to them.
//!
//! Dispatch never fails: an unknown name or a handler error becomes an error-flagged
//! `ToolResult` that is handed back to the model like any other result.
pub mod weather;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::errors::{AgentError, AgentResult, ToolError, ToolResult as HandlerResult};
use crate::providers::types::content::{ToolResult, ToolUse};
use crate::providers::types::tool::Tool;

pub use weather::WeatherTool;

/// A locally executed capability
pub trait ToolHandler: Send + Sync {
    /// The descriptor advertised to the model
    fn tool(&self) -> Tool;

    /// Run the tool. Failures the model should reason about (e.g. a failed fetch) belong in
    /// the returned value; `Err` is for calls that could not be carried out at all.
    fn call(&self, input: &Value) -> HandlerResult<Value>;
}

#[derive(Default)]
pub struct ToolRegistry {
    handlers: Vec<Box<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Box<dyn ToolHandler>) -> AgentResult<()> {
        let name = handler.tool().name;
        if self.handlers.iter().any(|h| h.tool().name == name) {
            return Err(AgentError::Config(format!("Duplicate tool name: {}", name)));
        }
        self.handlers.push(handler);
        Ok(())
    }

    pub fn with(mut self, handler: Box<dyn ToolHandler>) -> AgentResult<Self> {
        self.register(handler)?;
        Ok(self)
    }

    /// Descriptors for every registered tool, in registration order
    pub fn tools(&self) -> Vec<Tool> {
        self.handlers.iter().map(|h| h.tool()).collect()
    }

    fn handler(&self, name: &str) -> Option<&dyn ToolHandler> {
        self.handlers
            .iter()
            .find(|h| h.tool().name == name)
            .map(|h| &**h)
    }

    /// Execute one tool call and answer it with a result carrying the same call id
    pub fn dispatch(&self, tool_use: &ToolUse) -> ToolResult {
        let outcome = match self.handler(&tool_use.name) {
            Some(handler) => {
                info!(tool = %tool_use.name, input = %tool_use.input, "calling tool");
                handler.call(&tool_use.input)
            }
            None => Err(ToolError::UnknownTool(tool_use.name.clone())),
        };

        match outcome {
            Ok(payload) => ToolResult::from_payload(&tool_use.id, &payload, false),
            Err(err) => {
                warn!(tool = %tool_use.name, id = %tool_use.id, error = %err, "tool call failed");
                ToolResult::from_payload(&tool_use.id, &json!({"error": err.to_string()}), true)
            }
        }
    }

    /// Answer every call in order; the i-th result pairs with the i-th call
    pub fn dispatch_all(&self, calls: &[ToolUse]) -> Vec<ToolResult> {
        calls.iter().map(|call| self.dispatch(call)).collect()
    }
}
