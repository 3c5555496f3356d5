use thiserror::Error;

/// Failures that abort an agent invocation.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AgentError {
    /// The model endpoint answered with a non-success status, or could not be reached at all
    /// (connection refused, timeout). `status` is `None` in the latter case.
    #[error("API error: {}", describe_transport(.status, .body))]
    TransportFailure { status: Option<u16>, body: String },

    #[error("unexpected stop reason: {0}")]
    UnexpectedStopReason(String),

    #[error("exceeded {0} turns")]
    TurnLimitExceeded(usize),

    #[error("Invalid response from model endpoint: {0}")]
    InvalidResponse(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_transport(status: &Option<u16>, body: &str) -> String {
    match (status, body.is_empty()) {
        (Some(code), true) => format!("HTTP {}", code),
        (Some(code), false) => format!("HTTP {} - {}", code, body),
        (None, _) => body.to_string(),
    }
}

impl AgentError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        AgentError::TransportFailure {
            status: err.status().map(|s| s.as_u16()),
            body: err.to_string(),
        }
    }
}

pub type AgentResult<T> = Result<T, AgentError>;

/// Failures of a single tool call. These never abort the loop; the registry turns them into
/// error-flagged tool results for the model to read.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("tool execution failed: {0}")]
    ExecutionError(String),
}

pub type ToolResult<T> = Result<T, ToolError>;
