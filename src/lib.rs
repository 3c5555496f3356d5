pub mod agent;
pub mod ask;
pub mod configs;
pub mod conversation;
pub mod errors;
pub mod providers;
pub mod tools;

pub use agent::{Agent, AgentSettings, Reply};
pub use errors::{AgentError, AgentResult, ToolError};
