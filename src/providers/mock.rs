use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::errors::{AgentError, AgentResult};
use crate::providers::base::{Completion, CompletionRequest, Provider, StopReason, Usage};
use crate::providers::types::message::Message;

/// What the mock saw on one call
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    pub tool_names: Vec<String>,
}

enum Scripted {
    Reply(Completion),
    Fail(AgentError),
}

/// A mock provider that returns pre-configured responses for testing
pub struct MockProvider {
    responses: Mutex<VecDeque<Scripted>>,
    repeat: Option<Completion>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<(Message, StopReason)>) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|(message, stop_reason)| Scripted::Reply(completion(message, stop_reason)))
                    .collect(),
            ),
            repeat: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every call with the same response
    pub fn repeating(message: Message, stop_reason: StopReason) -> Self {
        let mut provider = Self::new(vec![]);
        provider.repeat = Some(completion(message, stop_reason));
        provider
    }

    /// Queue a failure after the responses already scripted
    pub fn then_fail(self, error: AgentError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(error));
        self
    }

    /// Shared handle to the requests seen so far, usable after the provider moves into an agent
    pub fn requests(&self) -> Arc<Mutex<Vec<RecordedRequest>>> {
        Arc::clone(&self.requests)
    }
}

fn completion(message: Message, stop_reason: StopReason) -> Completion {
    Completion {
        message,
        stop_reason,
        usage: Usage::default(),
    }
}

impl Provider for MockProvider {
    fn complete(&self, request: &CompletionRequest<'_>) -> AgentResult<Completion> {
        self.requests.lock().unwrap().push(RecordedRequest {
            model: request.model.to_string(),
            max_tokens: request.max_tokens,
            messages: request.messages.to_vec(),
            tool_names: request.tools.iter().map(|t| t.name.clone()).collect(),
        });

        match self.responses.lock().unwrap().pop_front() {
            Some(Scripted::Reply(completion)) => Ok(completion),
            Some(Scripted::Fail(error)) => Err(error),
            None => match &self.repeat {
                Some(completion) => Ok(completion.clone()),
                None => Err(AgentError::InvalidResponse(
                    "mock provider ran out of responses".to_string(),
                )),
            },
        }
    }
}
