//! In-memory [`RestInvoker`] for tests
//!
//! Replies are queued up front and handed out in order; every request is
//! recorded so tests can assert on fragments, methods and bodies.

use crate::error::{GitHubError, Result};
use crate::invoker::{RestInvoker, RestRequest, RestResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

enum MockReply {
    Single(Result<RestResponse>),
    Multi(Result<Vec<Value>>),
}

#[derive(Default)]
pub struct MockInvoker {
    replies: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<RestRequest>>,
}

impl MockInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a single-result reply with status 200
    pub fn push_json(&self, body: Value) -> &Self {
        self.push_response(RestResponse::new(200, body))
    }

    pub fn push_response(&self, response: RestResponse) -> &Self {
        self.push(MockReply::Single(Ok(response)))
    }

    /// Queue an API failure for the next single-result call
    pub fn push_api_error(&self, status: u16, message: &str) -> &Self {
        self.push_error(GitHubError::Api {
            status,
            message: message.to_string(),
            documentation_url: None,
        })
    }

    pub fn push_error(&self, error: GitHubError) -> &Self {
        self.push(MockReply::Single(Err(error)))
    }

    /// Queue the concatenated items of a paginated reply
    pub fn push_items(&self, items: Vec<Value>) -> &Self {
        self.push(MockReply::Multi(Ok(items)))
    }

    pub fn push_multi_error(&self, error: GitHubError) -> &Self {
        self.push(MockReply::Multi(Err(error)))
    }

    fn push(&self, reply: MockReply) -> &Self {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
        self
    }

    /// Every request seen so far, in order
    pub fn calls(&self) -> Vec<RestRequest> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last_call(&self) -> Option<RestRequest> {
        self.calls().pop()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn next_reply(&self, request: RestRequest) -> Option<MockReply> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }
}

fn unexpected(request_kind: &str, description: &str) -> GitHubError {
    GitHubError::InvalidArgument(format!(
        "MockInvoker: no {} reply queued for {}",
        request_kind, description
    ))
}

#[async_trait]
impl RestInvoker for MockInvoker {
    async fn invoke(&self, request: RestRequest) -> Result<RestResponse> {
        let description = request.description.clone();
        match self.next_reply(request) {
            Some(MockReply::Single(reply)) => reply,
            _ => Err(unexpected("single-result", &description)),
        }
    }

    async fn invoke_multi(&self, request: RestRequest) -> Result<Vec<Value>> {
        let description = request.description.clone();
        match self.next_reply(request) {
            Some(MockReply::Multi(reply)) => reply,
            _ => Err(unexpected("multi-result", &description)),
        }
    }
}
