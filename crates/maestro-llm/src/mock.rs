//! Mock LLM Provider for testing
//!
//! Returns queued replies in order, falling back to a fixed "mock response"
//! once a queue is empty. Every request is recorded for later inspection.

use crate::completion::{CompletionRequest, CompletionResponse, CompletionStream};
use crate::error::{Error, Result};
use crate::provider::LlmProvider;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted outcome of a one-shot completion
#[derive(Debug, Clone)]
enum CompleteReply {
    Text(String),
    Fail(String),
}

/// Scripted outcome of a streamed completion
#[derive(Debug, Clone)]
enum StreamReply {
    /// Yield these chunks, then optionally fail
    Chunks {
        chunks: Vec<String>,
        fail_with: Option<String>,
    },
    /// Fail before any chunk is produced
    Fail(String),
}

#[derive(Default)]
struct MockState {
    complete_replies: VecDeque<CompleteReply>,
    stream_replies: VecDeque<StreamReply>,
    requests: Vec<CompletionRequest>,
}

/// A mock LLM provider that returns queued responses or default ones.
#[derive(Clone, Default)]
pub struct MockProvider {
    state: Arc<Mutex<MockState>>,
    complete_delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every `complete` call (for timeout tests).
    #[must_use]
    pub fn with_complete_delay(mut self, delay: Duration) -> Self {
        self.complete_delay = Some(delay);
        self
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a successful one-shot completion.
    pub fn add_response(&self, content: impl Into<String>) {
        self.state()
            .complete_replies
            .push_back(CompleteReply::Text(content.into()));
    }

    /// Queue a failing one-shot completion.
    pub fn add_failure(&self, message: impl Into<String>) {
        self.state()
            .complete_replies
            .push_back(CompleteReply::Fail(message.into()));
    }

    /// Queue a streamed completion that yields `chunks` and ends normally.
    pub fn add_stream<I, S>(&self, chunks: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state().stream_replies.push_back(StreamReply::Chunks {
            chunks: chunks.into_iter().map(Into::into).collect(),
            fail_with: None,
        });
    }

    /// Queue a streamed completion that yields `chunks` and then fails.
    pub fn add_broken_stream<I, S>(&self, chunks: I, message: impl Into<String>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state().stream_replies.push_back(StreamReply::Chunks {
            chunks: chunks.into_iter().map(Into::into).collect(),
            fail_with: Some(message.into()),
        });
    }

    /// Queue a streamed completion that fails before producing anything.
    pub fn add_stream_failure(&self, message: impl Into<String>) {
        self.state()
            .stream_replies
            .push_back(StreamReply::Fail(message.into()));
    }

    /// All requests received so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.state().requests.clone()
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let reply = {
            let mut state = self.state();
            state.requests.push(request);
            state.complete_replies.pop_front()
        };

        if let Some(delay) = self.complete_delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Some(CompleteReply::Fail(message)) => Err(Error::Network(message)),
            Some(CompleteReply::Text(content)) => Ok(CompletionResponse {
                content,
                usage: None,
                finish_reason: Some("stop".to_string()),
                model: "mock-model".to_string(),
            }),
            None => Ok(CompletionResponse {
                content: "mock response".to_string(),
                usage: None,
                finish_reason: Some("stop".to_string()),
                model: "mock-model".to_string(),
            }),
        }
    }

    async fn complete_stream(&self, request: CompletionRequest) -> Result<CompletionStream> {
        let reply = {
            let mut state = self.state();
            state.requests.push(request);
            state.stream_replies.pop_front()
        };

        let (chunks, fail_with) = match reply {
            Some(StreamReply::Fail(message)) => return Err(Error::Network(message)),
            Some(StreamReply::Chunks { chunks, fail_with }) => (chunks, fail_with),
            None => (vec!["mock ".to_string(), "response".to_string()], None),
        };

        let items: Vec<Result<String>> = chunks
            .into_iter()
            .map(Ok)
            .chain(fail_with.map(|m| Err(Error::Stream(m))))
            .collect();

        Ok(Box::pin(futures::stream::iter(items)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_queued_responses_then_default() {
        let provider = MockProvider::new();
        provider.add_response("first");
        provider.add_failure("boom");

        let first = provider
            .complete(CompletionRequest::from_prompt("a", None))
            .await
            .unwrap();
        assert_eq!(first.content, "first");

        let second = provider
            .complete(CompletionRequest::from_prompt("b", None))
            .await;
        assert!(matches!(second, Err(Error::Network(_))));

        let third = provider
            .complete(CompletionRequest::from_prompt("c", None))
            .await
            .unwrap();
        assert_eq!(third.content, "mock response");
        assert_eq!(provider.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_broken_stream_keeps_earlier_chunks() {
        let provider = MockProvider::new();
        provider.add_broken_stream(["Hel", "lo"], "connection reset");

        let items: Vec<_> = provider
            .complete_stream(CompletionRequest::from_prompt("x", None))
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_ref().unwrap(), "Hel");
        assert_eq!(items[1].as_ref().unwrap(), "lo");
        assert!(matches!(items[2], Err(Error::Stream(_))));
    }

    #[tokio::test]
    async fn test_stream_failure_before_first_chunk() {
        let provider = MockProvider::new();
        provider.add_stream_failure("refused");

        let result = provider
            .complete_stream(CompletionRequest::from_prompt("x", None))
            .await;
        assert!(result.is_err());
    }
}
