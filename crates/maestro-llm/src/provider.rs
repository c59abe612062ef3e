//! LLM Provider trait definition
//!
//! This module defines the core trait that all LLM providers must implement.

use crate::completion::{CompletionRequest, CompletionResponse, CompletionStream};
use crate::error::Result;

/// Trait for LLM providers
///
/// Retry, backoff and cost accounting are the provider's concern; callers
/// treat a returned error as final.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// Complete a conversation (text only)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Stream a completion as text chunks
    async fn complete_stream(&self, request: CompletionRequest) -> Result<CompletionStream>;
}
