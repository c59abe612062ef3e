//! Maestro LLM - Completion Service Boundary
//!
//! This crate provides the completion service used by the orchestrator:
//! - Provider: the `LlmProvider` trait (one-shot and streamed completion)
//! - OpenAI: any OpenAI-compatible chat endpoint via async-openai
//! - Mock: scripted provider for tests
//! - Util: key masking and error sanitisation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod message;
pub mod mock;
pub mod openai;
pub mod provider;
pub mod util;

pub use completion::{CompletionRequest, CompletionResponse, CompletionStream, TokenUsage};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::LlmProvider;
