//! Chat adapters for OpenAI-compatible vendors.
//!
//! A single [`ChatCompletionsAdapter`](chat_completions::ChatCompletionsAdapter)
//! serves every vendor; the [`vendors`] module supplies the built-in
//! descriptors and [`registry`] the table a host selects from.

#![warn(missing_docs, clippy::pedantic)]

pub mod chat_completions;
pub mod invoke;
pub mod registry;
pub mod traits;
pub mod vendors;

mod http_client;

pub use chat_completions::{ChatCompletionsAdapter, send};
pub use invoke::{Invocation, ProviderError, run};
pub use registry::{ProviderRegistry, RegistryError};
pub use traits::{
    AdapterMetadata, ChatAdapter, ChatRequest, ChatResponse, MessageRole, PromptMessage,
    RequestError, RequestResult, ToolCall, ToolDefinition, Usage,
};
