//! Shared adapter traits and data structures.

use std::fmt;

use async_trait::async_trait;
use provider_primitives::ProviderId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result alias used by adapters.
pub type RequestResult<T> = Result<T, RequestError>;

/// Failures raised while issuing a chat request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The provider answered with a non-success HTTP status.
    #[error("provider returned HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, decoded lossily.
        body: String,
    },

    /// DNS, TCP, TLS, or timeout failures.
    #[error("transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// A success response did not carry the expected envelope.
    #[error("malformed provider response: {reason}")]
    MalformedResponse {
        /// What was missing or unparseable.
        reason: String,
    },

    /// The request could not be sent as built.
    #[error("invalid chat request: {reason}")]
    InvalidRequest {
        /// Reason describing why the request was rejected.
        reason: String,
    },
}

impl RequestError {
    /// Convenience constructor for invalid requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for malformed responses.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Stable `snake_case` name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::HttpStatus { .. } => "http_status",
            Self::Transport { .. } => "transport",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::InvalidRequest { .. } => "invalid_request",
        }
    }

    /// HTTP status carried by [`RequestError::HttpStatus`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Identity of an adapter instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterMetadata {
    provider: ProviderId,
    model: String,
}

impl AdapterMetadata {
    /// Creates metadata for the supplied provider and model identifier.
    #[must_use]
    pub fn new(provider: ProviderId, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Returns the provider identifier (e.g. "deepseek").
    #[must_use]
    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Returns the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Roles supported in chat-style prompts.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System messages steer the assistant behaviour.
    System,
    /// User-authored content.
    User,
    /// Assistant (model) responses.
    Assistant,
    /// Tool results fed back to the model.
    Tool,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        })
    }
}

/// A single role/content pair.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PromptMessage {
    role: MessageRole,
    content: String,
}

impl PromptMessage {
    /// Creates a new prompt message.
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Shorthand for a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Returns the message role.
    #[must_use]
    pub const fn role(&self) -> MessageRole {
        self.role
    }

    /// Returns the message content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A function the model may call.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ToolDefinition {
    /// Function name.
    pub name: String,
    /// What the function does.
    pub description: String,
    /// JSON schema of the arguments object.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Creates a tool definition.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Request submitted to a chat adapter.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(try_from = "RawChatRequest")]
pub struct ChatRequest {
    model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system_prompt: Option<String>,
    messages: Vec<PromptMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolDefinition>,
}

#[derive(Deserialize)]
struct RawChatRequest {
    model: String,
    #[serde(default)]
    system_prompt: Option<String>,
    messages: Vec<PromptMessage>,
    #[serde(default)]
    max_tokens: Option<u32>,
    #[serde(default)]
    temperature: Option<f32>,
    #[serde(default)]
    tools: Vec<ToolDefinition>,
}

impl TryFrom<RawChatRequest> for ChatRequest {
    type Error = RequestError;

    fn try_from(raw: RawChatRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            system_prompt: raw.system_prompt,
            max_tokens: raw.max_tokens,
            temperature: raw.temperature,
            tools: raw.tools,
            ..Self::new(raw.model, raw.messages)?
        })
    }
}

impl ChatRequest {
    /// Creates a request from an ordered role/content sequence.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidRequest`] if the model is blank or the
    /// message list is empty.
    pub fn new(model: impl Into<String>, messages: Vec<PromptMessage>) -> RequestResult<Self> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(RequestError::invalid_request("chat request requires a model"));
        }
        if messages.is_empty() {
            return Err(RequestError::invalid_request(
                "chat request requires at least one message",
            ));
        }

        Ok(Self {
            model,
            system_prompt: None,
            messages,
            max_tokens: None,
            temperature: None,
            tools: Vec::new(),
        })
    }

    /// Creates a request carrying a single user prompt.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidRequest`] if the model is blank.
    pub fn from_prompt(model: impl Into<String>, prompt: impl Into<String>) -> RequestResult<Self> {
        Self::new(model, vec![PromptMessage::user(prompt)])
    }

    /// Sets a system prompt, sent ahead of the messages.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the maximum output token budget.
    #[must_use]
    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Declares tools the model may call.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Returns the model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the system prompt if configured.
    #[must_use]
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    /// Returns the prompt messages.
    #[must_use]
    pub fn messages(&self) -> &[PromptMessage] {
        &self.messages
    }

    /// Returns the configured maximum output tokens.
    #[must_use]
    pub const fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    /// Returns the configured sampling temperature.
    #[must_use]
    pub const fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Returns the declared tools.
    #[must_use]
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }
}

/// A function call requested by the model.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ToolCall {
    /// Call identifier assigned by the provider.
    pub id: String,
    /// Call type, normally `function`.
    pub kind: String,
    /// Function name.
    pub name: String,
    /// Decoded arguments; `{}` when the provider sent unparseable JSON.
    pub arguments: Value,
}

/// Token accounting reported by the provider.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Usage {
    /// Tokens consumed by the prompt.
    #[serde(default)]
    pub prompt_tokens: Option<u32>,
    /// Tokens generated.
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    /// Sum of both.
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

/// Normalised response from a chat adapter.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChatResponse {
    /// Provider-assigned response id, empty if none was sent.
    pub id: String,
    /// Model that produced the response.
    pub model: String,
    /// Role of the generated message.
    pub role: MessageRole,
    /// Generated text.
    pub text: String,
    /// Function calls requested by the model.
    pub tool_calls: Vec<ToolCall>,
    /// Token accounting, when reported.
    pub usage: Option<Usage>,
    /// Full vendor payload kept for diagnostics.
    pub raw: Value,
}

/// Trait implemented by chat adapters.
#[async_trait]
pub trait ChatAdapter: Send + Sync {
    /// Returns basic metadata describing the adapter instance.
    fn metadata(&self) -> &AdapterMetadata;

    /// Issues one request and waits for the complete response.
    async fn send(&self, request: &ChatRequest) -> RequestResult<ChatResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_request_messages() {
        let err = ChatRequest::new("deepseek-chat", Vec::new()).expect_err("messages required");
        assert!(matches!(err, RequestError::InvalidRequest { .. }));
    }

    #[test]
    fn validates_request_model() {
        let err = ChatRequest::from_prompt(" ", "hi").expect_err("model required");
        assert!(matches!(err, RequestError::InvalidRequest { .. }));
    }

    #[test]
    fn deserialized_requests_are_validated() {
        let err = serde_json::from_str::<ChatRequest>(r#"{"model":"deepseek-chat","messages":[]}"#)
            .expect_err("messages required");
        assert!(err.to_string().contains("at least one message"));

        let request: ChatRequest = serde_json::from_str(
            r#"{"model":"deepseek-chat","system_prompt":"be brief",
                "messages":[{"role":"user","content":"hi"}],"max_tokens":32}"#,
        )
        .expect("valid request");
        assert_eq!(request.messages(), [PromptMessage::user("hi")]);
        assert_eq!(request.system_prompt(), Some("be brief"));
        assert_eq!(request.max_tokens(), Some(32));
    }

    #[test]
    fn builds_request() {
        let request = ChatRequest::from_prompt("qwen2.5-7b-instruct", "ping")
            .unwrap()
            .with_system_prompt("be brief")
            .with_max_tokens(256)
            .with_temperature(0.7);

        assert_eq!(request.model(), "qwen2.5-7b-instruct");
        assert_eq!(request.messages(), [PromptMessage::user("ping")]);
        assert_eq!(request.system_prompt(), Some("be brief"));
        assert_eq!(request.max_tokens(), Some(256));
        assert_eq!(request.temperature(), Some(0.7));
        assert!(request.tools().is_empty());
    }

    #[test]
    fn error_kinds_are_stable() {
        let err = RequestError::HttpStatus {
            status: 401,
            body: "unauthorized".into(),
        };
        assert_eq!(err.kind(), "http_status");
        assert_eq!(err.status(), Some(401));
        assert_eq!(RequestError::transport("dns").kind(), "transport");
        assert_eq!(RequestError::transport("dns").status(), None);
    }
}
