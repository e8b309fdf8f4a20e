//! Generic adapter for OpenAI-compatible `chat/completions` endpoints.
//!
//! Every built-in vendor speaks the same wire shape; only the
//! [`ResolvedConfig`] differs between them.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use hyper::body::{Bytes, to_bytes};
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Request, StatusCode, Uri};
use provider_config::{ApiKey, ResolvedConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::http_client::{HyperClient, build_https_client};
use crate::traits::{
    AdapterMetadata, ChatAdapter, ChatRequest, ChatResponse, MessageRole, RequestError,
    RequestResult, ToolCall, ToolDefinition, Usage,
};

const COMPLETIONS_PATH: &str = "chat/completions";

/// Adapter bound to one provider configuration.
pub struct ChatCompletionsAdapter {
    client: HyperClient,
    endpoint: Uri,
    metadata: AdapterMetadata,
    api_key: ApiKey,
    timeout: Duration,
}

impl fmt::Debug for ChatCompletionsAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionsAdapter")
            .field("provider", self.metadata.provider())
            .field("model", &self.metadata.model())
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ChatCompletionsAdapter {
    /// Constructs an adapter for the resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidRequest`] if the endpoint derived from the
    /// base URL is not a valid URI.
    pub fn new(config: &ResolvedConfig) -> RequestResult<Self> {
        let endpoint = format!("{}/{COMPLETIONS_PATH}", config.base_url())
            .parse::<Uri>()
            .map_err(|err| {
                RequestError::invalid_request(format!(
                    "invalid {} endpoint: {err}",
                    config.provider()
                ))
            })?;

        Ok(Self {
            client: build_https_client(config.timeout()),
            endpoint,
            metadata: AdapterMetadata::new(config.provider().clone(), config.model()),
            api_key: config.api_key().clone(),
            timeout: config.timeout(),
        })
    }

    /// Endpoint every request is posted to.
    #[must_use]
    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    async fn exchange(&self, request: Request<Body>) -> RequestResult<(StatusCode, Bytes)> {
        let provider = self.metadata.provider();
        let response = self.client.request(request).await.map_err(|err| {
            RequestError::transport(format!("{provider} request failed: {err}"))
        })?;

        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.map_err(|err| {
            RequestError::transport(format!("failed to read {provider} response: {err}"))
        })?;

        Ok((status, bytes))
    }
}

#[async_trait]
impl ChatAdapter for ChatCompletionsAdapter {
    fn metadata(&self) -> &AdapterMetadata {
        &self.metadata
    }

    async fn send(&self, request: &ChatRequest) -> RequestResult<ChatResponse> {
        let provider = self.metadata.provider();
        if request.model() != self.metadata.model() {
            return Err(RequestError::invalid_request(format!(
                "request model `{}` does not match configured model `{}`",
                request.model(),
                self.metadata.model()
            )));
        }
        if request.messages().is_empty() {
            return Err(RequestError::invalid_request(
                "chat request requires at least one message",
            ));
        }

        let payload = build_payload(request);
        let body = serde_json::to_vec(&payload).map_err(|err| {
            RequestError::invalid_request(format!("failed to encode {provider} request: {err}"))
        })?;

        let http_request = Request::post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key.expose()))
            .body(Body::from(body))
            .map_err(|err| {
                RequestError::transport(format!("failed to build {provider} request: {err}"))
            })?;

        debug!(
            %provider,
            model = self.metadata.model(),
            endpoint = %self.endpoint,
            messages = payload.messages.len(),
            tools = payload.tools.len(),
            "sending chat completion"
        );

        let (status, bytes) = timeout(self.timeout, self.exchange(http_request))
            .await
            .map_err(|_| {
                RequestError::transport(format!(
                    "{provider} request timed out after {}s",
                    self.timeout.as_secs_f32()
                ))
            })??;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!(%provider, status = status.as_u16(), "chat completion rejected");
            return Err(RequestError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let response = parse_response(&bytes, self.metadata.model())?;
        if response.text.is_empty() && response.tool_calls.is_empty() {
            warn!(%provider, model = %response.model, "empty completion content");
        }

        Ok(response)
    }
}

/// Sends one request with a throwaway adapter built from `config`.
///
/// # Errors
///
/// Propagates every [`RequestError`] produced by [`ChatCompletionsAdapter`].
pub async fn send(config: &ResolvedConfig, request: &ChatRequest) -> RequestResult<ChatResponse> {
    ChatCompletionsAdapter::new(config)?.send(request).await
}

#[derive(Debug, Serialize)]
struct CompletionPayload<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: MessageRole,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: &'a ToolDefinition,
}

fn build_payload(request: &ChatRequest) -> CompletionPayload<'_> {
    let system = request
        .system_prompt()
        .filter(|prompt| !prompt.trim().is_empty())
        .map(|content| WireMessage {
            role: MessageRole::System,
            content,
        });

    let messages = system
        .into_iter()
        .chain(request.messages().iter().map(|message| WireMessage {
            role: message.role(),
            content: message.content(),
        }))
        .collect();

    let tools = request
        .tools()
        .iter()
        .map(|function| WireTool {
            kind: "function",
            function,
        })
        .collect();

    CompletionPayload {
        model: request.model(),
        messages,
        temperature: request.temperature(),
        max_tokens: request.max_tokens(),
        tools,
        stream: false,
    }
}

#[derive(Debug, Deserialize)]
struct CompletionEnvelope {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Option<Vec<CompletionChoice>>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    role: Option<MessageRole>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    function: WireFunctionCall,
}

#[derive(Debug, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    arguments: Value,
}

impl From<WireToolCall> for ToolCall {
    fn from(call: WireToolCall) -> Self {
        let arguments = match call.function.arguments {
            Value::String(encoded) => serde_json::from_str::<Value>(&encoded)
                .ok()
                .filter(Value::is_object)
                .unwrap_or_else(empty_object),
            object @ Value::Object(_) => object,
            _ => empty_object(),
        };

        Self {
            id: call.id.unwrap_or_default(),
            kind: call.kind.unwrap_or_else(|| "function".to_owned()),
            name: call.function.name,
            arguments,
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn parse_response(bytes: &[u8], requested_model: &str) -> RequestResult<ChatResponse> {
    let raw: Value = serde_json::from_slice(bytes)
        .map_err(|err| RequestError::malformed(format!("response is not JSON: {err}")))?;
    let envelope = CompletionEnvelope::deserialize(&raw)
        .map_err(|err| RequestError::malformed(format!("unexpected response shape: {err}")))?;

    let message = envelope
        .choices
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| RequestError::malformed("response contained no choices"))?
        .message
        .ok_or_else(|| RequestError::malformed("choices[0].message is missing"))?;

    let tool_calls: Vec<ToolCall> = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(ToolCall::from)
        .collect();
    let text = match message.content {
        Some(content) => content,
        None if !tool_calls.is_empty() => String::new(),
        None => {
            return Err(RequestError::malformed(
                "choices[0].message.content is missing",
            ));
        }
    };

    Ok(ChatResponse {
        id: envelope.id.unwrap_or_default(),
        model: envelope
            .model
            .unwrap_or_else(|| requested_model.to_owned()),
        role: message.role.unwrap_or(MessageRole::Assistant),
        text,
        tool_calls,
        usage: envelope.usage,
        raw,
    })
}
