//! Host-facing entry point: provider name + prompt in, normalised response out.

use provider_config::{ConfigError, ConfigOverrides, EnvSource, resolve_config_with};
use thiserror::Error;
use tracing::info;

use crate::chat_completions::ChatCompletionsAdapter;
use crate::registry::{ProviderRegistry, RegistryError};
use crate::traits::{
    ChatAdapter, ChatRequest, ChatResponse, PromptMessage, RequestError, ToolDefinition,
};

/// Any failure a host can see from [`run`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Provider selection failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Credential, endpoint, or model resolution failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The request itself failed.
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl ProviderError {
    /// Stable `snake_case` name of the underlying error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Registry(err) => err.kind(),
            Self::Config(err) => err.kind(),
            Self::Request(err) => err.kind(),
        }
    }
}

/// One host request against a named provider.
#[derive(Clone, Debug)]
pub struct Invocation {
    provider: String,
    model: Option<String>,
    messages: Vec<PromptMessage>,
    system_prompt: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    tools: Vec<ToolDefinition>,
    overrides: ConfigOverrides,
}

impl Invocation {
    /// Invocation carrying an ordered role/content sequence.
    #[must_use]
    pub fn new(provider: impl Into<String>, messages: Vec<PromptMessage>) -> Self {
        Self {
            provider: provider.into(),
            model: None,
            messages,
            system_prompt: None,
            temperature: None,
            max_tokens: None,
            tools: Vec::new(),
            overrides: ConfigOverrides::default(),
        }
    }

    /// Invocation carrying a single user prompt.
    #[must_use]
    pub fn prompt(provider: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(provider, vec![PromptMessage::user(prompt)])
    }

    /// Selects a model; the provider default is used otherwise.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets a system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the output token budget.
    #[must_use]
    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    /// Declares tools the model may call.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Supplies explicit configuration that wins over the environment.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Selected provider name.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }
}

/// Looks up the provider, resolves its configuration, and sends one request.
///
/// # Errors
///
/// Returns the first failure from lookup, resolution, or the request; no
/// partial response accompanies an error.
pub async fn run<E: EnvSource + ?Sized>(
    registry: &ProviderRegistry,
    env: &E,
    invocation: Invocation,
) -> Result<ChatResponse, ProviderError> {
    let spec = registry.lookup(&invocation.provider)?;
    let config = resolve_config_with(
        spec,
        env,
        invocation.model.as_deref(),
        &invocation.overrides,
    )?;

    let mut request = ChatRequest::new(config.model(), invocation.messages)?
        .with_tools(invocation.tools);
    if let Some(prompt) = invocation.system_prompt {
        request = request.with_system_prompt(prompt);
    }
    if let Some(temperature) = invocation.temperature {
        request = request.with_temperature(temperature);
    }
    if let Some(tokens) = invocation.max_tokens {
        request = request.with_max_tokens(tokens);
    }

    let adapter = ChatCompletionsAdapter::new(&config)?;
    let response = adapter.send(&request).await?;

    info!(
        provider = %spec.id(),
        model = %response.model,
        tool_calls = response.tool_calls.len(),
        total_tokens = response.usage.and_then(|usage| usage.total_tokens),
        "chat completion finished"
    );

    Ok(response)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[tokio::test]
    async fn unknown_provider_fails_before_config() {
        let err = run(
            &ProviderRegistry::builtin(),
            &HashMap::new(),
            Invocation::prompt("openai", "hi"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), "unknown_provider");
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        let err = run(
            &ProviderRegistry::builtin(),
            &HashMap::new(),
            Invocation::prompt("qwen", "hi"),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Config(ConfigError::MissingApiKey { .. })
        ));
        assert_eq!(err.kind(), "missing_api_key");
    }

    #[tokio::test]
    async fn empty_messages_are_rejected() {
        let env = HashMap::from([("DOUBAO_API_KEY".to_owned(), "ark-key".to_owned())]);
        let err = run(
            &ProviderRegistry::builtin(),
            &env,
            Invocation::new("doubao", Vec::new()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), "invalid_request");
    }
}
