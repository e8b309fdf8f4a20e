//! Model catalog entries advertised by a provider.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Feature a model (or a provider as a whole) supports.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelCapability {
    /// Multi-turn chat.
    Chat,
    /// Single-shot text completion.
    Completion,
    /// Function/tool calling.
    ToolCalls,
    /// Code-tuned generation.
    Code,
    /// Image understanding.
    Vision,
}

impl fmt::Display for ModelCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Chat => "chat",
            Self::Completion => "completion",
            Self::ToolCalls => "tool_calls",
            Self::Code => "code",
            Self::Vision => "vision",
        })
    }
}

/// Describes a single model a provider accepts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    id: String,
    display_name: String,
    context_window: u32,
    max_output_tokens: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    capabilities: Vec<ModelCapability>,
}

impl ModelInfo {
    /// Default context window applied when a catalog entry does not set one.
    pub const DEFAULT_CONTEXT_WINDOW: u32 = 128_000;
    /// Default output budget applied when a catalog entry does not set one.
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

    /// Creates a chat-capable model entry with default limits.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            context_window: Self::DEFAULT_CONTEXT_WINDOW,
            max_output_tokens: Self::DEFAULT_MAX_OUTPUT_TOKENS,
            capabilities: vec![ModelCapability::Chat],
        }
    }

    /// Sets the context window in tokens.
    #[must_use]
    pub fn with_context_window(mut self, tokens: u32) -> Self {
        self.context_window = tokens;
        self
    }

    /// Sets the maximum number of output tokens.
    #[must_use]
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    /// Replaces the capability list. Duplicates are dropped, order is kept.
    #[must_use]
    pub fn with_capabilities(
        mut self,
        capabilities: impl IntoIterator<Item = ModelCapability>,
    ) -> Self {
        self.capabilities.clear();
        for capability in capabilities {
            if !self.capabilities.contains(&capability) {
                self.capabilities.push(capability);
            }
        }
        self
    }

    /// Vendor model identifier sent on the wire.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-friendly model name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Context window in tokens.
    #[must_use]
    pub const fn context_window(&self) -> u32 {
        self.context_window
    }

    /// Maximum output tokens.
    #[must_use]
    pub const fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    /// Capabilities the model advertises.
    #[must_use]
    pub fn capabilities(&self) -> &[ModelCapability] {
        &self.capabilities
    }

    /// Returns `true` if the model advertises `capability`.
    #[must_use]
    pub fn supports(&self, capability: ModelCapability) -> bool {
        self.capabilities.contains(&capability)
    }
}
