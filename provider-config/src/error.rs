//! Configuration errors.

use thiserror::Error;

/// Result alias for configuration resolution.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures raised while resolving a provider configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No API key was supplied explicitly or through the environment.
    #[error("{provider} API key not found; set {env_var}")]
    MissingApiKey {
        /// Provider display name.
        provider: String,
        /// Environment variable that should carry the key.
        env_var: String,
    },

    /// The requested model is not in the provider allowlist.
    #[error("model `{model}` is not supported by {provider} (supported: {})", .supported.join(", "))]
    UnsupportedModel {
        /// Provider display name.
        provider: String,
        /// Model that was requested.
        model: String,
        /// Models the provider accepts.
        supported: Vec<String>,
    },

    /// The configured base URL could not be used.
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl {
        /// The offending URL.
        url: String,
        /// Human-readable reason.
        reason: String,
    },
}

impl ConfigError {
    /// Stable `snake_case` name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "missing_api_key",
            Self::UnsupportedModel { .. } => "unsupported_model",
            Self::InvalidBaseUrl { .. } => "invalid_base_url",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_model_lists_alternatives() {
        let err = ConfigError::UnsupportedModel {
            provider: "Qwen".into(),
            model: "qwen-max".into(),
            supported: vec!["qwen2.5-7b-instruct".into(), "qwen2.5-3b-instruct".into()],
        };
        assert_eq!(
            err.to_string(),
            "model `qwen-max` is not supported by Qwen \
             (supported: qwen2.5-7b-instruct, qwen2.5-3b-instruct)"
        );
        assert_eq!(err.kind(), "unsupported_model");
    }

    #[test]
    fn missing_key_names_the_variable() {
        let err = ConfigError::MissingApiKey {
            provider: "DeepSeek".into(),
            env_var: "DEEPSEEK_API_KEY".into(),
        };
        assert_eq!(
            err.to_string(),
            "DeepSeek API key not found; set DEEPSEEK_API_KEY"
        );
    }
}
