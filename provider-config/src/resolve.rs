//! Per-call configuration resolution.

use std::fmt;
use std::time::Duration;

use http::Uri;
use provider_primitives::{ProviderId, ProviderSpec};
use serde::Deserialize;
use tracing::debug;

use crate::env::EnvSource;
use crate::error::{ConfigError, ConfigResult};

/// Timeout applied to a request when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Non-empty API key. The value never appears in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key, rejecting blank values.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    /// Returns the raw key for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Explicit settings that take precedence over the environment.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    /// API key to use instead of the provider's env var.
    pub api_key: Option<String>,
    /// Base URL to use instead of the env override or default.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(rename = "timeout_secs", deserialize_with = "seconds")]
    pub timeout: Option<Duration>,
}

impl ConfigOverrides {
    /// Sets an explicit API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets an explicit base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn seconds<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
}

/// Settings for a single adapter call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    provider: ProviderId,
    api_key: ApiKey,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl ResolvedConfig {
    /// Provider the configuration was resolved for.
    #[must_use]
    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// API key sent as the bearer credential.
    #[must_use]
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Base URL without a trailing `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validated model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Resolves a configuration from the environment alone.
///
/// `model` falls back to the provider's default model when `None`.
///
/// # Errors
///
/// See [`resolve_config_with`].
pub fn resolve_config<E: EnvSource + ?Sized>(
    spec: &ProviderSpec,
    env: &E,
    model: Option<&str>,
) -> ConfigResult<ResolvedConfig> {
    resolve_config_with(spec, env, model, &ConfigOverrides::default())
}

/// Resolves a configuration, letting `overrides` win over the environment.
///
/// # Errors
///
/// - [`ConfigError::MissingApiKey`] if no non-blank key is found.
/// - [`ConfigError::InvalidBaseUrl`] if the effective base URL is not an
///   `http(s)` URI.
/// - [`ConfigError::UnsupportedModel`] if the model is not listed by `spec`.
pub fn resolve_config_with<E: EnvSource + ?Sized>(
    spec: &ProviderSpec,
    env: &E,
    model: Option<&str>,
    overrides: &ConfigOverrides,
) -> ConfigResult<ResolvedConfig> {
    let api_key = overrides
        .api_key
        .clone()
        .and_then(ApiKey::new)
        .or_else(|| env.var(spec.api_key_env()).and_then(ApiKey::new))
        .ok_or_else(|| ConfigError::MissingApiKey {
            provider: spec.display_name().to_owned(),
            env_var: spec.api_key_env().to_owned(),
        })?;

    let base_url = match overrides
        .base_url
        .clone()
        .or_else(|| env.var(spec.base_url_env()))
        .filter(|url| !url.trim().is_empty())
    {
        Some(url) => sanitize_base_url(&url)?,
        None => spec.default_base_url().to_owned(),
    };

    let model = model.unwrap_or_else(|| spec.default_model());
    if !spec.supports_model(model) {
        return Err(ConfigError::UnsupportedModel {
            provider: spec.display_name().to_owned(),
            model: model.to_owned(),
            supported: spec.model_ids().map(str::to_owned).collect(),
        });
    }

    let timeout = overrides.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);

    debug!(
        provider = %spec.id(),
        %base_url,
        model,
        timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        "resolved provider config"
    );

    Ok(ResolvedConfig {
        provider: spec.id().clone(),
        api_key,
        base_url,
        model: model.to_owned(),
        timeout,
    })
}

fn sanitize_base_url(input: &str) -> ConfigResult<String> {
    let base = input.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: input.to_owned(),
        reason,
    };

    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(invalid("must start with http:// or https://".into()));
    }

    let uri = base
        .parse::<Uri>()
        .map_err(|err| invalid(err.to_string()))?;
    if uri.host().is_none_or(str::is_empty) {
        return Err(invalid("missing host".into()));
    }

    Ok(base.to_owned())
}
