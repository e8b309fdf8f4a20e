//! Static provider descriptors.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{ModelCapability, ModelInfo, ProviderId};

/// Immutable description of an OpenAI-compatible vendor.
///
/// One instance exists per vendor. Every spec carries at least one model and
/// its default model is always a member of that list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProviderSpec")]
pub struct ProviderSpec {
    id: ProviderId,
    display_name: String,
    default_base_url: String,
    api_key_env: String,
    base_url_env: String,
    default_model: String,
    models: Vec<ModelInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    capabilities: Vec<ModelCapability>,
}

/// Wire shape of a [`ProviderSpec`]; deserialized specs go through the builder.
#[derive(Deserialize)]
struct RawProviderSpec {
    id: ProviderId,
    display_name: String,
    default_base_url: String,
    api_key_env: String,
    base_url_env: String,
    #[serde(default)]
    default_model: Option<String>,
    models: Vec<ModelInfo>,
    #[serde(default)]
    capabilities: Vec<ModelCapability>,
}

impl TryFrom<RawProviderSpec> for ProviderSpec {
    type Error = Error;

    fn try_from(raw: RawProviderSpec) -> Result<Self> {
        let mut builder = ProviderSpec::builder(raw.id)
            .display_name(raw.display_name)?
            .default_base_url(raw.default_base_url)?
            .api_key_env(raw.api_key_env)?
            .base_url_env(raw.base_url_env)?
            .capabilities(raw.capabilities);
        if let Some(model) = raw.default_model {
            builder = builder.default_model(model);
        }
        raw.models
            .into_iter()
            .fold(builder, ProviderSpecBuilder::add_model)
            .build()
    }
}

impl ProviderSpec {
    /// Starts building a [`ProviderSpec`].
    #[must_use]
    pub fn builder(id: ProviderId) -> ProviderSpecBuilder {
        ProviderSpecBuilder {
            id,
            display_name: None,
            default_base_url: None,
            api_key_env: None,
            base_url_env: None,
            default_model: None,
            models: Vec::new(),
            capabilities: Vec::new(),
        }
    }

    /// Provider identifier used for selection.
    #[must_use]
    pub fn id(&self) -> &ProviderId {
        &self.id
    }

    /// Human-readable vendor name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Base URL used when no override is configured. Never ends with `/`.
    #[must_use]
    pub fn default_base_url(&self) -> &str {
        &self.default_base_url
    }

    /// Environment variable holding the API key.
    #[must_use]
    pub fn api_key_env(&self) -> &str {
        &self.api_key_env
    }

    /// Environment variable that overrides the base URL.
    #[must_use]
    pub fn base_url_env(&self) -> &str {
        &self.base_url_env
    }

    /// Model used when the caller does not request one.
    #[must_use]
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Supported models in catalog order.
    #[must_use]
    pub fn models(&self) -> &[ModelInfo] {
        &self.models
    }

    /// Supported model identifiers in catalog order.
    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(ModelInfo::id)
    }

    /// Looks up a model by exact, case-sensitive identifier.
    #[must_use]
    pub fn model(&self, id: &str) -> Option<&ModelInfo> {
        self.models.iter().find(|model| model.id() == id)
    }

    /// Returns `true` if `id` is in the allowlist. No normalisation is applied.
    #[must_use]
    pub fn supports_model(&self, id: &str) -> bool {
        self.model(id).is_some()
    }

    /// Provider-level capabilities.
    #[must_use]
    pub fn capabilities(&self) -> &[ModelCapability] {
        &self.capabilities
    }

    /// Settings a host should collect to configure this provider.
    #[must_use]
    pub fn config_fields(&self) -> Vec<ConfigField> {
        vec![
            ConfigField {
                id: "api_key".into(),
                field_type: FieldType::Secret,
                prompt: format!("{} API key", self.display_name),
                display_name: "API Key".into(),
                env_var: Some(self.api_key_env.clone()),
                default: None,
                required: true,
            },
            ConfigField {
                id: "base_url".into(),
                field_type: FieldType::Text,
                prompt: format!("{} API base URL", self.display_name),
                display_name: "Base URL".into(),
                env_var: Some(self.base_url_env.clone()),
                default: Some(self.default_base_url.clone()),
                required: false,
            },
        ]
    }
}

/// Kind of value a [`ConfigField`] holds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Sensitive value that must not be echoed.
    Secret,
    /// Plain text value.
    Text,
}

/// A configuration setting a provider exposes to the host.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConfigField {
    /// Stable key for the setting.
    pub id: String,
    /// Value kind.
    pub field_type: FieldType,
    /// Prompt text shown when asking for the value.
    pub prompt: String,
    /// Short label.
    pub display_name: String,
    /// Environment variable the value is read from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_var: Option<String>,
    /// Value used when nothing is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Whether resolution fails without a value.
    pub required: bool,
}

/// Builder for [`ProviderSpec`].
#[derive(Debug)]
pub struct ProviderSpecBuilder {
    id: ProviderId,
    display_name: Option<String>,
    default_base_url: Option<String>,
    api_key_env: Option<String>,
    base_url_env: Option<String>,
    default_model: Option<String>,
    models: Vec<ModelInfo>,
    capabilities: Vec<ModelCapability>,
}

impl ProviderSpecBuilder {
    /// Sets the human-readable vendor name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] when the name is blank.
    pub fn display_name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_spec("display name cannot be empty"));
        }
        self.display_name = Some(name);
        Ok(self)
    }

    /// Sets the default base URL. A trailing `/` is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] unless the URL starts with `http://` or
    /// `https://`.
    pub fn default_base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref().trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::invalid_spec(format!(
                "default base URL `{url}` must start with http:// or https://"
            )));
        }
        self.default_base_url = Some(url.trim_end_matches('/').to_owned());
        Ok(self)
    }

    /// Sets the environment variable holding the API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] when the name is blank.
    pub fn api_key_env(mut self, name: impl Into<String>) -> Result<Self> {
        self.api_key_env = Some(env_name(name.into(), "API key")?);
        Ok(self)
    }

    /// Sets the environment variable overriding the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] when the name is blank.
    pub fn base_url_env(mut self, name: impl Into<String>) -> Result<Self> {
        self.base_url_env = Some(env_name(name.into(), "base URL")?);
        Ok(self)
    }

    /// Sets the model used when callers do not pick one. Defaults to the first
    /// registered model.
    #[must_use]
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Appends a model to the catalog.
    #[must_use]
    pub fn add_model(mut self, model: ModelInfo) -> Self {
        self.models.push(model);
        self
    }

    /// Replaces the provider-level capability set.
    #[must_use]
    pub fn capabilities(mut self, capabilities: Vec<ModelCapability>) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Consumes the builder and returns the spec.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] if a mandatory field is missing, the model
    /// list is empty or contains duplicates, or the default model is not listed.
    pub fn build(self) -> Result<ProviderSpec> {
        let display_name = self
            .display_name
            .ok_or_else(|| Error::invalid_spec("display name must be provided"))?;
        let default_base_url = self
            .default_base_url
            .ok_or_else(|| Error::invalid_spec("default base URL must be provided"))?;
        let api_key_env = self
            .api_key_env
            .ok_or_else(|| Error::invalid_spec("API key env var must be provided"))?;
        let base_url_env = self
            .base_url_env
            .ok_or_else(|| Error::invalid_spec("base URL env var must be provided"))?;

        if self.models.is_empty() {
            return Err(Error::invalid_spec(format!(
                "provider `{}` must list at least one model",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for model in &self.models {
            if !seen.insert(model.id()) {
                return Err(Error::invalid_spec(format!(
                    "model `{}` listed twice",
                    model.id()
                )));
            }
        }

        let default_model = match self.default_model {
            Some(model) if seen.contains(model.as_str()) => model,
            Some(model) => {
                return Err(Error::invalid_spec(format!(
                    "default model `{model}` is not in the model list"
                )));
            }
            None => self.models[0].id().to_owned(),
        };

        Ok(ProviderSpec {
            id: self.id,
            display_name,
            default_base_url,
            api_key_env,
            base_url_env,
            default_model,
            models: self.models,
            capabilities: self.capabilities,
        })
    }
}

fn env_name(name: String, what: &str) -> Result<String> {
    if name.trim().is_empty() {
        return Err(Error::invalid_spec(format!("{what} env var cannot be empty")));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ProviderSpecBuilder {
        ProviderSpec::builder(ProviderId::new("acme").expect("id"))
            .display_name("Acme")
            .and_then(|b| b.default_base_url("https://api.acme.test/v1/"))
            .and_then(|b| b.api_key_env("ACME_API_KEY"))
            .and_then(|b| b.base_url_env("ACME_BASE_URL"))
            .expect("builder")
    }

    #[test]
    fn builds_spec_with_first_model_as_default() {
        let spec = builder()
            .add_model(ModelInfo::new("acme-large", "Acme Large"))
            .add_model(ModelInfo::new("acme-small", "Acme Small"))
            .build()
            .expect("spec");

        assert_eq!(spec.default_model(), "acme-large");
        assert_eq!(spec.default_base_url(), "https://api.acme.test/v1");
        assert_eq!(
            spec.model_ids().collect::<Vec<_>>(),
            ["acme-large", "acme-small"]
        );
    }

    #[test]
    fn model_lookup_is_exact() {
        let spec = builder()
            .add_model(ModelInfo::new("acme-large", "Acme Large"))
            .build()
            .expect("spec");

        assert!(spec.supports_model("acme-large"));
        assert!(!spec.supports_model("Acme-Large"));
        assert!(!spec.supports_model("acme-large "));
        assert!(!spec.supports_model("acme"));
    }

    #[test]
    fn empty_model_list_is_rejected() {
        let err = builder().build().expect_err("models required");
        assert!(matches!(err, Error::InvalidSpec { .. }));
    }

    #[test]
    fn duplicate_models_are_rejected() {
        let err = builder()
            .add_model(ModelInfo::new("acme-large", "Acme Large"))
            .add_model(ModelInfo::new("acme-large", "Acme Large again"))
            .build()
            .expect_err("duplicate");
        assert!(matches!(err, Error::InvalidSpec { .. }));
    }

    #[test]
    fn default_model_must_be_listed() {
        let err = builder()
            .add_model(ModelInfo::new("acme-large", "Acme Large"))
            .default_model("acme-huge")
            .build()
            .expect_err("unlisted default");
        assert!(matches!(err, Error::InvalidSpec { .. }));
    }

    #[test]
    fn base_url_requires_scheme() {
        let err = ProviderSpec::builder(ProviderId::new("acme").expect("id"))
            .default_base_url("api.acme.test")
            .expect_err("scheme required");
        assert!(matches!(err, Error::InvalidSpec { .. }));
    }

    #[test]
    fn deserialization_round_trips_valid_spec() {
        let spec = builder()
            .add_model(ModelInfo::new("acme-large", "Acme Large"))
            .add_model(ModelInfo::new("acme-small", "Acme Small"))
            .default_model("acme-small")
            .build()
            .expect("spec");

        let json = serde_json::to_string(&spec).expect("json");
        let decoded: ProviderSpec = serde_json::from_str(&json).expect("decode");
        assert_eq!(decoded, spec);
    }

    #[test]
    fn deserialization_enforces_invariants() {
        let spec = |base_url: &str, default_model: &str, models: &str| {
            format!(
                r#"{{"id":"acme","display_name":"Acme","default_base_url":"{base_url}",
                    "api_key_env":"ACME_API_KEY","base_url_env":"ACME_BASE_URL",
                    "default_model":"{default_model}","models":{models}}}"#
            )
        };
        let one_model = r#"[{"id":"acme-large","display_name":"Acme Large",
            "context_window":128000,"max_output_tokens":4096}]"#;

        let decoded: ProviderSpec =
            serde_json::from_str(&spec("https://api.acme.test/v1/", "acme-large", one_model))
                .expect("valid spec");
        assert_eq!(decoded.default_base_url(), "https://api.acme.test/v1");

        for invalid in [
            spec("https://api.acme.test/v1", "acme-large", "[]"),
            spec("https://api.acme.test/v1", "nope", one_model),
            spec("ftp://api.acme.test", "acme-large", one_model),
        ] {
            let err = serde_json::from_str::<ProviderSpec>(&invalid).expect_err("invalid spec");
            assert!(err.to_string().contains("invalid provider spec"), "{err}");
        }

        let blank_env = spec("https://api.acme.test/v1", "acme-large", one_model)
            .replace("ACME_API_KEY", " ");
        assert!(serde_json::from_str::<ProviderSpec>(&blank_env).is_err());
    }

    #[test]
    fn config_fields_describe_key_and_base_url() {
        let spec = builder()
            .add_model(ModelInfo::new("acme-large", "Acme Large"))
            .build()
            .expect("spec");

        let fields = spec.config_fields();
        assert_eq!(fields.len(), 2);

        let key = &fields[0];
        assert_eq!(key.field_type, FieldType::Secret);
        assert!(key.required);
        assert_eq!(key.env_var.as_deref(), Some("ACME_API_KEY"));
        assert_eq!(key.prompt, "Acme API key");

        let base = &fields[1];
        assert!(!base.required);
        assert_eq!(base.default.as_deref(), Some("https://api.acme.test/v1"));
        assert_eq!(base.env_var.as_deref(), Some("ACME_BASE_URL"));
    }
}
