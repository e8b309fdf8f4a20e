//! Immutable provider registration table.
//!
//! Built once at host startup and passed by reference; nothing mutates it
//! afterwards.

use std::collections::HashMap;

use provider_primitives::ProviderSpec;
use thiserror::Error;

use crate::vendors;

/// Failures raised while building or querying a [`ProviderRegistry`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No provider is registered under the requested name.
    #[error("unknown provider `{name}` (available: {})", .available.join(", "))]
    UnknownProvider {
        /// Name that was looked up.
        name: String,
        /// Registered provider ids.
        available: Vec<String>,
    },

    /// Two specs share the same provider id.
    #[error("provider `{id}` registered twice")]
    DuplicateProvider {
        /// The repeated id.
        id: String,
    },

    /// Two specs read their API key from the same variable.
    #[error("providers `{first}` and `{second}` both read {env_var}")]
    DuplicateCredentialEnv {
        /// The shared variable.
        env_var: String,
        /// Provider registered first.
        first: String,
        /// Provider registered second.
        second: String,
    },
}

impl RegistryError {
    /// Stable `snake_case` name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownProvider { .. } => "unknown_provider",
            Self::DuplicateProvider { .. } => "duplicate_provider",
            Self::DuplicateCredentialEnv { .. } => "duplicate_credential_env",
        }
    }
}

/// Provider specs keyed by id, iterated in registration order.
#[derive(Clone, Debug)]
pub struct ProviderRegistry {
    specs: Vec<ProviderSpec>,
    index: HashMap<String, usize>,
}

impl ProviderRegistry {
    /// Builds a registry from `specs`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateProvider`] or
    /// [`RegistryError::DuplicateCredentialEnv`] when ids or API key variables
    /// are not unique.
    pub fn new(specs: impl IntoIterator<Item = ProviderSpec>) -> Result<Self, RegistryError> {
        let specs: Vec<ProviderSpec> = specs.into_iter().collect();
        let mut index = HashMap::with_capacity(specs.len());
        {
            let mut credentials: HashMap<&str, &str> = HashMap::with_capacity(specs.len());
            for (position, spec) in specs.iter().enumerate() {
                let id = spec.id().as_str();
                if index.insert(id.to_owned(), position).is_some() {
                    return Err(RegistryError::DuplicateProvider { id: id.to_owned() });
                }
                if let Some(first) = credentials.insert(spec.api_key_env(), id) {
                    return Err(RegistryError::DuplicateCredentialEnv {
                        env_var: spec.api_key_env().to_owned(),
                        first: first.to_owned(),
                        second: id.to_owned(),
                    });
                }
            }
        }

        Ok(Self { specs, index })
    }

    /// Registry holding the built-in vendors.
    ///
    /// # Panics
    ///
    /// Never in practice: the built-in catalog has unique ids and variables.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vendors::builtin_specs()).expect("built-in providers are unique")
    }

    /// Returns the spec registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProviderSpec> {
        self.index.get(name).map(|&position| &self.specs[position])
    }

    /// Like [`get`](Self::get), but reports unknown names as an error.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownProvider`] listing the registered ids.
    pub fn lookup(&self, name: &str) -> Result<&ProviderSpec, RegistryError> {
        self.get(name).ok_or_else(|| RegistryError::UnknownProvider {
            name: name.to_owned(),
            available: self.ids().map(str::to_owned).collect(),
        })
    }

    /// Display name registered for `name`.
    #[must_use]
    pub fn display_name(&self, name: &str) -> Option<&str> {
        self.get(name).map(ProviderSpec::display_name)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.id().as_str())
    }

    /// Registered specs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderSpec> {
        self.specs.iter()
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
