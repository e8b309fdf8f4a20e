//! Static descriptors shared by every vendor adapter.
//!
//! A [`ProviderSpec`] captures everything that distinguishes one
//! OpenAI-compatible vendor from another: identity, credential variables,
//! default endpoint, and the model allowlist.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod model;
mod spec;

/// Error type and result alias for descriptor validation.
pub use error::{Error, Result};
/// Validated provider identifier.
pub use ids::ProviderId;
/// Model catalog entries.
pub use model::{ModelCapability, ModelInfo};
/// Provider descriptor, its builder, and the config fields it advertises.
pub use spec::{ConfigField, FieldType, ProviderSpec, ProviderSpecBuilder};
