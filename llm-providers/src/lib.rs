//! Vendor LLM provider SDK facade.
//!
//! Bundles the provider crates behind feature flags so hosts can pull in only
//! descriptors, only configuration, or the full adapter stack.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export provider descriptors for convenience.
pub use provider_primitives as primitives;

/// Credential and endpoint resolution (enabled by `config` feature).
#[cfg(feature = "config")]
pub use provider_config as config;

/// Chat adapters, vendor catalog, and registry (enabled by `adapters` feature).
#[cfg(feature = "adapters")]
pub use provider_adapters as adapters;

/// Tracing setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use provider_telemetry as telemetry;
