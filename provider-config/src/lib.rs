//! Configuration resolution for provider adapters.
//!
//! Turns a static [`ProviderSpec`](provider_primitives::ProviderSpec) plus an
//! environment into a [`ResolvedConfig`] for a single call.

#![warn(missing_docs, clippy::pedantic)]

mod env;
mod error;
mod resolve;

pub use env::{EnvSource, ProcessEnv};
pub use error::{ConfigError, ConfigResult};
pub use resolve::{
    ApiKey, ConfigOverrides, DEFAULT_REQUEST_TIMEOUT, ResolvedConfig, resolve_config,
    resolve_config_with,
};
