//! Observability utilities for provider hosts.

#![warn(missing_docs, clippy::pedantic)]

pub mod tracing_support;

pub use tracing_support::{LOG_ENV, TelemetryError, TracingConfig, init_tracing};
