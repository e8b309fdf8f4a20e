//! Structured tracing helpers.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "PROVIDER_LOG";

/// Failures raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter `{directive}`: {reason}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber was already installed.
    #[error("tracing subscriber already initialised: {reason}")]
    AlreadyInitialised {
        /// Underlying error text.
        reason: String,
    },
}

/// Subscriber settings.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    default_directive: String,
    with_target: bool,
    ansi: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_directive: "warn".to_owned(),
            with_target: false,
            ansi: true,
        }
    }
}

impl TracingConfig {
    /// Directive used when `PROVIDER_LOG` is unset (e.g. `info` or
    /// `provider_adapters=debug`).
    #[must_use]
    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    /// Includes the event target in each line.
    #[must_use]
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Toggles ANSI colouring.
    #[must_use]
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    /// Builds the filter: `PROVIDER_LOG` when set, else the default directive.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidFilter`] if the chosen directive does
    /// not parse.
    pub fn filter(&self) -> Result<EnvFilter, TelemetryError> {
        let directive = std::env::var(LOG_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.default_directive.clone());

        EnvFilter::try_new(&directive).map_err(|err| TelemetryError::InvalidFilter {
            directive,
            reason: err.to_string(),
        })
    }
}

/// Installs a global fmt subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`TelemetryError`] if the filter is invalid or a subscriber is
/// already installed.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter()?)
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| TelemetryError::AlreadyInitialised {
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        let config = TracingConfig::default().with_default_directive("provider_adapters=debug");
        assert!(config.filter().is_ok());
    }

    #[test]
    fn bad_directive_is_reported() {
        let config = TracingConfig::default().with_default_directive("provider_adapters=loud");
        if std::env::var(LOG_ENV).is_err() {
            assert!(matches!(
                config.filter(),
                Err(TelemetryError::InvalidFilter { .. })
            ));
        }
    }

    #[test]
    fn second_init_fails() {
        let config = TracingConfig::default().with_ansi(false);
        let _ = init_tracing(&config);
        let second = init_tracing(&config);
        assert!(matches!(
            second,
            Err(TelemetryError::AlreadyInitialised { .. })
        ));
    }
}
