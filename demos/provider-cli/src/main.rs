//! Demo host for the provider adapters.
//!
//! ```text
//! provider list
//! provider models qwen
//! provider info doubao
//! provider run --provider deepseek "Explain quantum computing"
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use llm_providers::adapters::{Invocation, ProviderError, ProviderRegistry, run};
use llm_providers::config::{EnvSource, ProcessEnv};
use llm_providers::telemetry::{TracingConfig, init_tracing};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "provider", about = "Query DeepSeek, Doubao, and Qwen chat models")]
struct Cli {
    /// Log adapter activity at debug level (PROVIDER_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered providers.
    List,
    /// List the models a provider accepts.
    Models {
        /// Provider id.
        provider: String,
    },
    /// Show the settings a provider reads.
    Info {
        /// Provider id.
        provider: String,
    },
    /// Send one prompt and print the reply.
    Run {
        /// Provider id.
        #[arg(short, long)]
        provider: String,
        /// Model id; defaults to the provider's default model.
        #[arg(short, long)]
        model: Option<String>,
        /// System prompt sent ahead of the user prompt.
        #[arg(long)]
        system: Option<String>,
        /// Sampling temperature.
        #[arg(long)]
        temperature: Option<f32>,
        /// Output token budget.
        #[arg(long)]
        max_tokens: Option<u32>,
        /// Print the full normalised response as JSON.
        #[arg(long)]
        json: bool,
        /// Prompt text.
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let directive = if cli.verbose { "debug" } else { "warn" };
    if let Err(err) = init_tracing(&TracingConfig::default().with_default_directive(directive)) {
        eprintln!("warning: {err}");
    }

    let registry = ProviderRegistry::builtin();
    match dispatch(&registry, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ProviderError>() {
                Some(provider_err) => eprintln!("error[{}]: {provider_err}", provider_err.kind()),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(registry: &ProviderRegistry, command: Command) -> Result<()> {
    match command {
        Command::List => {
            for spec in registry.iter() {
                println!(
                    "{:<10} {:<10} default model: {}",
                    spec.id(),
                    spec.display_name(),
                    spec.default_model()
                );
            }
        }
        Command::Models { provider } => {
            let spec = registry.lookup(&provider).map_err(ProviderError::from)?;
            for model in spec.models() {
                let capabilities: Vec<String> =
                    model.capabilities().iter().map(ToString::to_string).collect();
                let marker = if model.id() == spec.default_model() { "*" } else { " " };
                println!(
                    "{marker} {:<24} {:<26} ctx {:>7}  {}",
                    model.id(),
                    model.display_name(),
                    model.context_window(),
                    capabilities.join(",")
                );
            }
        }
        Command::Info { provider } => {
            let spec = registry.lookup(&provider).map_err(ProviderError::from)?;
            println!("{} ({})", spec.display_name(), spec.id());
            for field in spec.config_fields() {
                let status = match field.env_var.as_deref() {
                    Some(var) if ProcessEnv.var(var).is_some_and(|v| !v.trim().is_empty()) => {
                        format!("{var} is set")
                    }
                    Some(var) => format!("{var} is unset"),
                    None => "no env var".to_owned(),
                };
                let default = field
                    .default
                    .as_deref()
                    .map(|value| format!(", default {value}"))
                    .unwrap_or_default();
                let required = if field.required { "required" } else { "optional" };
                println!("  {:<10} {required}{default}; {status}", field.id);
            }
        }
        Command::Run {
            provider,
            model,
            system,
            temperature,
            max_tokens,
            json,
            prompt,
        } => {
            let mut invocation = Invocation::prompt(provider, prompt);
            if let Some(model) = model {
                invocation = invocation.with_model(model);
            }
            if let Some(system) = system {
                invocation = invocation.with_system_prompt(system);
            }
            if let Some(temperature) = temperature {
                invocation = invocation.with_temperature(temperature);
            }
            if let Some(tokens) = max_tokens {
                invocation = invocation.with_max_tokens(tokens);
            }

            debug!(provider = invocation.provider(), "dispatching prompt");
            let response = run(registry, &ProcessEnv, invocation).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.text);
                for call in &response.tool_calls {
                    println!("[tool call] {}({})", call.name, call.arguments);
                }
            }
        }
    }

    Ok(())
}
