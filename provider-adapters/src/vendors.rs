//! Built-in vendor catalog.

use provider_primitives::{ModelCapability, ModelInfo, ProviderId, ProviderSpec};

use provider_primitives::ModelCapability::{Chat, Code, Completion, ToolCalls, Vision};

/// `DeepSeek` API key variable.
pub const DEEPSEEK_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
/// `DeepSeek` base URL override variable.
pub const DEEPSEEK_BASE_URL_ENV: &str = "DEEPSEEK_BASE_URL";
/// Doubao API key variable.
pub const DOUBAO_API_KEY_ENV: &str = "DOUBAO_API_KEY";
/// Doubao base URL override variable.
pub const DOUBAO_BASE_URL_ENV: &str = "DOUBAO_BASE_URL";
/// Qwen API key variable.
pub const QWEN_API_KEY_ENV: &str = "QWEN_API_KEY";
/// Qwen base URL override variable.
pub const QWEN_BASE_URL_ENV: &str = "QWEN_BASE_URL";

type CatalogEntry = (&'static str, &'static str, u32, &'static [ModelCapability]);

const DEEPSEEK_MODELS: &[CatalogEntry] = &[
    ("deepseek-chat", "DeepSeek Chat", 128_000, &[Chat, ToolCalls]),
    ("deepseek-llm", "DeepSeek LLM", 128_000, &[Chat, Completion]),
    ("deepseek-coder", "DeepSeek Coder", 128_000, &[Chat, Completion, Code]),
    ("deepseek-visual", "DeepSeek Visual", 128_000, &[Chat, Vision]),
    ("deepseek-r1", "DeepSeek R1", 128_000, &[Chat, Completion, ToolCalls]),
];

const DOUBAO_MODELS: &[CatalogEntry] = &[
    ("doubao-1.5-pro-128k", "Doubao 1.5 Pro 128k", 128_000, &[Chat, Completion, ToolCalls]),
    ("doubao-1.5-pro-256k", "Doubao 1.5 Pro 256k", 256_000, &[Chat, Completion, ToolCalls]),
    ("doubao-1.5-mini-128k", "Doubao 1.5 Mini 128k", 128_000, &[Chat, Completion]),
    ("doubao-1.5-flash-128k", "Doubao 1.5 Flash 128k", 128_000, &[Chat, Completion]),
    ("doubao-1.5-flash-256k", "Doubao 1.5 Flash 256k", 256_000, &[Chat, Completion]),
];

const QWEN_MODELS: &[CatalogEntry] = &[
    ("qwen2.5-72b-instruct", "Qwen 2.5 72B Instruct", 256_000, &[Chat, Completion, ToolCalls]),
    ("qwen2.5-32b-instruct", "Qwen 2.5 32B Instruct", 256_000, &[Chat, Completion, ToolCalls]),
    ("qwen2.5-14b-instruct", "Qwen 2.5 14B Instruct", 256_000, &[Chat, Completion, ToolCalls]),
    ("qwen2.5-7b-instruct", "Qwen 2.5 7B Instruct", 256_000, &[Chat, Completion, ToolCalls]),
    ("qwen2.5-3b-instruct", "Qwen 2.5 3B Instruct", 256_000, &[Chat, Completion]),
    ("qwen2.5-1.5b-instruct", "Qwen 2.5 1.5B Instruct", 256_000, &[Chat, Completion]),
];

struct Vendor {
    id: &'static str,
    display_name: &'static str,
    base_url: &'static str,
    api_key_env: &'static str,
    base_url_env: &'static str,
    default_model: &'static str,
    models: &'static [CatalogEntry],
}

/// `DeepSeek` (`https://api.deepseek.com/v1`).
///
/// # Panics
///
/// Never in practice: the catalog entry is constant and covered by tests.
#[must_use]
pub fn deepseek() -> ProviderSpec {
    build(&Vendor {
        id: "deepseek",
        display_name: "DeepSeek",
        base_url: "https://api.deepseek.com/v1",
        api_key_env: DEEPSEEK_API_KEY_ENV,
        base_url_env: DEEPSEEK_BASE_URL_ENV,
        default_model: "deepseek-chat",
        models: DEEPSEEK_MODELS,
    })
}

/// Doubao on Volcano Engine Ark (`https://ark.cn-beijing.volces.com/api/v3`).
///
/// # Panics
///
/// Never in practice: the catalog entry is constant and covered by tests.
#[must_use]
pub fn doubao() -> ProviderSpec {
    build(&Vendor {
        id: "doubao",
        display_name: "Doubao",
        base_url: "https://ark.cn-beijing.volces.com/api/v3",
        api_key_env: DOUBAO_API_KEY_ENV,
        base_url_env: DOUBAO_BASE_URL_ENV,
        default_model: "doubao-1.5-pro-128k",
        models: DOUBAO_MODELS,
    })
}

/// Qwen (`https://api.tongyi.ai/v1`).
///
/// # Panics
///
/// Never in practice: the catalog entry is constant and covered by tests.
#[must_use]
pub fn qwen() -> ProviderSpec {
    build(&Vendor {
        id: "qwen",
        display_name: "Qwen",
        base_url: "https://api.tongyi.ai/v1",
        api_key_env: QWEN_API_KEY_ENV,
        base_url_env: QWEN_BASE_URL_ENV,
        default_model: "qwen2.5-7b-instruct",
        models: QWEN_MODELS,
    })
}

/// All built-in vendors in display order.
#[must_use]
pub fn builtin_specs() -> Vec<ProviderSpec> {
    vec![deepseek(), doubao(), qwen()]
}

fn build(vendor: &Vendor) -> ProviderSpec {
    let builder = ProviderId::new(vendor.id)
        .map(ProviderSpec::builder)
        .and_then(|b| b.display_name(vendor.display_name))
        .and_then(|b| b.default_base_url(vendor.base_url))
        .and_then(|b| b.api_key_env(vendor.api_key_env))
        .and_then(|b| b.base_url_env(vendor.base_url_env))
        .expect("built-in vendor descriptor is valid");

    vendor
        .models
        .iter()
        .fold(builder, |builder, (id, name, context, capabilities)| {
            builder.add_model(
                ModelInfo::new(*id, *name)
                    .with_context_window(*context)
                    .with_max_output_tokens(ModelInfo::DEFAULT_MAX_OUTPUT_TOKENS)
                    .with_capabilities(capabilities.iter().copied()),
            )
        })
        .default_model(vendor.default_model)
        .capabilities(vec![Chat, Completion, ToolCalls])
        .build()
        .expect("built-in vendor catalog is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deepseek_catalog() {
        let spec = deepseek();
        assert_eq!(spec.id().as_str(), "deepseek");
        assert_eq!(spec.display_name(), "DeepSeek");
        assert_eq!(spec.default_base_url(), "https://api.deepseek.com/v1");
        assert_eq!(spec.api_key_env(), "DEEPSEEK_API_KEY");
        assert_eq!(spec.base_url_env(), "DEEPSEEK_BASE_URL");
        assert_eq!(spec.default_model(), "deepseek-chat");
        assert_eq!(
            spec.model_ids().collect::<Vec<_>>(),
            [
                "deepseek-chat",
                "deepseek-llm",
                "deepseek-coder",
                "deepseek-visual",
                "deepseek-r1"
            ]
        );
        assert!(
            spec.model("deepseek-visual")
                .is_some_and(|m| m.supports(Vision))
        );
    }

    #[test]
    fn doubao_catalog() {
        let spec = doubao();
        assert_eq!(
            spec.default_base_url(),
            "https://ark.cn-beijing.volces.com/api/v3"
        );
        assert_eq!(spec.api_key_env(), "DOUBAO_API_KEY");
        assert_eq!(spec.base_url_env(), "DOUBAO_BASE_URL");
        assert_eq!(spec.default_model(), "doubao-1.5-pro-128k");
        assert_eq!(
            spec.model_ids().collect::<Vec<_>>(),
            [
                "doubao-1.5-pro-128k",
                "doubao-1.5-pro-256k",
                "doubao-1.5-mini-128k",
                "doubao-1.5-flash-128k",
                "doubao-1.5-flash-256k"
            ]
        );
        assert_eq!(
            spec.model("doubao-1.5-pro-256k").map(ModelInfo::context_window),
            Some(256_000)
        );
    }

    #[test]
    fn qwen_catalog() {
        let spec = qwen();
        assert_eq!(spec.default_base_url(), "https://api.tongyi.ai/v1");
        assert_eq!(spec.api_key_env(), "QWEN_API_KEY");
        assert_eq!(spec.base_url_env(), "QWEN_BASE_URL");
        assert_eq!(spec.default_model(), "qwen2.5-7b-instruct");
        assert_eq!(
            spec.model_ids().collect::<Vec<_>>(),
            [
                "qwen2.5-72b-instruct",
                "qwen2.5-32b-instruct",
                "qwen2.5-14b-instruct",
                "qwen2.5-7b-instruct",
                "qwen2.5-3b-instruct",
                "qwen2.5-1.5b-instruct"
            ]
        );
        assert!(
            !spec
                .model("qwen2.5-3b-instruct")
                .is_some_and(|m| m.supports(ToolCalls))
        );
    }

    #[test]
    fn every_model_has_output_budget() {
        for spec in builtin_specs() {
            assert!(!spec.models().is_empty());
            for model in spec.models() {
                assert_eq!(model.max_output_tokens(), 4096, "{}", model.id());
            }
        }
    }
}
