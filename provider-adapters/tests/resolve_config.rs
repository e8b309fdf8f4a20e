use std::collections::HashMap;

use provider_adapters::vendors::{builtin_specs, deepseek, doubao, qwen};
use provider_config::{ConfigError, resolve_config};

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn every_vendor_requires_its_api_key() {
    for spec in builtin_specs() {
        let err = resolve_config(&spec, &env(&[]), None).expect_err("missing key");
        assert_eq!(
            err,
            ConfigError::MissingApiKey {
                provider: spec.display_name().to_owned(),
                env_var: spec.api_key_env().to_owned(),
            }
        );
    }
}

#[test]
fn keys_are_not_shared_between_vendors() {
    let only_deepseek = env(&[("DEEPSEEK_API_KEY", "sk-test")]);
    assert!(resolve_config(&deepseek(), &only_deepseek, None).is_ok());
    assert!(matches!(
        resolve_config(&doubao(), &only_deepseek, None),
        Err(ConfigError::MissingApiKey { .. })
    ));
    assert!(matches!(
        resolve_config(&qwen(), &only_deepseek, None),
        Err(ConfigError::MissingApiKey { .. })
    ));
}

#[test]
fn every_vendor_rejects_unlisted_models() {
    for spec in builtin_specs() {
        let env = env(&[(spec.api_key_env(), "key")]);
        for model in ["gpt-4o", "", "DEEPSEEK-CHAT", "qwen2.5-7b"] {
            let err = resolve_config(&spec, &env, Some(model)).expect_err("unlisted model");
            assert!(
                matches!(err, ConfigError::UnsupportedModel { .. }),
                "{} accepted {model:?}",
                spec.id()
            );
        }
    }
}

#[test]
fn every_listed_model_resolves() {
    for spec in builtin_specs() {
        let env = env(&[(spec.api_key_env(), "key")]);
        for model in spec.model_ids() {
            let config = resolve_config(&spec, &env, Some(model)).expect("listed model");
            assert_eq!(config.model(), model);
        }
    }
}

#[test]
fn base_url_override_is_used_verbatim() {
    for spec in builtin_specs() {
        let env = env(&[
            (spec.api_key_env(), "key"),
            (spec.base_url_env(), "https://custom.example/v1"),
        ]);
        let config = resolve_config(&spec, &env, None).expect("config");
        assert_eq!(config.base_url(), "https://custom.example/v1");
    }
}

#[test]
fn default_base_urls_match_vendor_docs() {
    let expected = [
        ("deepseek", "https://api.deepseek.com/v1"),
        ("doubao", "https://ark.cn-beijing.volces.com/api/v3"),
        ("qwen", "https://api.tongyi.ai/v1"),
    ];

    for (spec, (id, url)) in builtin_specs().iter().zip(expected) {
        assert_eq!(spec.id().as_str(), id);
        let config =
            resolve_config(spec, &env(&[(spec.api_key_env(), "key")]), None).expect("config");
        assert_eq!(config.base_url(), url);
    }
}
