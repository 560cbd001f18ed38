//! End-to-end selection through the factory-backed registry.

use std::collections::HashMap;
use std::sync::Arc;

use pretty_assertions::assert_eq;

use titler::config::{Credentials, TitleConfig};
use titler::error::TitlerError;
use titler::models::{fallback::BUILTIN_FALLBACKS, ModelRef};
use titler::provider::{AuthSource, FactoryRegistry, ModelHandle, ProviderFactory};
use titler::selector::{ModelSelector, SelectionSource};

struct KeyedHandle {
    provider_id: String,
    model_id: String,
}

impl ModelHandle for KeyedHandle {
    fn provider_id(&self) -> &str {
        &self.provider_id
    }
    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Builds handles for one provider, rejecting models it does not know.
struct CatalogFactory {
    ids: [&'static str; 1],
    models: Vec<&'static str>,
}

impl CatalogFactory {
    fn new(provider: &'static str, models: Vec<&'static str>) -> Self {
        Self {
            ids: [provider],
            models,
        }
    }
}

impl ProviderFactory for CatalogFactory {
    fn provider_ids(&self) -> &[&str] {
        &self.ids
    }

    fn display_name(&self) -> &str {
        self.ids[0]
    }

    fn known_models(&self) -> &[&str] {
        &self.models
    }

    fn create(
        &self,
        credentials: &Credentials,
        provider_id: &str,
        model_id: &str,
    ) -> Result<Box<dyn ModelHandle>, TitlerError> {
        if credentials.get_api_key(provider_id).as_deref() == Some("revoked") {
            return Err(TitlerError::Authentication(format!(
                "{provider_id} rejected the API key"
            )));
        }
        if !self.models.iter().any(|known| *known == model_id) {
            return Err(TitlerError::provider(provider_id, model_id, "unknown model"));
        }
        Ok(Box::new(KeyedHandle {
            provider_id: provider_id.to_string(),
            model_id: model_id.to_string(),
        }))
    }
}

fn registry_from_env(vars: &[(&str, &str)]) -> Arc<FactoryRegistry> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let credentials = Credentials::from_lookup(|var| vars.get(var).cloned());

    let mut registry = FactoryRegistry::new(credentials);
    for (provider, model) in BUILTIN_FALLBACKS {
        registry.register(Arc::new(CatalogFactory::new(provider, vec![model])));
    }
    Arc::new(registry)
}

#[tokio::test]
async fn env_credentials_drive_fallback_choice() {
    let registry = registry_from_env(&[("DEEPSEEK_API_KEY", "ds"), ("XAI_API_KEY", "x")]);

    let result = ModelSelector::new(registry).select(None).await.unwrap();

    assert_eq!(result.source, SelectionSource::Fallback);
    assert_eq!(result.model_info, ModelRef::new("deepseek", "deepseek-chat"));
    assert_eq!(result.handle.model_id(), "deepseek-chat");
}

#[tokio::test]
async fn configured_model_from_title_config() {
    let registry = registry_from_env(&[("GEMINI_API_KEY", "g")]);
    let config = TitleConfig::from_json_str(r#"{ "model": "google/gemini-2.5-flash" }"#).unwrap();

    let result = ModelSelector::new(registry)
        .select(config.configured_model())
        .await
        .unwrap();

    assert_eq!(result.source, SelectionSource::Config);
    assert_eq!(result.model_info, ModelRef::new("google", "gemini-2.5-flash"));
}

#[tokio::test]
async fn unknown_configured_model_falls_back_with_failed_model() {
    let registry = registry_from_env(&[("ANTHROPIC_API_KEY", "a")]);

    let result = ModelSelector::new(registry)
        .select(Some("anthropic/claude-unknown"))
        .await
        .unwrap();

    assert_eq!(result.model_info, ModelRef::new("anthropic", "claude-haiku-4-5"));
    assert_eq!(
        result.failed_model,
        Some(ModelRef::new("anthropic", "claude-unknown"))
    );
}

#[tokio::test]
async fn configured_provider_without_credentials_falls_back() {
    let registry = registry_from_env(&[("OPENCODE_API_KEY", "oc")]);

    let result = ModelSelector::new(registry)
        .select(Some("openai/gpt-5-mini"))
        .await
        .unwrap();

    assert_eq!(result.model_info, ModelRef::new("opencode", "big-pickle"));
    assert_eq!(result.failed_model, Some(ModelRef::new("openai", "gpt-5-mini")));
}

#[tokio::test]
async fn listed_provider_can_still_fail_construction() {
    let registry = registry_from_env(&[("OPENAI_API_KEY", "revoked"), ("ZAI_API_KEY", "z")]);

    let result = ModelSelector::new(registry).select(None).await.unwrap();

    assert_eq!(result.model_info, ModelRef::new("zai", "glm-4.5-flash"));
}

#[tokio::test]
async fn no_credentials_exhausts() {
    let registry = registry_from_env(&[]);

    let err = ModelSelector::new(registry)
        .select(Some("openai/gpt-5-mini"))
        .await
        .unwrap_err();

    assert!(matches!(err, TitlerError::NoAvailableModels));
}

#[tokio::test]
async fn keys_added_after_construction_are_visible_to_selection() {
    let registry = registry_from_env(&[]);
    registry
        .credentials()
        .set_api_key("alibaba", "dashscope-key".to_string());

    let result = ModelSelector::new(registry.clone()).select(None).await.unwrap();

    assert_eq!(result.model_info, ModelRef::new("alibaba", "qwen3-coder-flash"));
    assert_eq!(
        registry.credentials().source_of("alibaba"),
        Some(AuthSource::Api)
    );
}
