//! Configuration: provider credentials and the title-generation settings record.

pub mod title;

pub use title::TitleConfig;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::provider::AuthSource;

/// Environment variables consulted by [`Credentials::from_env`], in lookup order.
pub const ENV_MAPPINGS: [(&str, &str); 11] = [
    ("OPENAI_API_KEY", "openai"),
    ("ANTHROPIC_API_KEY", "anthropic"),
    ("GOOGLE_GENERATIVE_AI_API_KEY", "google"),
    ("GOOGLE_API_KEY", "google"),
    ("GEMINI_API_KEY", "google"),
    ("DEEPSEEK_API_KEY", "deepseek"),
    ("XAI_API_KEY", "xai"),
    ("DASHSCOPE_API_KEY", "alibaba"),
    ("ZHIPU_API_KEY", "zai"),
    ("ZAI_API_KEY", "zai"),
    ("OPENCODE_API_KEY", "opencode"),
];

#[derive(Clone)]
struct Credential {
    secret: String,
    source: AuthSource,
}

/// Layered provider credentials.
///
/// Resolution order for API keys:
/// 1. Explicit keys (`set_api_key`)
/// 2. Environment variables (from `from_env`, including `.env`)
#[derive(Clone, Default)]
pub struct Credentials {
    keys: Arc<RwLock<HashMap<String, Credential>>>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut providers: Vec<String> = self.read().keys().cloned().collect();
        providers.sort();
        f.debug_struct("Credentials")
            .field("providers", &providers)
            .finish()
    }
}

impl Credentials {
    /// Create an empty credential set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (OPENAI_API_KEY, ANTHROPIC_API_KEY, etc.).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using an arbitrary variable lookup. The first non-empty variable
    /// mapped to a provider wins.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let credentials = Self::new();
        for &(env_var, provider) in &ENV_MAPPINGS {
            if credentials.has_credentials(provider) {
                continue;
            }
            if let Some(key) = lookup(env_var).filter(|k| !k.trim().is_empty()) {
                credentials.insert(provider, key, AuthSource::Env);
            }
        }
        credentials
    }

    /// Set an explicit key; it takes precedence over any environment value.
    pub fn set_api_key(&self, provider: &str, key: String) {
        self.insert(provider, key, AuthSource::Api);
    }

    pub fn remove(&self, provider: &str) {
        self.write().remove(provider);
    }

    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        self.read().get(provider).map(|c| c.secret.clone())
    }

    /// Where a provider's credential came from.
    pub fn source_of(&self, provider: &str) -> Option<AuthSource> {
        self.read().get(provider).map(|c| c.source)
    }

    pub fn has_credentials(&self, provider: &str) -> bool {
        self.read().contains_key(provider)
    }

    fn insert(&self, provider: &str, secret: String, source: AuthSource) {
        self.write()
            .insert(provider.to_string(), Credential { secret, source });
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Credential>> {
        self.keys
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Credential>> {
        self.keys
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
