//! Factory-backed provider registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{
    AuthenticatedProvider, AuthenticatedProviders, ModelHandle, ModelMetadata, ProviderFactory,
    ProviderInfo, ProviderRegistry,
};
use crate::config::Credentials;
use crate::error::{BoxError, TitlerError};

/// Registry mapping provider IDs to their factories, gated by credentials.
///
/// A provider counts as authenticated when a factory is registered for it
/// and [`Credentials`] holds a key for it.
pub struct FactoryRegistry {
    factories: HashMap<String, Arc<dyn ProviderFactory>>,
    credentials: Credentials,
}

impl FactoryRegistry {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            factories: HashMap::new(),
            credentials,
        }
    }

    /// Register a factory for all provider IDs it declares.
    pub fn register(&mut self, factory: Arc<dyn ProviderFactory>) {
        for id in factory.provider_ids() {
            self.factories.insert(id.to_string(), factory.clone());
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Check whether a factory is registered for the given ID.
    pub fn has_provider(&self, provider_id: &str) -> bool {
        self.factories.contains_key(provider_id)
    }

    /// List all registered provider IDs.
    pub fn provider_ids(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    /// Create a handle by looking up the registered factory.
    pub fn create_handle(
        &self,
        provider_id: &str,
        model_id: &str,
    ) -> Result<Box<dyn ModelHandle>, TitlerError> {
        let factory = self.factories.get(provider_id).ok_or_else(|| {
            TitlerError::ModelNotFound(format!(
                "No provider factory registered for '{provider_id}'"
            ))
        })?;
        if !self.credentials.has_credentials(provider_id) {
            return Err(TitlerError::MissingCredential {
                provider: provider_id.to_string(),
            });
        }
        factory.create(&self.credentials, provider_id, model_id)
    }

    fn snapshot(&self) -> AuthenticatedProviders {
        self.factories
            .iter()
            .filter_map(|(id, factory)| {
                let source = self.credentials.source_of(id)?;
                let models = factory
                    .known_models()
                    .iter()
                    .map(|m| (m.to_string(), ModelMetadata::default()))
                    .collect();
                let entry = AuthenticatedProvider {
                    source,
                    info: ProviderInfo {
                        name: factory.display_name().to_string(),
                        models,
                    },
                };
                Some((id.clone(), entry))
            })
            .collect()
    }
}

#[async_trait]
impl ProviderRegistry for FactoryRegistry {
    async fn list_authenticated_providers(&self) -> Result<AuthenticatedProviders, BoxError> {
        Ok(self.snapshot())
    }

    async fn get_model_handle(
        &self,
        provider_id: &str,
        model_id: &str,
    ) -> Result<Box<dyn ModelHandle>, BoxError> {
        Ok(self.create_handle(provider_id, model_id)?)
    }
}
