//! Provider registry contract, model handles, and the factory-backed registry.

pub mod factory;
pub mod registry;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::BoxError;

pub use factory::ProviderFactory;
pub use registry::FactoryRegistry;

/// Opaque, invocable reference to a model on a provider.
///
/// Invoking the handle is the caller's business; selection only needs to
/// know which pair it serves.
pub trait ModelHandle: Send + Sync {
    /// Provider ID (e.g., "openai", "anthropic").
    fn provider_id(&self) -> &str;
    /// The model ID this handle serves.
    fn model_id(&self) -> &str;
}

impl std::fmt::Debug for dyn ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModelHandle({}/{})", self.provider_id(), self.model_id())
    }
}

/// Where a provider's credentials came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuthSource {
    Env,
    Config,
    Custom,
    Api,
}

/// Metadata a provider exposes about one of its models.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Descriptive info about an authenticated provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    #[serde(default)]
    pub models: BTreeMap<String, ModelMetadata>,
}

/// One entry of the authenticated-provider snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedProvider {
    pub source: AuthSource,
    pub info: ProviderInfo,
}

impl AuthenticatedProvider {
    pub fn new(source: AuthSource, name: impl Into<String>) -> Self {
        Self {
            source,
            info: ProviderInfo {
                name: name.into(),
                models: BTreeMap::new(),
            },
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.info
            .models
            .insert(model_id.into(), ModelMetadata::default());
        self
    }
}

/// Point-in-time map of provider ID → authenticated provider.
///
/// Key order carries no meaning for selection.
pub type AuthenticatedProviders = BTreeMap<String, AuthenticatedProvider>;

/// External collaborator that knows which providers are usable and how to
/// build model handles for them.
#[async_trait]
pub trait ProviderRegistry: Send + Sync {
    /// Snapshot of providers that currently have usable credentials.
    async fn list_authenticated_providers(&self) -> Result<AuthenticatedProviders, BoxError>;

    /// Construct a handle for `(provider_id, model_id)`.
    ///
    /// May fail even for a provider that was just listed as authenticated.
    async fn get_model_handle(
        &self,
        provider_id: &str,
        model_id: &str,
    ) -> Result<Box<dyn ModelHandle>, BoxError>;
}
