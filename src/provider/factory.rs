//! Provider factory trait for creating model handles.

use super::ModelHandle;
use crate::config::Credentials;
use crate::error::TitlerError;

/// Factory for creating [`ModelHandle`]s from a provider ID + model ID.
pub trait ProviderFactory: Send + Sync {
    /// Provider ID(s) this factory handles (e.g., &["xai"]).
    fn provider_ids(&self) -> &[&str];

    /// Human-readable provider name reported in the authenticated snapshot.
    fn display_name(&self) -> &str;

    /// Model IDs this factory knows about. Used for snapshot metadata only;
    /// `create` may accept other IDs.
    fn known_models(&self) -> &[&str] {
        &[]
    }

    /// Create a handle for the given model ID using the resolved credentials.
    fn create(
        &self,
        credentials: &Credentials,
        provider_id: &str,
        model_id: &str,
    ) -> Result<Box<dyn ModelHandle>, TitlerError>;
}
