//! Convenience re-exports.

pub use crate::config::{Credentials, TitleConfig};
pub use crate::error::{NormalizedError, Result, TitlerError};
pub use crate::models::{FallbackTable, ModelRef};
pub use crate::provider::{
    AuthSource, AuthenticatedProvider, AuthenticatedProviders, FactoryRegistry, ModelHandle,
    ProviderFactory, ProviderRegistry,
};
pub use crate::selector::{ModelSelector, SelectionResult, SelectionSource};
