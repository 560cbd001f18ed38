//! Error types for titler.

pub mod normalize;
pub mod unified;

pub use normalize::{normalize, normalize_value, NormalizedError};
pub use unified::ErrorCode;

use strum::IntoStaticStr;
use thiserror::Error;

/// Primary error type for all titler operations.
#[derive(Error, Debug, IntoStaticStr)]
pub enum TitlerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("missing credential for provider {provider}")]
    MissingCredential { provider: String },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Provider error: {provider}/{model}: {message}")]
    Provider {
        provider: String,
        model: String,
        message: String,
    },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Structured failure body returned by a provider SDK or API.
    #[error("Provider error body: {0}")]
    ErrorBody(serde_json::Value),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error(
        "No available models for title generation. \
         Authenticate with at least one provider and try again."
    )]
    NoAvailableModels,
}

impl TitlerError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a provider error scoped to a provider/model pair.
    pub fn provider(
        provider: impl Into<String>,
        model: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            model: model.into(),
            message: message.into(),
        }
    }

    /// Variant name, used as the `name` of normalized records.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Configuration(_) => ErrorCode::ConfigurationError,
            Self::InvalidArgument(_) => ErrorCode::InvalidRequest,
            Self::ModelNotFound(_) => ErrorCode::ModelNotFound,
            Self::MissingCredential { .. } => ErrorCode::MissingCredential,
            Self::Authentication(_) => ErrorCode::InvalidApiKey,
            Self::Provider { .. } => ErrorCode::ProviderError,
            Self::Api { status, .. } => ErrorCode::from_status(*status),
            Self::ErrorBody(_) => ErrorCode::ProviderError,
            Self::Network(_) => ErrorCode::NetworkError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Serialization(_) => ErrorCode::SerializationError,
            Self::Timeout(_) => ErrorCode::Timeout,
            Self::NoAvailableModels => ErrorCode::NoAvailableModels,
        }
    }

    /// Provider ID carried by the error, if any.
    pub fn provider_id(&self) -> Option<&str> {
        match self {
            Self::MissingCredential { provider } => Some(provider),
            Self::Provider { provider, .. } => Some(provider),
            _ => None,
        }
    }

    /// Model ID carried by the error, if any.
    pub fn model_id(&self) -> Option<&str> {
        match self {
            Self::Provider { model, .. } => Some(model),
            _ => None,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            Self::ErrorBody(body) => ["status", "statusCode"]
                .iter()
                .find_map(|key| body.get(*key).and_then(serde_json::Value::as_u64))
                .and_then(|status| u16::try_from(status).ok()),
            _ => None,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TitlerError>;

/// Boxed error returned by registry collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
