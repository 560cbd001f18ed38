//! Machine-readable error codes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Stable code attached to normalized error records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    InvalidApiKey,
    MissingCredential,
    ModelNotFound,
    InvalidRequest,
    ConfigurationError,
    ProviderError,
    RateLimitExceeded,
    ServerError,
    Timeout,
    NetworkError,
    IoError,
    SerializationError,
    NoAvailableModels,
    Unknown,
}

impl ErrorCode {
    /// Classify an HTTP status returned by a provider API.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::InvalidApiKey,
            404 => Self::ModelNotFound,
            408 => Self::Timeout,
            429 => Self::RateLimitExceeded,
            400..=499 => Self::InvalidRequest,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}
