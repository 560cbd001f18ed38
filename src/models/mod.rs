//! Model references and the builtin fallback table.

pub mod fallback;

pub use fallback::FallbackTable;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TitlerError;

/// Identifies a candidate model on a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelRef {
    #[serde(rename = "providerID")]
    pub provider_id: String,
    #[serde(rename = "modelID")]
    pub model_id: String,
}

impl ModelRef {
    pub fn new(provider_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            model_id: model_id.into(),
        }
    }

    /// Parse a `"provider/model"` selector.
    ///
    /// The string must split on `/` into exactly two non-empty segments.
    /// Examples: "openai/gpt-5-mini", "anthropic/claude-haiku-4-5"
    pub fn parse(s: &str) -> Result<Self, TitlerError> {
        let mut segments = s.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(provider), Some(model), None) if !provider.is_empty() && !model.is_empty() => {
                Ok(Self::new(provider, model))
            }
            _ => Err(TitlerError::InvalidArgument(format!(
                "Invalid model selector '{s}': expected 'provider/model'"
            ))),
        }
    }
}

impl FromStr for ModelRef {
    type Err = TitlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider_id, self.model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_provider_and_model() {
        let model = ModelRef::parse("openai/gpt-5-mini").unwrap();
        assert_eq!(model.provider_id, "openai");
        assert_eq!(model.model_id, "gpt-5-mini");
    }

    #[test]
    fn parse_keeps_dotted_model_ids() {
        let model = ModelRef::parse("zai/glm-4.5-flash").unwrap();
        assert_eq!(model, ModelRef::new("zai", "glm-4.5-flash"));
    }

    #[test]
    fn parse_missing_separator_is_error() {
        assert!(ModelRef::parse("not-a-valid-format").is_err());
    }

    #[test]
    fn parse_rejects_empty_segments() {
        for raw in ["", "/", "openai/", "/gpt-5-mini"] {
            assert!(ModelRef::parse(raw).is_err(), "expected error for {raw:?}");
        }
    }

    #[test]
    fn parse_rejects_extra_segments() {
        let err = ModelRef::parse("openrouter/openai/gpt-5-mini").unwrap_err();
        assert!(matches!(err, TitlerError::InvalidArgument(_)));
    }

    #[test]
    fn roundtrip_display_parse() {
        let model = ModelRef::new("google", "gemini-2.5-flash");
        let parsed: ModelRef = model.to_string().parse().unwrap();
        assert_eq!(parsed, model);
    }
}
