//! Title-generation settings record.

use serde::{Deserialize, Serialize};

use crate::error::TitlerError;

fn default_true() -> bool {
    true
}

fn default_update_threshold() -> u32 {
    1
}

/// Merged title-generation settings.
///
/// Discovery and the global/project overlay happen upstream; this record is
/// the result handed to the title workflow. `model` feeds
/// [`ModelSelector::select`](crate::selector::ModelSelector::select).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default = "default_update_threshold")]
    pub update_threshold: u32,
    #[serde(default)]
    pub exclude_directories: Vec<String>,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            debug: false,
            model: None,
            prompt: None,
            update_threshold: default_update_threshold(),
            exclude_directories: Vec::new(),
        }
    }
}

impl TitleConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, TitlerError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The configured `provider/model` string, if set to something non-blank.
    pub fn configured_model(&self) -> Option<&str> {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}
