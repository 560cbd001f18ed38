//! Selection outcome types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::models::ModelRef;
use crate::provider::ModelHandle;

/// Which stage produced the selected model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SelectionSource {
    Config,
    Fallback,
}

/// A working model handle plus the metadata explaining why it was chosen.
#[derive(Debug)]
pub struct SelectionResult {
    pub handle: Box<dyn ModelHandle>,
    pub model_info: ModelRef,
    pub source: SelectionSource,
    pub reason: String,
    /// The configured model that was attempted and failed, if any.
    pub failed_model: Option<ModelRef>,
}

impl SelectionResult {
    pub(crate) fn from_config(handle: Box<dyn ModelHandle>, model: ModelRef) -> Self {
        Self {
            handle,
            reason: format!("Using configured model {model}"),
            model_info: model,
            source: SelectionSource::Config,
            failed_model: None,
        }
    }

    pub(crate) fn from_fallback(
        handle: Box<dyn ModelHandle>,
        model: ModelRef,
        priority: usize,
        failed_model: Option<ModelRef>,
    ) -> Self {
        let reason = match &failed_model {
            Some(failed) => format!(
                "Configured model {failed} unavailable; using fallback {model} (priority {priority})"
            ),
            None => format!("Using fallback model {model} (priority {priority})"),
        };
        Self {
            handle,
            model_info: model,
            source: SelectionSource::Fallback,
            reason,
            failed_model,
        }
    }

    /// True when a configured model was requested but a fallback was used.
    pub fn is_degraded(&self) -> bool {
        self.failed_model.is_some()
    }
}
