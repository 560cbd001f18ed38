//! Priority-ordered provider → model fallback table.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use super::ModelRef;
use crate::error::TitlerError;

/// Builtin fallback candidates, highest priority first.
pub const BUILTIN_FALLBACKS: [(&str, &str); 8] = [
    ("openai", "gpt-5-mini"),
    ("anthropic", "claude-haiku-4-5"),
    ("google", "gemini-2.5-flash"),
    ("deepseek", "deepseek-chat"),
    ("xai", "grok-4-fast"),
    ("alibaba", "qwen3-coder-flash"),
    ("zai", "glm-4.5-flash"),
    ("opencode", "big-pickle"),
];

static BUILTIN_TABLE: OnceLock<FallbackTable> = OnceLock::new();

/// Ordered provider IDs with one fallback model each.
///
/// `order` is the only source of iteration order. A provider listed in
/// `order` without an entry in `models` is skipped by the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackTable {
    order: Vec<String>,
    models: HashMap<String, String>,
}

impl FallbackTable {
    /// The process-wide builtin table.
    pub fn builtin() -> &'static FallbackTable {
        BUILTIN_TABLE.get_or_init(|| {
            let pairs = BUILTIN_FALLBACKS;
            Self {
                order: pairs.iter().map(|(p, _)| p.to_string()).collect(),
                models: pairs
                    .iter()
                    .map(|(p, m)| (p.to_string(), m.to_string()))
                    .collect(),
            }
        })
    }

    /// Build a table from `(provider, model)` pairs in priority order.
    pub fn from_pairs<I, P, M>(pairs: I) -> Result<Self, TitlerError>
    where
        I: IntoIterator<Item = (P, M)>,
        P: Into<String>,
        M: Into<String>,
    {
        let (order, models): (Vec<String>, Vec<(String, String)>) = pairs
            .into_iter()
            .map(|(p, m)| {
                let p = p.into();
                (p.clone(), (p, m.into()))
            })
            .unzip();
        Self::with_order(order, models.into_iter().collect())
    }

    /// Build a table from an explicit order and a separate model mapping.
    ///
    /// Fails if `order` lists a provider twice.
    pub fn with_order(
        order: Vec<String>,
        models: HashMap<String, String>,
    ) -> Result<Self, TitlerError> {
        let mut seen = HashSet::new();
        if let Some(dup) = order.iter().find(|p| !seen.insert(p.as_str())) {
            return Err(TitlerError::Configuration(format!(
                "Duplicate provider '{dup}' in fallback table"
            )));
        }
        Ok(Self { order, models })
    }

    /// Provider IDs in priority order.
    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Fallback model for a provider, if mapped.
    pub fn model_for(&self, provider_id: &str) -> Option<&str> {
        self.models.get(provider_id).map(String::as_str)
    }

    /// 1-based priority of a provider.
    pub fn priority_of(&self, provider_id: &str) -> Option<usize> {
        self.order
            .iter()
            .position(|p| p == provider_id)
            .map(|idx| idx + 1)
    }

    /// Mapped candidates in priority order.
    pub fn candidates(&self) -> impl Iterator<Item = ModelRef> + '_ {
        self.providers()
            .filter_map(|p| self.model_for(p).map(|m| ModelRef::new(p, m)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
