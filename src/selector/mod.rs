//! Title-model selection with prioritized fallback.
//!
//! [`ModelSelector::select`] makes one linear pass:
//!
//! 1. Try the configured `provider/model`, if any and well-formed.
//! 2. Ask the registry which providers are authenticated.
//! 3. Walk the [`FallbackTable`] in priority order, trying each
//!    authenticated provider's mapped model.
//!
//! The first successful construction wins. Per-candidate failures are
//! normalized and logged, never returned; the only error that reaches the
//! caller is [`TitlerError::NoAvailableModels`].

pub mod result;

pub use result::{SelectionResult, SelectionSource};

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use uuid::Uuid;

use crate::error::{normalize, Result, TitlerError};
use crate::models::{FallbackTable, ModelRef};
use crate::provider::{AuthenticatedProviders, ModelHandle, ProviderRegistry};
use crate::util::timeout::with_timeout;

/// Component tag carried on every log event.
pub const COMPONENT: &str = "model-selector";

/// Default bound on a single registry call.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolves which model handle to use for title generation.
///
/// Holds no per-call state, so one selector can serve concurrent calls.
pub struct ModelSelector {
    registry: Arc<dyn ProviderRegistry>,
    table: FallbackTable,
    attempt_timeout: Duration,
}

impl ModelSelector {
    /// Selector over the builtin fallback table.
    pub fn new(registry: Arc<dyn ProviderRegistry>) -> Self {
        Self {
            registry,
            table: FallbackTable::builtin().clone(),
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    pub fn with_fallback_table(mut self, table: FallbackTable) -> Self {
        self.table = table;
        self
    }

    /// Bound each registry call. `Duration::ZERO` disables the bound.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn fallback_table(&self) -> &FallbackTable {
        &self.table
    }

    /// Select a model handle, preferring `configured_model` (`"provider/model"`).
    pub async fn select(&self, configured_model: Option<&str>) -> Result<SelectionResult> {
        let selection_id = Uuid::new_v4();
        let started = Instant::now();
        tracing::debug!(
            component = COMPONENT,
            %selection_id,
            started_at = %Utc::now().to_rfc3339(),
            configured_model = ?configured_model,
            "model selection started"
        );

        let mut failed_model = None;
        if let Some(raw) = configured_model {
            match ModelRef::parse(raw) {
                Ok(candidate) => {
                    if let Some(handle) = self
                        .attempt(selection_id, &candidate, SelectionSource::Config)
                        .await
                    {
                        tracing::info!(
                            component = COMPONENT,
                            %selection_id,
                            model = %candidate,
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "using configured model"
                        );
                        return Ok(SelectionResult::from_config(handle, candidate));
                    }
                    failed_model = Some(candidate);
                }
                Err(err) => {
                    tracing::warn!(
                        component = COMPONENT,
                        %selection_id,
                        configured_model = raw,
                        error = %err,
                        "malformed configured model, falling back"
                    );
                }
            }
        }

        let authenticated = self.discover(selection_id).await;

        for provider_id in self.table.providers() {
            if !authenticated.contains_key(provider_id) {
                tracing::debug!(
                    component = COMPONENT,
                    %selection_id,
                    provider_id,
                    "skipping unauthenticated provider"
                );
                continue;
            }
            let Some(model_id) = self.table.model_for(provider_id) else {
                tracing::warn!(
                    component = COMPONENT,
                    %selection_id,
                    provider_id,
                    "no fallback model mapped for provider"
                );
                continue;
            };

            let candidate = ModelRef::new(provider_id, model_id);
            if failed_model.as_ref() == Some(&candidate) {
                tracing::debug!(
                    component = COMPONENT,
                    %selection_id,
                    model = %candidate,
                    "fallback matches failed configured model, not retrying"
                );
                continue;
            }

            if let Some(handle) = self
                .attempt(selection_id, &candidate, SelectionSource::Fallback)
                .await
            {
                let priority = self.table.priority_of(provider_id).unwrap_or_default();
                tracing::info!(
                    component = COMPONENT,
                    %selection_id,
                    model = %candidate,
                    priority,
                    failed_model = ?failed_model.as_ref().map(ModelRef::to_string),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "using fallback model"
                );
                return Ok(SelectionResult::from_fallback(
                    handle,
                    candidate,
                    priority,
                    failed_model,
                ));
            }
        }

        tracing::error!(
            component = COMPONENT,
            %selection_id,
            configured_model = ?configured_model,
            authenticated = authenticated.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "no available models"
        );
        Err(TitlerError::NoAvailableModels)
    }

    /// Fetch the authenticated-provider snapshot. A failed query counts as
    /// an empty snapshot.
    async fn discover(&self, selection_id: Uuid) -> AuthenticatedProviders {
        let listed = with_timeout(
            self.attempt_timeout,
            self.registry.list_authenticated_providers(),
        )
        .await;
        match listed {
            Ok(providers) => {
                tracing::debug!(
                    component = COMPONENT,
                    %selection_id,
                    count = providers.len(),
                    providers = ?providers.keys().collect::<Vec<_>>(),
                    "discovered authenticated providers"
                );
                providers
            }
            Err(err) => {
                let normalized = normalize(&*err);
                tracing::error!(
                    component = COMPONENT,
                    %selection_id,
                    error = %normalized,
                    details = %normalized.to_json(),
                    "listing authenticated providers failed"
                );
                AuthenticatedProviders::new()
            }
        }
    }

    /// Try to construct one candidate. Failures are logged and absorbed.
    async fn attempt(
        &self,
        selection_id: Uuid,
        candidate: &ModelRef,
        stage: SelectionSource,
    ) -> Option<Box<dyn ModelHandle>> {
        tracing::debug!(
            component = COMPONENT,
            %selection_id,
            model = %candidate,
            %stage,
            "attempting model"
        );
        let built = with_timeout(
            self.attempt_timeout,
            self.registry
                .get_model_handle(&candidate.provider_id, &candidate.model_id),
        )
        .await;
        match built {
            Ok(handle) => Some(handle),
            Err(err) => {
                let normalized = normalize(&*err);
                tracing::warn!(
                    component = COMPONENT,
                    %selection_id,
                    model = %candidate,
                    %stage,
                    error = %normalized,
                    details = %normalized.to_json(),
                    "model attempt failed"
                );
                None
            }
        }
    }
}
