//! Shared test helpers and mock registry.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use titler::error::{BoxError, TitlerError};
use titler::models::ModelRef;
use titler::provider::{
    AuthSource, AuthenticatedProvider, AuthenticatedProviders, ModelHandle, ProviderRegistry,
};

/// A handle that only remembers which pair it was built for.
pub struct MockHandle {
    model: ModelRef,
}

impl ModelHandle for MockHandle {
    fn provider_id(&self) -> &str {
        &self.model.provider_id
    }
    fn model_id(&self) -> &str {
        &self.model.model_id
    }
}

/// A registry with scripted authentication and construction outcomes that
/// records every construction call.
#[derive(Default)]
pub struct MockRegistry {
    authenticated: AuthenticatedProviders,
    failing: HashSet<ModelRef>,
    failing_providers: HashSet<String>,
    error_bodies: HashMap<String, Value>,
    hanging: HashSet<ModelRef>,
    discovery_fails: bool,
    calls: Mutex<Vec<ModelRef>>,
    list_calls: AtomicUsize,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark providers as authenticated, in the given (irrelevant) order.
    pub fn authenticated(mut self, providers: &[&str]) -> Self {
        for provider in providers {
            self.authenticated.insert(
                provider.to_string(),
                AuthenticatedProvider::new(AuthSource::Env, provider.to_uppercase())
                    .with_model("some-model"),
            );
        }
        self
    }

    /// Construction of this exact pair fails.
    pub fn fail(mut self, provider: &str, model: &str) -> Self {
        self.failing.insert(ModelRef::new(provider, model));
        self
    }

    /// Construction of any model on this provider fails with a plain
    /// string error.
    pub fn fail_provider(mut self, provider: &str) -> Self {
        self.failing_providers.insert(provider.to_string());
        self
    }

    /// Construction of any model on this provider fails with a JSON error body.
    pub fn fail_with_body(mut self, provider: &str, body: Value) -> Self {
        self.error_bodies.insert(provider.to_string(), body);
        self
    }

    /// Construction of this pair never completes.
    pub fn hang(mut self, provider: &str, model: &str) -> Self {
        self.hanging.insert(ModelRef::new(provider, model));
        self
    }

    /// The authenticated-provider query fails.
    pub fn failing_discovery(mut self) -> Self {
        self.discovery_fails = true;
        self
    }

    /// Construction calls made so far, in order.
    pub fn calls(&self) -> Vec<ModelRef> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderRegistry for MockRegistry {
    async fn list_authenticated_providers(&self) -> Result<AuthenticatedProviders, BoxError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.discovery_fails {
            return Err(Box::new(TitlerError::api(503, "auth store unavailable")));
        }
        Ok(self.authenticated.clone())
    }

    async fn get_model_handle(
        &self,
        provider_id: &str,
        model_id: &str,
    ) -> Result<Box<dyn ModelHandle>, BoxError> {
        let model = ModelRef::new(provider_id, model_id);
        self.calls.lock().unwrap().push(model.clone());

        if self.hanging.contains(&model) {
            std::future::pending::<()>().await;
        }
        if self.failing.contains(&model) {
            return Err(Box::new(TitlerError::provider(
                provider_id,
                model_id,
                "model could not be instantiated",
            )));
        }
        if let Some(body) = self.error_bodies.get(provider_id) {
            return Err(Box::new(TitlerError::ErrorBody(body.clone())));
        }
        if self.failing_providers.contains(provider_id) {
            return Err(format!("{provider_id} SDK exploded").into());
        }
        Ok(Box::new(MockHandle { model }))
    }
}

pub fn model(provider: &str, model: &str) -> ModelRef {
    ModelRef::new(provider, model)
}
