//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{
    CounterService, DynCounterService, DynRedirectService, DynRegistryService, RedirectService,
    RegistryService,
};
use crate::domain::entities::NewUrlMapping;
use crate::domain::repositories::{CounterRepository, UrlMappingRepository};

/// Services and settings shared across requests.
///
/// Cloning is cheap: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<DynRegistryService>,
    pub resolver: Arc<DynRedirectService>,
    pub counter: Arc<DynCounterService>,
    pub mappings: Arc<dyn UrlMappingRepository>,
    /// Host placed in shortened links instead of the request `Host` header.
    pub public_host: Option<String>,
}

impl AppState {
    /// Wires the services over the given store.
    ///
    /// `sentinel` is the mapping written when the store is bootstrapped.
    pub fn new(
        mappings: Arc<dyn UrlMappingRepository>,
        counters: Arc<dyn CounterRepository>,
        seed: u64,
        sentinel: NewUrlMapping,
        public_host: Option<String>,
    ) -> Self {
        let counter = Arc::new(CounterService::new(counters, seed));
        let registry = Arc::new(RegistryService::new(
            mappings.clone(),
            counter.clone(),
            sentinel,
        ));
        let resolver = Arc::new(RedirectService::new(mappings.clone()));

        Self {
            registry,
            resolver,
            counter,
            mappings,
            public_host,
        }
    }
}
