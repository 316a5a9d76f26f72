//! Business logic services for the application layer.

pub mod counter_service;
pub mod redirect_service;
pub mod registry_service;

pub use counter_service::{CounterService, DEFAULT_COUNTER_SEED};
pub use redirect_service::RedirectService;
pub use registry_service::RegistryService;

use crate::domain::repositories::{CounterRepository, UrlMappingRepository};

/// Counter service over a type-erased store.
pub type DynCounterService = CounterService<dyn CounterRepository>;

/// Registry service over a type-erased store.
pub type DynRegistryService = RegistryService<dyn UrlMappingRepository, dyn CounterRepository>;

/// Redirect service over a type-erased store.
pub type DynRedirectService = RedirectService<dyn UrlMappingRepository>;
