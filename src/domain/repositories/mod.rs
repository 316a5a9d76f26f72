//! Repository trait definitions for the domain layer.
//!
//! These traits are the store abstraction the core depends on. Concrete
//! implementations live in `crate::infrastructure::persistence`.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Transaction conflict retries and operation timeouts are the
//!   implementation's responsibility and never leak to callers
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`CounterRepository`] - Global counter read, seed and increment
//! - [`UrlMappingRepository`] - Short code mapping lookups and writes

pub mod counter_repository;
pub mod url_mapping_repository;

pub use counter_repository::CounterRepository;
pub use url_mapping_repository::UrlMappingRepository;

#[cfg(test)]
pub use counter_repository::MockCounterRepository;
#[cfg(test)]
pub use url_mapping_repository::MockUrlMappingRepository;
