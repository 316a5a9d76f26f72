//! Domain layer containing the persisted entities and the store abstraction.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures (`CounterRecord`, `UrlMapping`)
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Allocation Flow
//!
//! 1. The registry normalizes the URL and looks it up by value
//! 2. On a miss, [`repositories::CounterRepository::increment`] yields a fresh value
//! 3. The value is base-62 encoded into a short code
//! 4. The mapping is written via [`repositories::UrlMappingRepository::create_if_absent`]

pub mod entities;
pub mod repositories;
