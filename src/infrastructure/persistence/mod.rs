//! Store backends implementing the domain repository traits.
//!
//! # Backends
//!
//! - [`PgCounterRepository`] / [`PgUrlMappingRepository`] - PostgreSQL via SQLx
//! - [`MemoryStore`] - in-process store implementing both traits
//!
//! Both backends share the timeout and conflict-retry policy in [`tx`].

pub mod memory_store;
pub mod pg_counter_repository;
pub mod pg_url_mapping_repository;
pub mod tx;

pub use memory_store::MemoryStore;
pub use pg_counter_repository::PgCounterRepository;
pub use pg_url_mapping_repository::PgUrlMappingRepository;
pub use tx::{TxError, TxPolicy};
