//! HTTP layer translating requests into core operations.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route table
//!
//! Handlers are the only place failures are logged; services return typed
//! errors and stay silent.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
