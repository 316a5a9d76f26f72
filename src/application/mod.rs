//! Application layer services implementing the shortening core.
//!
//! Services consume repository traits and never log or format responses; they
//! return values or typed [`crate::error::AppError`]s.
//!
//! # Available Services
//!
//! - [`services::counter_service::CounterService`] - Global counter allocation
//! - [`services::registry_service::RegistryService`] - Idempotent URL shortening
//! - [`services::redirect_service::RedirectService`] - Short code resolution

pub mod services;
