//! Data Transfer Objects for HTTP responses.
//!
//! All DTOs use Serde for JSON serialization.

pub mod health;
pub mod shorten;
