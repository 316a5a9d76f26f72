//! Pure helpers used by the core and the HTTP layer.
//!
//! - [`base62`] - Counter value ↔ short code conversion
//! - [`url_normalizer`] - URL canonicalization
//! - [`public_host`] - Host resolution for shortened links

pub mod base62;
pub mod public_host;
pub mod url_normalizer;
