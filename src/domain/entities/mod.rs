//! Core domain entities representing the persisted data model.
//!
//! # Entity Types
//!
//! - [`CounterRecord`] - The global allocation counter (`counter/global`)
//! - [`UrlMapping`] - A short code → URL mapping (`shortened-urls/<code>`)
//!
//! `NewUrlMapping` is the creation input for a mapping; the store fills in
//! `created_at`.

pub mod counter;
pub mod url_mapping;

pub use counter::{CounterRecord, GLOBAL_COUNTER_KEY};
pub use url_mapping::{NewUrlMapping, UrlMapping};
