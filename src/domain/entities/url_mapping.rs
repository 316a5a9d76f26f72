//! Short code → URL mapping entity.

use chrono::{DateTime, Utc};

/// A persisted mapping from a short code to a canonical URL.
///
/// Mappings are write-once: a code is never reassigned and its URL never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub code: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(code: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            url,
            created_at,
        }
    }
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub code: String,
    pub url: String,
}

impl NewUrlMapping {
    pub fn new(code: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_creation() {
        let now = Utc::now();
        let mapping = UrlMapping::new(
            "67f".to_string(),
            "https://www.foo.com".to_string(),
            now,
        );

        assert_eq!(mapping.code, "67f");
        assert_eq!(mapping.url, "https://www.foo.com");
        assert_eq!(mapping.created_at, now);
    }

    #[test]
    fn test_new_mapping_creation() {
        let new_mapping = NewUrlMapping::new("0", "https://www.example.com");

        assert_eq!(new_mapping.code, "0");
        assert_eq!(new_mapping.url, "https://www.example.com");
    }
}
