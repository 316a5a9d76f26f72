//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};

/// Successful shortening result.
///
/// `shortened_url` has no scheme: `<host>/redirect/<code>`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    #[serde(rename = "shortenedUrl")]
    pub shortened_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_field() {
        let response = ShortenResponse {
            shortened_url: "sho.rt/redirect/67f".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "shortenedUrl": "sho.rt/redirect/67f" }));
    }
}
