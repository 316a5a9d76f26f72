//! Resolution of the host name written into shortened links.

use crate::AppError;
use axum::http::{HeaderMap, header};

/// Returns the host that prefixes shortened links.
///
/// A configured public host wins; otherwise the request `Host` header is used
/// verbatim, port included, so links minted on `localhost:3000` stay usable.
///
/// # Errors
///
/// Returns [`AppError::InvalidArgument`] if no host is configured and the `Host`
/// header is missing, empty, or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:8080".parse().unwrap());
///
/// assert_eq!(resolve_public_host(None, &headers).unwrap(), "sho.rt:8080");
/// assert_eq!(resolve_public_host(Some("s.example.com"), &headers).unwrap(), "s.example.com");
/// ```
pub fn resolve_public_host(configured: Option<&str>, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(host) = configured {
        return Ok(host.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::invalid_argument("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::invalid_argument("Invalid Host header", serde_json::json!({})))?
        .trim();

    if host.is_empty() {
        return Err(AppError::invalid_argument(
            "Empty Host header",
            serde_json::json!({}),
        ));
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    #[test]
    fn test_host_header_plain() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.com"));

        let result = resolve_public_host(None, &headers);
        assert_eq!(result.unwrap(), "example.com");
    }

    #[test]
    fn test_host_header_keeps_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

        let result = resolve_public_host(None, &headers);
        assert_eq!(result.unwrap(), "localhost:3000");
    }

    #[test]
    fn test_host_header_ipv6_with_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("[::1]:8080"));

        let result = resolve_public_host(None, &headers);
        assert_eq!(result.unwrap(), "[::1]:8080");
    }

    #[test]
    fn test_configured_host_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("internal:3000"));

        let result = resolve_public_host(Some("s.example.com/"), &headers);
        assert_eq!(result.unwrap(), "s.example.com");
    }

    #[test]
    fn test_configured_host_without_headers() {
        let headers = HeaderMap::new();

        let result = resolve_public_host(Some("s.example.com"), &headers);
        assert_eq!(result.unwrap(), "s.example.com");
    }

    #[test]
    fn test_missing_host_header() {
        let headers = HeaderMap::new();

        let result = resolve_public_host(None, &headers);
        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_invalid_utf8_host_header() {
        let mut headers = HeaderMap::new();
        let invalid_bytes = vec![0xFF, 0xFE, 0xFD];
        if let Ok(header_value) = HeaderValue::from_bytes(&invalid_bytes) {
            headers.insert(header::HOST, header_value);

            let result = resolve_public_host(None, &headers);
            assert!(result.is_err());
        }
    }
}
