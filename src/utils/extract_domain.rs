//! Domain extraction from the `Host` request header.

use axum::http::{HeaderMap, header};

/// Extracts the domain name a request was addressed to.
///
/// Handles IPv6 literals (`[::1]:8080` → `[::1]`), strips the port from
/// anything else, and lowercases the result. Returns `None` if the header is
/// missing, not valid UTF-8, or empty.
pub fn extract_domain(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?.trim();

    let domain = if host.starts_with('[') {
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_host(host: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(host));
        headers
    }

    #[test]
    fn test_extract_domain_simple() {
        assert_eq!(
            extract_domain(&headers_with_host("example.com")).as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn test_extract_domain_with_port() {
        assert_eq!(
            extract_domain(&headers_with_host("example.com:3000")).as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn test_extract_domain_lowercases() {
        assert_eq!(
            extract_domain(&headers_with_host("Nimiq.LINK")).as_deref(),
            Some("nimiq.link")
        );
    }

    #[test]
    fn test_extract_domain_ip_with_port() {
        assert_eq!(
            extract_domain(&headers_with_host("192.168.1.1:9000")).as_deref(),
            Some("192.168.1.1")
        );
    }

    #[test]
    fn test_extract_domain_ipv6_with_port() {
        assert_eq!(
            extract_domain(&headers_with_host("[::1]:8080")).as_deref(),
            Some("[::1]")
        );
    }

    #[test]
    fn test_extract_domain_missing_host_header() {
        assert!(extract_domain(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_extract_domain_invalid_utf8() {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_bytes(&[0xFF, 0xFE, 0xFD]) {
            headers.insert(header::HOST, value);
            assert!(extract_domain(&headers).is_none());
        }
    }
}
