//! Destination URL validation.
//!
//! A destination is accepted when it parses as an absolute `http`/`https`
//! URL whose host is a domain name under a known public suffix. Bare
//! destinations such as `example.com/page` are read as HTTPS.

use std::net::IpAddr;

use thiserror::Error;
use url::{Host, Url};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,
    #[error("URL could not be parsed: {0}")]
    Malformed(String),
    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
    #[error("host '{0}' is an IP address")]
    IpHost(String),
    #[error("host '{0}' has no known public suffix")]
    UnknownSuffix(String),
}

/// Checks a submitted destination and returns it in stored form.
///
/// The stored form is the trimmed input, with `https://` prepended when no
/// scheme was given. Scheme-qualified input is otherwise kept verbatim.
pub fn validate_destination(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = parse_destination(&candidate)?;
    check_destination_host(&url)?;

    Ok(candidate)
}

/// Parses an absolute `http`/`https` URL with a host.
pub fn parse_destination(input: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    if url.host().is_none() {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

/// Rejects IP literal hosts and hosts without a known public suffix.
pub fn check_destination_host(url: &Url) -> Result<(), UrlValidationError> {
    let domain = match url.host() {
        Some(Host::Domain(domain)) => domain,
        Some(Host::Ipv4(ip)) => return Err(UrlValidationError::IpHost(ip.to_string())),
        Some(Host::Ipv6(ip)) => return Err(UrlValidationError::IpHost(ip.to_string())),
        None => return Err(UrlValidationError::MissingHost),
    };

    let domain = domain.trim_end_matches('.');

    if domain.parse::<IpAddr>().is_ok() {
        return Err(UrlValidationError::IpHost(domain.to_string()));
    }

    match psl::domain(domain.as_bytes()) {
        Some(registrable) if registrable.suffix().is_known() => Ok(()),
        _ => Err(UrlValidationError::UnknownSuffix(domain.to_string())),
    }
}

fn has_scheme(input: &str) -> bool {
    match input.find("://") {
        Some(pos) => {
            let scheme = &input[..pos];
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https_url() {
        assert_eq!(
            validate_destination("https://example.com/path?q=1").unwrap(),
            "https://example.com/path?q=1"
        );
    }

    #[test]
    fn test_accepts_http_url() {
        assert!(validate_destination("http://www.nimiq.com").is_ok());
    }

    #[test]
    fn test_prefixes_bare_destination() {
        assert_eq!(
            validate_destination("  example.com/page ").unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_accepts_multi_label_suffix() {
        assert!(validate_destination("https://shop.example.co.uk").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_destination("   "), Err(UrlValidationError::Empty));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            validate_destination("ftp://example.com/file"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_destination("javascript://alert(1)"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_rejects_ip_hosts() {
        assert!(matches!(
            validate_destination("http://192.168.1.1/admin"),
            Err(UrlValidationError::IpHost(_))
        ));
        assert!(matches!(
            validate_destination("http://[::1]:8080/"),
            Err(UrlValidationError::IpHost(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_suffix() {
        assert!(matches!(
            validate_destination("https://example.notarealtld"),
            Err(UrlValidationError::UnknownSuffix(_))
        ));
        assert!(validate_destination("http://localhost:3000").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(validate_destination("not a url at all").is_err());
        assert!(validate_destination("https://").is_err());
    }

    #[test]
    fn test_trailing_dot_host() {
        assert!(validate_destination("https://example.com./").is_ok());
    }
}
