//! Link entity representing a short link under one domain.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A short link: `https://{domain}/{slug}` pointing at `destination`.
///
/// Links are never removed from the store. Deletion flips `active` to false,
/// after which the link is invisible to every read and write path.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: Uuid,
    pub destination: String,
    pub domain: String,
    pub slug: String,
    pub active: bool,
    pub locked: bool,
    pub lock_reason: Option<String>,
    pub admin_password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Reason shown on the block page. Empty reasons read as "Unknown".
    pub fn lock_reason_or_unknown(&self) -> &str {
        match self.lock_reason.as_deref() {
            Some(reason) if !reason.trim().is_empty() => reason,
            _ => "Unknown",
        }
    }

    /// Public URL of the link.
    pub fn short_url(&self) -> String {
        short_url(&self.domain, &self.slug)
    }
}

/// Builds the public short URL. Always uses HTTPS.
pub fn short_url(domain: &str, slug: &str) -> String {
    format!("https://{}/{}", domain.trim_end_matches('/'), slug)
}

/// Input data for creating a new link.
///
/// `admin_password_hash` is the Argon2 PHC string; the plaintext never
/// reaches the store.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: Uuid,
    pub destination: String,
    pub domain: String,
    pub slug: String,
    pub admin_password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lock_reason: Option<&str>) -> Link {
        Link {
            id: Uuid::new_v4(),
            destination: "https://example.com".to_string(),
            domain: "a.tld".to_string(),
            slug: "abc123".to_string(),
            active: true,
            locked: true,
            lock_reason: lock_reason.map(str::to_string),
            admin_password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_short_url() {
        assert_eq!(sample(None).short_url(), "https://a.tld/abc123");
        assert_eq!(short_url("a.tld/", "x"), "https://a.tld/x");
    }

    #[test]
    fn test_lock_reason_defaults_to_unknown() {
        assert_eq!(sample(None).lock_reason_or_unknown(), "Unknown");
        assert_eq!(sample(Some("  ")).lock_reason_or_unknown(), "Unknown");
        assert_eq!(sample(Some("Phishing")).lock_reason_or_unknown(), "Phishing");
    }
}
