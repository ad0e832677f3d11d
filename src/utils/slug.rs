//! Slug and edit password generation.

use rand::Rng;

/// Number of random bytes behind an edit password (hex-encoded to 32 chars).
const EDIT_PASSWORD_BYTES: usize = 16;

/// Generates a slug of `length` characters drawn uniformly, with replacement,
/// from `alphabet`.
///
/// Uniqueness is not checked here; the store rejects a slug that is already
/// taken on the domain and the caller retries.
///
/// Returns an empty string for an empty alphabet. Configuration validation
/// rules that out at startup.
pub fn generate_slug(alphabet: &str, length: usize) -> String {
    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    let mut rng = rand::rng();
    (0..length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect()
}

/// Generates the one-time edit password handed to a link's creator.
///
/// # Errors
///
/// Fails only if the operating system RNG is unavailable.
pub fn generate_edit_password() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; EDIT_PASSWORD_BYTES];
    getrandom::fill(&mut buffer)?;
    Ok(hex::encode(buffer))
}

/// Splits a trailing `+` management marker off a requested slug.
///
/// `abc+` → `Some("abc")`; `abc` → `None`.
pub fn strip_manage_marker(slug: &str) -> Option<&str> {
    slug.strip_suffix('+')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    #[test]
    fn test_generate_slug_has_configured_length() {
        for length in [1, 6, 12, 64] {
            assert_eq!(generate_slug(ALPHABET, length).chars().count(), length);
        }
    }

    #[test]
    fn test_generate_slug_uses_only_alphabet() {
        let slug = generate_slug("xyz", 200);
        assert!(slug.chars().all(|c| "xyz".contains(c)));
    }

    #[test]
    fn test_generate_slug_multibyte_alphabet() {
        let slug = generate_slug("äöü", 10);
        assert_eq!(slug.chars().count(), 10);
        assert!(slug.chars().all(|c| "äöü".contains(c)));
    }

    #[test]
    fn test_generate_slug_single_character_alphabet() {
        assert_eq!(generate_slug("a", 4), "aaaa");
    }

    #[test]
    fn test_generate_slug_empty_alphabet() {
        assert_eq!(generate_slug("", 6), "");
    }

    #[test]
    fn test_generate_slug_is_random() {
        let slugs: HashSet<String> = (0..500).map(|_| generate_slug(ALPHABET, 12)).collect();
        assert_eq!(slugs.len(), 500);
    }

    #[test]
    fn test_edit_password_is_32_hex_chars() {
        let password = generate_edit_password().unwrap();
        assert_eq!(password.len(), 32);
        assert!(password.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(password, generate_edit_password().unwrap());
    }

    #[test]
    fn test_strip_manage_marker() {
        assert_eq!(strip_manage_marker("abc+"), Some("abc"));
        assert_eq!(strip_manage_marker("abc"), None);
        assert_eq!(strip_manage_marker("+"), Some(""));
    }
}
