//! Allow-list of host names that serve short links.

use std::fmt;

/// The configured set of short link domains.
///
/// Each domain is a namespace for slugs: the same slug may exist under several
/// domains. Membership is checked both when a link is created and against the
/// `Host` header when a link is resolved or managed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainList {
    domains: Vec<String>,
}

impl DomainList {
    /// Creates a list, dropping blanks and duplicates while keeping order.
    pub fn new(domains: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(domains.len());
        for domain in domains {
            let domain = domain.trim().to_ascii_lowercase();
            if !domain.is_empty() && !unique.contains(&domain) {
                unique.push(domain);
            }
        }
        Self { domains: unique }
    }

    /// Parses a comma-separated list such as `a.tld,b.tld`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(',').map(str::to_string).collect())
    }

    /// Returns true if `candidate` is one of the configured domains.
    ///
    /// Comparison is ASCII case-insensitive, as host names are.
    pub fn contains(&self, candidate: &str) -> bool {
        self.domains
            .iter()
            .any(|d| d.eq_ignore_ascii_case(candidate))
    }

    pub fn first(&self) -> Option<&str> {
        self.domains.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl fmt::Display for DomainList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.domains.join(", "))
    }
}
