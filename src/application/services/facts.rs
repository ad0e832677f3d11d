//! "Did you know?" facts shown while the interstitial page counts down.

use rand::seq::IndexedRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fact {
    pub text: &'static str,
    pub url: &'static str,
    pub url_text: &'static str,
}

pub const FACTS: &[Fact] = &[
    Fact {
        text: "Nimiq is a simple, secure and censorship resistant cryptocurrency.",
        url: "https://www.nimiq.com/",
        url_text: "Learn more",
    },
];

/// Picks a fact uniformly at random.
pub fn random_fact() -> &'static Fact {
    FACTS.choose(&mut rand::rng()).unwrap_or(&FACTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_fact_is_listed() {
        let fact = random_fact();
        assert!(FACTS.contains(fact));
        assert!(fact.url.starts_with("https://"));
    }
}
