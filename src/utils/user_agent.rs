//! Automated agent detection for click accounting.

use std::sync::LazyLock;

use regex::Regex;
use woothee::parser::Parser;

/// Keywords found in crawler, preview and monitoring user agents that
/// woothee does not classify as crawlers.
static BOT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)bot|crawl|spider|slurp|archiver|facebookexternalhit|embedly|preview|whatsapp|telegram|discord|headless|phantomjs|lighthouse|curl/|wget/|python-requests|go-http-client|okhttp|monitor|pingdom|uptime",
    )
    .unwrap()
});

/// Returns `true` if the user agent belongs to an automated client.
///
/// A request without a user agent is treated as a human visitor.
pub fn is_bot(user_agent: Option<&str>) -> bool {
    let Some(ua) = user_agent.map(str::trim).filter(|ua| !ua.is_empty()) else {
        return false;
    };

    let crawler = Parser::new()
        .parse(ua)
        .is_some_and(|result| result.category == "crawler");

    crawler || BOT_PATTERN.is_match(ua)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_user_agent_is_human() {
        assert!(!is_bot(None));
        assert!(!is_bot(Some("")));
    }

    #[test]
    fn test_browsers_are_human() {
        assert!(!is_bot(Some(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        )));
        assert!(!is_bot(Some(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1"
        )));
    }

    #[test]
    fn test_search_engine_crawlers() {
        assert!(is_bot(Some(
            "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)"
        )));
        assert!(is_bot(Some(
            "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)"
        )));
    }

    #[test]
    fn test_link_preview_agents() {
        assert!(is_bot(Some(
            "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)"
        )));
        assert!(is_bot(Some("TelegramBot (like TwitterBot)")));
        assert!(is_bot(Some("curl/8.4.0")));
    }
}
