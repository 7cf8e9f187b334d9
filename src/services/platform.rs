//! Social platform detection from post URLs
//!
//! Submitted URLs are only classified, never fetched.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Platform a post was published on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Linkedin,
    Unknown,
}

impl Platform {
    /// Display label for tables and badges
    pub fn label(self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Linkedin => "LinkedIn",
            Self::Unknown => "Unknown",
        }
    }
}

fn host_regex() -> &'static Regex {
    static HOST: OnceLock<Regex> = OnceLock::new();
    HOST.get_or_init(|| {
        Regex::new(r"^https?://(?:www\.)?([^/:?#]+)").expect("host pattern is valid")
    })
}

/// Classify a post URL by its host. `twitter.com` and `x.com` both map to
/// Twitter; anything unrecognized is Unknown rather than an error.
pub fn detect_platform(url: &str) -> Platform {
    let Some(host) = host_regex()
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
    else {
        return Platform::Unknown;
    };

    if host == "twitter.com"
        || host == "x.com"
        || host.ends_with(".twitter.com")
        || host.ends_with(".x.com")
    {
        Platform::Twitter
    } else if host == "linkedin.com" || host.ends_with(".linkedin.com") {
        Platform::Linkedin
    } else {
        Platform::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_twitter() {
        assert_eq!(
            detect_platform("https://twitter.com/user/status/123456789"),
            Platform::Twitter
        );
        assert_eq!(
            detect_platform("https://x.com/user/status/123456789"),
            Platform::Twitter
        );
        assert_eq!(
            detect_platform("https://www.twitter.com/user/status/1"),
            Platform::Twitter
        );
    }

    #[test]
    fn test_detect_linkedin() {
        assert_eq!(
            detect_platform("https://linkedin.com/posts/user_activity-123"),
            Platform::Linkedin
        );
        assert_eq!(
            detect_platform("https://www.linkedin.com/posts/user_activity-123"),
            Platform::Linkedin
        );
    }

    #[test]
    fn test_detect_unknown_hosts() {
        assert_eq!(detect_platform("https://example.com/post/1"), Platform::Unknown);
        // Look-alike domains must not match
        assert_eq!(
            detect_platform("https://nottwitter.com/status/1"),
            Platform::Unknown
        );
        assert_eq!(
            detect_platform("https://linkedin.com.evil.io/p/1"),
            Platform::Unknown
        );
    }

    #[test]
    fn test_detect_not_a_url() {
        assert_eq!(detect_platform(""), Platform::Unknown);
        assert_eq!(detect_platform("just some words"), Platform::Unknown);
    }

    #[test]
    fn test_platform_labels() {
        assert_eq!(Platform::Twitter.label(), "Twitter");
        assert_eq!(Platform::Linkedin.label(), "LinkedIn");
        assert_eq!(Platform::Unknown.label(), "Unknown");
    }
}
