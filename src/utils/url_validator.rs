//! URL 验证模块
//!
//! Accepts absolute `http`, `https` and `ftp` URLs with a remainder after
//! `://` that is free of whitespace and control characters.

use once_cell::sync::Lazy;
use regex::Regex;

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(https?|ftp)://").expect("valid scheme regex"));

// The first character after `://` may not be `/ $ . ? #`, and at least one
// more character must follow it. Control characters would make the URL
// unusable as a `Location` header.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?|ftp)://[^\s\p{Cc}/$.?#][^\s\p{Cc}]+$").expect("valid url regex")
});

/// URL 验证错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    UnsupportedScheme(String),
    InvalidFormat,
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::UnsupportedScheme(scheme) => write!(
                f,
                "Unsupported scheme: {}. Only http://, https:// and ftp:// are allowed",
                scheme
            ),
            Self::InvalidFormat => write!(f, "Invalid URL format"),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 验证 URL 格式
///
/// The URL is checked as submitted; surrounding whitespace makes it invalid.
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    if url.trim().is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    if !SCHEME_RE.is_match(url) {
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| format!("{}:", scheme))
            .unwrap_or_else(|| "<none>".to_string());
        return Err(UrlValidationError::UnsupportedScheme(scheme));
    }

    if !URL_RE.is_match(url) {
        return Err(UrlValidationError::InvalidFormat);
    }

    Ok(())
}
