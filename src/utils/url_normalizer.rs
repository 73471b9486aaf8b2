// URL normalization for heuristic scanning
// Guarantees an explicit scheme and splits the authority exactly as the caller wrote it

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use url::Host;

// =============================================================================
// STATIC REGEX PATTERNS
// =============================================================================

lazy_static! {
    /// Generic URI split (RFC 3986, appendix B)
    /// Groups: 2 = scheme, 4 = authority, 5 = path, 7 = query, 9 = fragment
    static ref URI_COMPONENTS: Regex =
        Regex::new(r"(?s)^(([^:/?#]+):)?(//([^/?#]*))?([^?#]*)(\?([^#]*))?(#(.*))?$")
            .expect("Invalid URI components regex");

    /// IPvFuture literal found between brackets, e.g. `v1.fe80::a+en1`
    static ref IPV_FUTURE_PATTERN: Regex =
        Regex::new(r"^v[a-fA-F0-9]+\..+$").expect("Invalid IPvFuture regex");
}

// =============================================================================
// CONSTANTS
// =============================================================================

/// Prefix added to inputs that carry no recognised scheme
pub const DEFAULT_SCHEME_PREFIX: &str = "http://";

const ACCEPTED_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Delimiters an authority must not gain through NFKC folding
const NFKC_FORBIDDEN: &[char] = &['/', '?', '#', '@', ':'];

// =============================================================================
// ERROR TYPES
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlFormatError {
    #[error("Invalid URL format: {0}")]
    InvalidUrlFormat(String),
}

// =============================================================================
// DATA STRUCTURES
// =============================================================================

/// A scheme-qualified URL decomposed into its raw components.
///
/// `host` is the untouched authority: userinfo and port stay in it, nothing is
/// lowercased or IDNA-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedUrl {
    pub full: String,
    pub host: String,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl NormalizedUrl {
    pub fn parse(raw: &str) -> Result<Self, UrlFormatError> {
        normalize_url(raw)
    }

    pub fn is_https(&self) -> bool {
        self.full.starts_with("https://")
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Prepend `http://` unless the input already starts with `http://` or `https://`.
/// The prefix check is case-sensitive.
pub fn ensure_scheme(raw: &str) -> String {
    if ACCEPTED_PREFIXES
        .iter()
        .any(|prefix| raw.starts_with(prefix))
    {
        raw.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, raw)
    }
}

/// Normalize a raw string into a [`NormalizedUrl`].
///
/// Only structurally broken authorities are rejected (unbalanced brackets or a
/// bracketed host that is not an IP literal); everything else parses.
pub fn normalize_url(raw: &str) -> Result<NormalizedUrl, UrlFormatError> {
    let full = ensure_scheme(raw);

    // Tab and newline characters are ignored while splitting but kept in `full`
    let cleaned: String = full
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let captures = URI_COMPONENTS
        .captures(&cleaned)
        .ok_or_else(|| UrlFormatError::InvalidUrlFormat(full.clone()))?;

    let host = captures
        .get(4)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    validate_authority(&host)?;

    let path = captures
        .get(5)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let query = captures.get(7).map(|m| m.as_str().to_string());
    let fragment = captures.get(9).map(|m| m.as_str().to_string());

    Ok(NormalizedUrl {
        full,
        host,
        path,
        query,
        fragment,
    })
}

fn validate_authority(authority: &str) -> Result<(), UrlFormatError> {
    check_brackets(authority)?;
    check_nfkc(authority)
}

fn check_brackets(authority: &str) -> Result<(), UrlFormatError> {
    let has_open = authority.contains('[');
    let has_close = authority.contains(']');

    if has_open != has_close {
        return Err(UrlFormatError::InvalidUrlFormat(format!(
            "unbalanced brackets in authority: {}",
            authority
        )));
    }

    if !has_open {
        return Ok(());
    }

    let after_open = authority
        .split_once('[')
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    let bracketed = after_open
        .split_once(']')
        .map_or(after_open, |(inner, _)| inner);

    if IPV_FUTURE_PATTERN.is_match(bracketed) {
        return Ok(());
    }

    // A zone ID (`fe80::1%eth0`) is allowed after a single '%'
    let (address, zone) = match bracketed.split_once('%') {
        Some((address, zone)) => (address, Some(zone)),
        None => (bracketed, None),
    };
    let zone_ok = zone.map_or(true, |z| !z.is_empty() && !z.contains('%'));

    match Host::parse(&format!("[{}]", address)) {
        Ok(Host::Ipv6(_)) if zone_ok => Ok(()),
        _ => Err(UrlFormatError::InvalidUrlFormat(format!(
            "invalid IPv6 literal: {}",
            bracketed
        ))),
    }
}

/// Reject authorities whose NFKC form smuggles in URL delimiters,
/// e.g. a fullwidth solidus that folds to '/'
fn check_nfkc(authority: &str) -> Result<(), UrlFormatError> {
    if authority.is_ascii() {
        return Ok(());
    }

    let stripped: String = authority
        .chars()
        .filter(|c| !matches!(c, '@' | ':' | '#' | '?'))
        .collect();
    let folded: String = stripped.nfkc().collect();

    if folded != stripped && folded.contains(NFKC_FORBIDDEN) {
        return Err(UrlFormatError::InvalidUrlFormat(format!(
            "authority contains invalid characters under NFKC normalization: {}",
            authority
        )));
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_scheme_when_missing() {
        assert_eq!(ensure_scheme("example.com"), "http://example.com");
        assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
        assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
        // Prefix check is literal and case-sensitive
        assert_eq!(ensure_scheme("HTTP://example.com"), "http://HTTP://example.com");
        assert_eq!(ensure_scheme("ftp://example.com"), "http://ftp://example.com");
    }

    #[test]
    fn test_splits_authority_and_path() {
        let url = normalize_url("https://user:pw@example.com:8443/a/b?q=1#top").unwrap();
        assert_eq!(url.full, "https://user:pw@example.com:8443/a/b?q=1#top");
        assert_eq!(url.host, "user:pw@example.com:8443");
        assert_eq!(url.path, "/a/b");
        assert_eq!(url.query.as_deref(), Some("q=1"));
        assert_eq!(url.fragment.as_deref(), Some("top"));
        assert!(url.is_https());
    }

    #[test]
    fn test_authority_ends_at_query_or_fragment() {
        let url = normalize_url("example.com?next=/login").unwrap();
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path, "");
        assert_eq!(url.query.as_deref(), Some("next=/login"));

        let url = normalize_url("example.com#/home").unwrap();
        assert_eq!(url.host, "example.com");
        assert_eq!(url.fragment.as_deref(), Some("/home"));
    }

    #[test]
    fn test_empty_input_is_accepted() {
        let url = normalize_url("").unwrap();
        assert_eq!(url.full, "http://");
        assert_eq!(url.host, "");
        assert_eq!(url.path, "");
    }

    #[test]
    fn test_whitespace_is_ignored_while_splitting() {
        let url = normalize_url("exa\tmple.com/pa\nth").unwrap();
        assert_eq!(url.full, "http://exa\tmple.com/pa\nth");
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path, "/path");
    }

    #[test]
    fn test_ipv6_literals() {
        let url = normalize_url("http://[::1]:8080/admin").unwrap();
        assert_eq!(url.host, "[::1]:8080");

        assert!(normalize_url("http://[v1.fe80::a+en1]/").is_ok());
    }

    #[test]
    fn test_rejects_broken_brackets() {
        assert!(matches!(
            normalize_url("http://[::1/path"),
            Err(UrlFormatError::InvalidUrlFormat(_))
        ));
        assert!(matches!(
            normalize_url("http://::1]/path"),
            Err(UrlFormatError::InvalidUrlFormat(_))
        ));
        assert!(matches!(
            normalize_url("[not-an-ip]"),
            Err(UrlFormatError::InvalidUrlFormat(_))
        ));
        // IPv4 inside brackets is not an IPv6 literal
        assert!(normalize_url("http://[127.0.0.1]/").is_err());
    }

    #[test]
    fn test_ipv6_zone_id_is_accepted() {
        let url = normalize_url("http://[fe80::1%25eth0]/").unwrap();
        assert_eq!(url.host, "[fe80::1%25eth0]");

        assert!(normalize_url("http://[fe80::1%]/").is_err());
        assert!(normalize_url("http://[fe80::1%a%b]/").is_err());
        assert!(normalize_url("http://[not-ipv6%eth0]/").is_err());
    }

    #[test]
    fn test_rejects_delimiters_introduced_by_nfkc() {
        // U+FF0F FULLWIDTH SOLIDUS folds to '/'
        assert!(matches!(
            normalize_url("http://evil.com\u{FF0F}paypal.com"),
            Err(UrlFormatError::InvalidUrlFormat(_))
        ));
        // U+FF20 FULLWIDTH COMMERCIAL AT folds to '@'
        assert!(normalize_url("http://google.com\u{FF20}evil.net/").is_err());

        // Non-ASCII hosts that fold to nothing suspicious still parse
        let url = normalize_url("http://b\u{FC}cher.de/").unwrap();
        assert_eq!(url.host, "b\u{FC}cher.de");
        assert!(normalize_url("http://\u{FF41}bc.com/").is_ok());
    }

    #[test]
    fn test_brackets_outside_authority_are_fine() {
        let url = normalize_url("example.com/search?q=[a]").unwrap();
        assert_eq!(url.host, "example.com");
    }
}
