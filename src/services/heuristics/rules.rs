// Heuristic rule table
// Ordered, immutable list of URL rules; table order is flag order

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::utils::url_normalizer::NormalizedUrl;

lazy_static! {
    /// Four dot-separated groups of 1-3 digits spanning the whole authority
    static ref RAW_IP_PATTERN: Regex =
        Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("Invalid raw IP regex");
}

// =============================================================================
// CONSTANTS
// =============================================================================

/// Words often found in phishing links, in reporting order
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login", "verify", "update", "secure", "bank", "account", "signin", "confirm", "wallet",
    "free", "prize", "bonus", "paypal", "netflix", "amazon",
];

pub const RAW_IP_WEIGHT: u32 = 50;
pub const KEYWORD_WEIGHT: u32 = 20;
pub const AT_SYMBOL_WEIGHT: u32 = 40;
pub const SUBDOMAIN_WEIGHT: u32 = 10;
pub const LENGTH_WEIGHT: u32 = 10;

/// Dots allowed in the authority before the subdomain rule fires
pub const MAX_HOST_DOTS: usize = 3;
/// Characters allowed in the full URL before the length rule fires
pub const MAX_URL_LENGTH: usize = 75;

// =============================================================================
// RULE TYPES
// =============================================================================

/// Raw evaluator output: how many times the weight applies and the evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub multiplier: u32,
    pub flag: String,
}

impl RuleHit {
    pub fn single(flag: impl Into<String>) -> Self {
        Self {
            multiplier: 1,
            flag: flag.into(),
        }
    }
}

/// A triggered rule with its weighted score contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule_id: &'static str,
    pub contribution: u32,
    pub flag: String,
}

pub type RuleEvaluator = fn(&NormalizedUrl) -> Option<RuleHit>;

#[derive(Clone, Copy)]
pub struct Rule {
    id: &'static str,
    description: &'static str,
    weight: u32,
    evaluator: RuleEvaluator,
}

impl Rule {
    pub const fn new(
        id: &'static str,
        description: &'static str,
        weight: u32,
        evaluator: RuleEvaluator,
    ) -> Self {
        Self {
            id,
            description,
            weight,
            evaluator,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn evaluate(&self, url: &NormalizedUrl) -> Option<RuleMatch> {
        (self.evaluator)(url).map(|hit| RuleMatch {
            rule_id: self.id,
            contribution: self.weight.saturating_mul(hit.multiplier),
            flag: hit.flag,
        })
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("weight", &self.weight)
            .finish()
    }
}

// =============================================================================
// DEFAULT RULE TABLE
// =============================================================================

pub static DEFAULT_RULES: &[Rule] = &[
    Rule::new(
        "raw_ip_host",
        "Host is a bare dotted-quad IP address",
        RAW_IP_WEIGHT,
        raw_ip_host,
    ),
    Rule::new(
        "suspicious_keywords",
        "URL contains phishing keywords (weight applies per keyword)",
        KEYWORD_WEIGHT,
        suspicious_keywords,
    ),
    Rule::new(
        "at_symbol",
        "URL contains '@', hiding the real destination",
        AT_SYMBOL_WEIGHT,
        at_symbol,
    ),
    Rule::new(
        "excess_subdomains",
        "Host has more than three dots",
        SUBDOMAIN_WEIGHT,
        excess_subdomains,
    ),
    Rule::new(
        "excess_length",
        "URL is longer than 75 characters",
        LENGTH_WEIGHT,
        excess_length,
    ),
];

// =============================================================================
// EVALUATORS
// =============================================================================

/// Keywords contained in `url` (case-insensitive), in [`SUSPICIOUS_KEYWORDS`] order.
pub fn matching_keywords(url: &str) -> Vec<&'static str> {
    let lowered = url.to_lowercase();
    SUSPICIOUS_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| lowered.contains(keyword))
        .collect()
}

fn raw_ip_host(url: &NormalizedUrl) -> Option<RuleHit> {
    RAW_IP_PATTERN
        .is_match(&url.host)
        .then(|| RuleHit::single("URL uses raw IP address"))
}

fn suspicious_keywords(url: &NormalizedUrl) -> Option<RuleHit> {
    let found = matching_keywords(&url.full);
    if found.is_empty() {
        return None;
    }

    let listed = found
        .iter()
        .map(|keyword| format!("'{}'", keyword))
        .collect::<Vec<_>>()
        .join(", ");

    Some(RuleHit {
        multiplier: found.len() as u32,
        flag: format!("Suspicious keywords found: [{}]", listed),
    })
}

fn at_symbol(url: &NormalizedUrl) -> Option<RuleHit> {
    url.full
        .contains('@')
        .then(|| RuleHit::single("Contains '@' symbol (Obfuscation technique)"))
}

fn excess_subdomains(url: &NormalizedUrl) -> Option<RuleHit> {
    let dots = url.host.matches('.').count();
    (dots > MAX_HOST_DOTS)
        .then(|| RuleHit::single(format!("High number of subdomains ({} dots)", dots)))
}

fn excess_length(url: &NormalizedUrl) -> Option<RuleHit> {
    (url.full.chars().count() > MAX_URL_LENGTH)
        .then(|| RuleHit::single("URL is suspiciously long"))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::url_normalizer::normalize_url;

    fn rule(id: &str) -> &'static Rule {
        DEFAULT_RULES
            .iter()
            .find(|r| r.id() == id)
            .expect("rule exists")
    }

    #[test]
    fn test_rule_table_order_and_weights() {
        let table: Vec<(&str, u32)> = DEFAULT_RULES.iter().map(|r| (r.id(), r.weight())).collect();
        assert_eq!(
            table,
            vec![
                ("raw_ip_host", 50),
                ("suspicious_keywords", 20),
                ("at_symbol", 40),
                ("excess_subdomains", 10),
                ("excess_length", 10),
            ]
        );
    }

    #[test]
    fn test_keyword_list_is_fixed() {
        assert_eq!(SUSPICIOUS_KEYWORDS.len(), 15);
        assert_eq!(SUSPICIOUS_KEYWORDS.first(), Some(&"login"));
        assert_eq!(SUSPICIOUS_KEYWORDS.last(), Some(&"amazon"));
    }

    #[test]
    fn test_raw_ip_rule_requires_whole_host() {
        let ip = rule("raw_ip_host");
        let hit = ip.evaluate(&normalize_url("http://10.0.0.1/").unwrap()).unwrap();
        assert_eq!(hit.contribution, 50);
        assert_eq!(hit.flag, "URL uses raw IP address");

        // Port, userinfo and extra octets defeat the pattern
        assert!(ip.evaluate(&normalize_url("http://10.0.0.1:8080/").unwrap()).is_none());
        assert!(ip.evaluate(&normalize_url("http://me@10.0.0.1/").unwrap()).is_none());
        assert!(ip.evaluate(&normalize_url("http://10.0.0.1.5/").unwrap()).is_none());
        assert!(ip.evaluate(&normalize_url("http://1000.0.0.1/").unwrap()).is_none());
    }

    #[test]
    fn test_keywords_are_case_insensitive_and_ordered() {
        assert_eq!(
            matching_keywords("HTTP://PAYPAL.example.com/Login"),
            vec!["login", "paypal"]
        );
        assert!(matching_keywords("https://example.com").is_empty());

        let hit = rule("suspicious_keywords")
            .evaluate(&normalize_url("free-bonus.example/wallet").unwrap())
            .unwrap();
        assert_eq!(hit.contribution, 60);
        assert_eq!(
            hit.flag,
            "Suspicious keywords found: ['wallet', 'free', 'bonus']"
        );
    }

    #[test]
    fn test_keywords_count_once_each() {
        let hit = rule("suspicious_keywords")
            .evaluate(&normalize_url("login.example.com/login/login").unwrap())
            .unwrap();
        assert_eq!(hit.contribution, 20);
    }

    #[test]
    fn test_subdomain_rule_reports_dot_count() {
        let subdomains = rule("excess_subdomains");
        assert!(subdomains
            .evaluate(&normalize_url("a.b.c.d/").unwrap())
            .is_none());

        let hit = subdomains
            .evaluate(&normalize_url("a.b.c.d.e.f/").unwrap())
            .unwrap();
        assert_eq!(hit.flag, "High number of subdomains (5 dots)");
        assert_eq!(hit.contribution, 10);
    }

    #[test]
    fn test_subdomain_rule_ignores_path_dots() {
        assert!(rule("excess_subdomains")
            .evaluate(&normalize_url("example.com/a.b.c.d.e").unwrap())
            .is_none());
    }

    #[test]
    fn test_length_counts_characters() {
        let length = rule("excess_length");
        // 7 + 68 = 75 characters, multi-byte characters count once
        let at_limit = format!("http://{}", "é".repeat(68));
        assert!(length.evaluate(&normalize_url(&at_limit).unwrap()).is_none());

        let over_limit = format!("http://{}", "é".repeat(69));
        assert!(length.evaluate(&normalize_url(&over_limit).unwrap()).is_some());
    }
}
