// Heuristic URL risk scoring
// Rule-based engine: normalize, evaluate every rule in table order, cap, classify

pub mod report;
pub mod rules;

pub use report::{RiskReport, ScanFailure, ScanOutcome, Verdict, MAX_RISK_SCORE};
pub use rules::{Rule, RuleHit, RuleMatch, DEFAULT_RULES, SUSPICIOUS_KEYWORDS};

use crate::utils::url_normalizer::{normalize_url, NormalizedUrl};

/// Stateless scorer over a `'static` rule table.
///
/// Holds no mutable state, so one instance can be shared across any number of
/// concurrent callers.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicDetector {
    rules: &'static [Rule],
}

impl Default for HeuristicDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicDetector {
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES,
        }
    }

    /// Build a detector over a custom rule table (evaluated in slice order)
    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Score a raw user-supplied string.
    ///
    /// Never fails: inputs that cannot be decomposed come back as
    /// [`ScanOutcome::Failed`] with no score and no flags.
    pub fn check_url(&self, raw: &str) -> ScanOutcome {
        match normalize_url(raw) {
            Ok(url) => ScanOutcome::Report(self.score(&url)),
            Err(_) => ScanOutcome::Failed(ScanFailure::invalid_format()),
        }
    }

    /// Run every rule against an already normalized URL
    pub fn score(&self, url: &NormalizedUrl) -> RiskReport {
        let matches = self.evaluate(url);

        let total = matches
            .iter()
            .fold(0u32, |acc, m| acc.saturating_add(m.contribution));
        let risk_score = total.min(u32::from(MAX_RISK_SCORE)) as u8;

        RiskReport {
            url: url.full.clone(),
            risk_score,
            verdict: Verdict::from_score(risk_score),
            flags: matches.into_iter().map(|m| m.flag).collect(),
        }
    }

    /// Triggered rules with their uncapped contributions, in table order
    pub fn evaluate(&self, url: &NormalizedUrl) -> Vec<RuleMatch> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(url))
            .collect()
    }
}
